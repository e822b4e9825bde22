use super::Rgb;

/// Warmest temperature the color dial can select
pub const KELVIN_MIN: f32 = 1500.0;

/// Coolest temperature the color dial can select
pub const KELVIN_MAX: f32 = 5500.0;

/// Convert a Kelvin temperature to an RGB color
///
/// Piecewise black-body approximation working on `kelvin / 100`: red is
/// saturated up to 6600K, blue is off up to 1900K, everything else follows a
/// log (below 6600K) or power (above) fit. Channels are truncated, not rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn kelvin_to_rgb(kelvin: f32) -> Rgb {
    let temp = kelvin / 100.0;

    let (red, green, blue) = if temp <= 66.0 {
        let green = 99.470_802_586_1 * libm::logf(temp) - 161.119_568_166_1;
        let blue = if temp <= 19.0 {
            0.0
        } else {
            138.517_731_223_1 * libm::logf(temp - 10.0) - 305.044_792_730_7
        };
        (255.0, green, blue)
    } else {
        let red = 329.698_727_446 * libm::powf(temp - 60.0, -0.133_204_759_2);
        let green = 288.122_169_528_3 * libm::powf(temp - 60.0, -0.075_514_849_2);
        (red, green, 255.0)
    };

    Rgb {
        r: red.clamp(0.0, 255.0) as u8,
        g: green.clamp(0.0, 255.0) as u8,
        b: blue.clamp(0.0, 255.0) as u8,
    }
}
