mod kelvin;
mod utils;

use smart_leds::RGB8;

pub use kelvin::{KELVIN_MAX, KELVIN_MIN, kelvin_to_rgb};
pub use utils::{blend_colors, rgb_from_u32};

pub type Rgb = RGB8;

/// Fully dark pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
