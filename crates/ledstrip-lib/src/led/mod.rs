//! LED data model: colors, palettes, pixel selection.

mod color;
mod palette;
mod range;

pub use color::{
    Color, ColorError, format_color, lookup_name, named_colors, parse_color_spec, resolve_color,
};
pub use palette::{ColorPair, ColorPalette, PaletteSpec};
pub use range::{PixelRange, RangeSettings, Traversal};
