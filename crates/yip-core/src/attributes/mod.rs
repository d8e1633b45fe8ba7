//! Stateless resolvers turning raw attribute strings into typed values.
//!
//! Every resolver takes the attribute name (used only for error messages) and
//! its raw value. Deciding whether an attribute name is known at all is the
//! caller's business.

mod lexer;
mod alignment;
mod color;
mod font;
mod image;
mod pairs;
mod scale;

pub use alignment::parse_alignment;
pub use color::parse_color;
pub use font::parse_font;
pub use image::ImageBuilder;
pub use pairs::{parse_bool, parse_bool_pair, parse_float_pair};
pub use scale::{parse_scale_mode, parse_scale_pair};
