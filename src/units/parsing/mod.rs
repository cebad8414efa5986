
//! Parsing unit definitions and expressions such as `N = kg*m/s^2`.

mod base;
mod line;

pub use base::{SymbolLookup, NullLookup, ParseError};
pub use line::{parse_factor, parse_units, parse_line, strip_cosmetic};
