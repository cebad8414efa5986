
//! Unit trees: construction, normal forms, equivalence, parsing, and
//! rendering.

pub mod canonical;
pub mod common;
pub mod display;
pub mod node;
pub mod parsing;
pub mod power;
pub mod quantity;
pub mod registry;

#[cfg(test)]
mod proptests;

pub use common::{get_common, is_compatible};
pub use display::UnitDisplayFormat;
pub use node::UnitNode;
pub use power::Power;
pub use quantity::Quantity;
pub use registry::UnitRegistry;
