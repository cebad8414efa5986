
pub mod error;
pub mod units;
pub mod util;

pub use error::Error;
