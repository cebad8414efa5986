
//! Various utility functions.

pub mod stricteq;
