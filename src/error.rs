
use crate::units::parsing::ParseError;
use crate::units::registry::RegistryError;

use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("{0}")]
  Registry(#[from] RegistryError),
  #[error("Line {line}: {source}")]
  Definition {
    line: usize,
    #[source]
    source: Box<Error>,
  },
  #[error("{0}")]
  Io(#[from] io::Error),
}
