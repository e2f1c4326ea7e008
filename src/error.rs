use std::{io, num::ParseIntError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
  #[error(
    "A world where you would earn money by buying fruit would be a terrible world. \
     All fruit farmers would have to file for bankruptcy! (price of {fruit}: {price})"
  )]
  NegativePrice { fruit: &'static str, price: i64 },

  #[error("Could not read the price of {fruit} from {input:?}: {source}")]
  Parse {
    fruit: &'static str,
    input: String,
    source: ParseIntError,
  },

  #[error("Input ended before the price of {fruit} was given")]
  MissingPrice { fruit: &'static str },

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl MarketError {
  /// The process exit status this error should be reported with.
  pub fn exit_code(&self) -> exitcode::ExitCode {
    match self {
      MarketError::Io(_) => exitcode::IOERR,
      _ => exitcode::DATAERR,
    }
  }
}
