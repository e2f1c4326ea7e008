use std::io::{BufRead, Write};

use termion::style;
use tracing::debug;

use crate::{error::MarketError, output::FRUIT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prices {
  pub orange: u64,
  pub grapefruit: u64,
  pub melon: u64,
}

impl Prices {
  /// Rejects negative prices. A price of zero is fine.
  pub fn new(orange: i64, grapefruit: i64, melon: i64) -> Result<Self, MarketError> {
    let [a, b, c] = FRUIT.categories();

    Ok(Self {
      orange: validate(a.name, orange)?,
      grapefruit: validate(b.name, grapefruit)?,
      melon: validate(c.name, melon)?,
    })
  }

  pub fn values(&self) -> [u64; 3] {
    [self.orange, self.grapefruit, self.melon]
  }
}

fn validate(fruit: &'static str, price: i64) -> Result<u64, MarketError> {
  u64::try_from(price).map_err(|_| MarketError::NegativePrice { fruit, price })
}

/// Reads the three prices one whitespace separated token at a time, asking for
/// each in turn when prompting is enabled.
pub struct PriceReader<R, W> {
  input: R,
  prompt: Option<W>,
  pending: Vec<String>,
}

impl<R, W> PriceReader<R, W>
where
  R: BufRead,
  W: Write,
{
  pub fn new(input: R, prompt: Option<W>) -> Self {
    Self {
      input,
      prompt,
      pending: Vec::new(),
    }
  }

  fn next_token(&mut self) -> Result<Option<String>, MarketError> {
    while self.pending.is_empty() {
      let mut line = String::new();
      if self.input.read_line(&mut line)? == 0 {
        return Ok(None);
      }
      self.pending = line.split_whitespace().rev().map(str::to_string).collect();
    }
    Ok(self.pending.pop())
  }

  pub fn read(mut self) -> Result<Prices, MarketError> {
    let mut values = [0i64; 3];
    for (value, category) in values.iter_mut().zip(FRUIT.categories()) {
      if self.pending.is_empty() {
        if let Some(prompt) = self.prompt.as_mut() {
          write!(
            prompt,
            "{}price of {} {}: {}",
            style::Bold,
            category.article,
            category.name,
            style::Reset
          )?;
          prompt.flush()?;
        }
      }

      let token = self.next_token()?.ok_or(MarketError::MissingPrice {
        fruit: category.name,
      })?;
      *value = token.parse().map_err(|source| MarketError::Parse {
        fruit: category.name,
        input: token.clone(),
        source,
      })?;
      debug!(fruit = category.name, price = *value, "read price");
    }

    let [orange, grapefruit, melon] = values;
    Prices::new(orange, grapefruit, melon)
  }
}
