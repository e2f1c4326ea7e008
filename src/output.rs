use std::io::Write;

use itertools::Itertools;

use crate::{error::MarketError, search::Combination};

pub struct Category {
  pub name: &'static str,
  pub article: &'static str,
}

/// Names of the three categories, in the order prices are read and counts are
/// printed. Edit `FRUIT` to sell something else.
pub struct Catalog {
  categories: [Category; 3],
}

pub static FRUIT: Catalog = Catalog {
  categories: [
    Category {
      name: "orange",
      article: "an",
    },
    Category {
      name: "grapefruit",
      article: "a",
    },
    Category {
      name: "melon",
      article: "a",
    },
  ],
};

impl Catalog {
  pub fn categories(&self) -> &[Category; 3] {
    &self.categories
  }

  /// Renders one solution line, e.g. "1 orange, 0 grapefruits, 99 melons".
  /// Only a count of exactly 1 keeps the singular.
  pub fn describe(&self, combination: &Combination) -> String {
    self
      .categories
      .iter()
      .zip(combination.counts())
      .map(|(category, count)| {
        format!(
          "{count} {}{}",
          category.name,
          if count == 1 { "" } else { "s" }
        )
      })
      .join(", ")
  }

  /// Writes one line per combination as soon as it is produced, returning how
  /// many were written.
  pub fn write_all<W, I>(&self, out: &mut W, combinations: I) -> Result<usize, MarketError>
  where
    W: Write,
    I: IntoIterator<Item = Combination>,
  {
    combinations
      .into_iter()
      .try_fold(0, |written, combination| {
        writeln!(out, "{}", self.describe(&combination))?;
        Ok(written + 1)
      })
  }
}
