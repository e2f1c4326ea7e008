use itertools::Either;
use tracing::{debug, trace};

use crate::prices::Prices;

/// Number of fruits that must be bought.
pub const TARGET_COUNT: u32 = 100;
/// Number of cents that must be spent.
pub const TARGET_BUDGET: i128 = 10000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination {
  pub oranges: u32,
  pub grapefruits: u32,
  pub melons: u32,
}

impl Combination {
  pub fn new(oranges: u32, grapefruits: u32, melons: u32) -> Self {
    Self {
      oranges,
      grapefruits,
      melons,
    }
  }

  pub fn counts(&self) -> [u32; 3] {
    [self.oranges, self.grapefruits, self.melons]
  }

  pub fn count(&self) -> u32 {
    self.oranges + self.grapefruits + self.melons
  }

  pub fn cost(&self, prices: &Prices) -> i128 {
    self
      .counts()
      .iter()
      .zip(prices.values())
      .map(|(&count, price)| i128::from(count) * i128::from(price))
      .sum()
  }
}

/// What is left to buy once the oranges are fixed.
#[derive(Clone, Copy, Debug)]
struct Remainder {
  oranges: u32,
  count: u32,
  budget: i128,
}

fn remainders(orange_price: u64) -> impl Iterator<Item = Remainder> {
  (0..=TARGET_COUNT).map(move |oranges| Remainder {
    oranges,
    count: TARGET_COUNT - oranges,
    budget: TARGET_BUDGET - i128::from(oranges) * i128::from(orange_price),
  })
}

/// The two interchangeable ways of enumerating combinations. Which one applies
/// depends only on whether grapefruits and melons cost the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
  /// Grapefruits and melons have different prices, so for a fixed number of
  /// oranges there is at most one way to split the rest.
  General(Prices),
  /// Grapefruits and melons cost the same, so only their combined count
  /// matters and every split of it is equally valid.
  SamePrice { orange: u64, shared: u64 },
}

impl Search {
  pub fn for_prices(prices: Prices) -> Self {
    let search = if prices.grapefruit == prices.melon {
      Search::SamePrice {
        orange: prices.orange,
        shared: prices.grapefruit,
      }
    } else {
      Search::General(prices)
    };
    debug!(?search, "selected search");
    search
  }

  /// Every valid combination, ordered by oranges and then by grapefruits.
  pub fn combinations(self) -> impl Iterator<Item = Combination> {
    match self {
      Search::General(prices) => Either::Left(general(prices)),
      Search::SamePrice { orange, shared } => Either::Right(same_price(orange, shared)),
    }
  }
}

fn general(prices: Prices) -> impl Iterator<Item = Combination> {
  let grapefruit = i128::from(prices.grapefruit);
  let melon = i128::from(prices.melon);
  debug_assert_ne!(grapefruit, melon);

  remainders(prices.orange).filter_map(move |rest| {
    // Solves g + m = count, g * grapefruit + m * melon = budget. The division
    // truncates, so the result is only a candidate until checked below.
    let count = i128::from(rest.count);
    let grapefruits = (rest.budget - count * melon) / (grapefruit - melon);
    let melons = count - grapefruits;

    if grapefruits >= 0
      && melons >= 0
      && grapefruits * grapefruit + melons * melon == rest.budget
    {
      let combination = Combination::new(rest.oranges, grapefruits as u32, melons as u32);
      trace!(?combination, "split found");
      Some(combination)
    } else {
      None
    }
  })
}

fn same_price(orange: u64, shared: u64) -> impl Iterator<Item = Combination> {
  let shared = i128::from(shared);

  remainders(orange)
    .filter(move |rest| {
      if shared == 0 {
        rest.budget == 0
      } else {
        rest.budget % shared == 0 && rest.budget / shared == i128::from(rest.count)
      }
    })
    .flat_map(|rest| {
      trace!(oranges = rest.oranges, rest = rest.count, "every split fits");
      (0..=rest.count).map(move |grapefruits| {
        Combination::new(rest.oranges, grapefruits, rest.count - grapefruits)
      })
    })
}

#[cfg(test)]
mod test {
  use itertools::{iproduct, Itertools};
  use proptest::prelude::*;

  use super::{Combination, Search, TARGET_BUDGET, TARGET_COUNT};
  use crate::prices::Prices;

  fn prices(orange: i64, grapefruit: i64, melon: i64) -> Prices {
    Prices::new(orange, grapefruit, melon).unwrap()
  }

  /// Tries every (oranges, grapefruits) pair.
  fn brute_force(prices: Prices) -> Vec<Combination> {
    iproduct!(0..=TARGET_COUNT, 0..=TARGET_COUNT)
      .filter(|&(oranges, grapefruits)| oranges + grapefruits <= TARGET_COUNT)
      .map(|(oranges, grapefruits)| {
        Combination::new(oranges, grapefruits, TARGET_COUNT - oranges - grapefruits)
      })
      .filter(|combination| combination.cost(&prices) == TARGET_BUDGET)
      .collect()
  }

  fn search(prices: Prices) -> Vec<Combination> {
    Search::for_prices(prices).combinations().collect()
  }

  #[test]
  fn test_dispatch() {
    assert_eq!(
      Search::for_prices(prices(100, 50, 25)),
      Search::General(prices(100, 50, 25))
    );
    assert_eq!(
      Search::for_prices(prices(100, 50, 50)),
      Search::SamePrice {
        orange: 100,
        shared: 50
      }
    );
  }

  #[test]
  fn test_distinct_prices() {
    let prices = prices(100, 50, 25);
    let found = search(prices);

    assert!(!found.contains(&Combination::new(0, 100, 0)));
    assert_eq!(found, vec![Combination::new(100, 0, 0)]);
    assert_eq!(found, brute_force(prices));
  }

  #[test]
  fn test_several_answers() {
    assert_eq!(
      search(prices(10, 300, 50)),
      vec![
        Combination::new(0, 20, 80),
        Combination::new(25, 24, 51),
        Combination::new(50, 28, 22),
      ]
    );
    assert_eq!(search(prices(50, 1000, 20)), vec![Combination::new(38, 7, 55)]);
  }

  #[test]
  fn test_truncated_split_rejected() {
    // (10000 - 100 * 50) / (1000 - 50) truncates to 5, which does not add up.
    assert!(search(prices(5, 1000, 50)).is_empty());
  }

  #[test]
  fn test_same_price_fan_out() {
    let prices = prices(150, 50, 50);
    let found = search(prices);

    assert_eq!(found, brute_force(prices));
    assert_eq!(found.len(), 51);
    for (oranges, group) in &found.iter().group_by(|c| c.oranges) {
      let group: Vec<_> = group.collect();
      assert_eq!(oranges, 50);
      assert_eq!(group.len() as u32, TARGET_COUNT - oranges + 1);
      assert!(group
        .iter()
        .enumerate()
        .all(|(idx, c)| c.grapefruits == idx as u32));
    }
  }

  #[test]
  fn test_same_price_single_split() {
    assert_eq!(search(prices(100, 50, 50)), vec![Combination::new(100, 0, 0)]);
  }

  #[test]
  fn test_same_price_no_oranges() {
    let found = search(prices(200, 100, 100));
    assert_eq!(found.len(), 101);
    assert!(found.iter().all(|c| c.oranges == 0));
    assert_eq!(found.first(), Some(&Combination::new(0, 0, 100)));
    assert_eq!(found.last(), Some(&Combination::new(0, 100, 0)));
  }

  #[test]
  fn test_all_zero() {
    assert!(search(prices(0, 0, 0)).is_empty());
  }

  #[test]
  fn test_free_grapefruits_and_melons() {
    assert_eq!(search(prices(100, 0, 0)), vec![Combination::new(100, 0, 0)]);
  }

  #[test]
  fn test_prices_beyond_u32() {
    assert_eq!(
      search(prices(100, 4294967296, 7)),
      vec![Combination::new(100, 0, 0)]
    );
    assert_eq!(
      search(prices(100, i64::MAX, i64::MAX - 1)),
      vec![Combination::new(100, 0, 0)]
    );
    assert_eq!(
      search(prices(i64::MAX, 100, 100)),
      (0..=100)
        .map(|grapefruits| Combination::new(0, grapefruits, 100 - grapefruits))
        .collect::<Vec<_>>()
    );
  }

  #[test]
  fn test_free_oranges_and_grapefruits() {
    let prices = prices(0, 0, 200);
    let found = search(prices);

    assert_eq!(found, brute_force(prices));
    assert_eq!(found.len(), 51);
    assert!(found.iter().all(|c| c.melons == 50));
  }

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]
    #[test]
    fn matches_brute_force(orange in 0..300i64, grapefruit in 0..300i64, melon in 0..300i64) {
      let prices = prices(orange, grapefruit, melon);
      prop_assert_eq!(search(prices), brute_force(prices));
    }

    #[test]
    fn matches_brute_force_same_price(orange in 0..300i64, shared in 0..300i64) {
      let prices = prices(orange, shared, shared);
      prop_assert_eq!(search(prices), brute_force(prices));
    }

    #[test]
    fn large_prices_stay_valid(
      orange in 0..=i64::MAX,
      grapefruit in 0..=i64::MAX,
      melon in 0..=i64::MAX
    ) {
      let prices = prices(orange, grapefruit, melon);
      for combination in search(prices) {
        prop_assert_eq!(combination.count(), TARGET_COUNT);
        prop_assert_eq!(combination.cost(&prices), TARGET_BUDGET);
      }
    }
  }
}
