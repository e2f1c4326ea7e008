use std::{
  io::{self, BufWriter, Write},
  process,
};

use clap::{ArgAction, Parser};
use termion::color;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
  error::MarketError,
  output::FRUIT,
  prices::{PriceReader, Prices},
  search::{Search, TARGET_BUDGET, TARGET_COUNT},
};

mod error;
mod output;
mod prices;
mod search;

#[derive(Parser, Debug)]
#[command(name = "fruit-market")]
#[command(
  about = "Find every way to buy exactly 100 fruits for exactly 10000 cents",
  long_about = None
)]
struct Cli {
  /// Prices of an orange, a grapefruit and a melon, in cents. Asked for on
  /// stdin when omitted.
  #[arg(num_args = 3, value_name = "PRICE", allow_negative_numbers = true)]
  prices: Vec<i64>,

  /// Never print the price prompts, even on a terminal.
  #[arg(long)]
  no_prompt: bool,

  /// Log more to stderr (-v info, -vv debug, -vvv trace).
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn read_prices(cli: &Cli) -> Result<Prices, MarketError> {
  if let [orange, grapefruit, melon] = cli.prices[..] {
    return Prices::new(orange, grapefruit, melon);
  }

  let stdin = io::stdin();
  let prompt = (!cli.no_prompt && termion::is_tty(&stdin)).then(io::stdout);
  PriceReader::new(stdin.lock(), prompt).read()
}

fn run(cli: &Cli) -> Result<usize, MarketError> {
  let prices = read_prices(cli)?;
  let search = Search::for_prices(prices);

  let mut out = BufWriter::new(io::stdout().lock());
  let found = FRUIT.write_all(
    &mut out,
    search.combinations().inspect(|combination| {
      debug_assert_eq!(combination.count(), TARGET_COUNT);
      debug_assert_eq!(combination.cost(&prices), TARGET_BUDGET);
    }),
  )?;
  out.flush()?;
  Ok(found)
}

fn report(error: &MarketError) {
  debug!(?error, "giving up");
  if termion::is_tty(&io::stderr()) {
    eprintln!(
      "{}{}{}",
      color::Fg(color::Red),
      error,
      color::Fg(color::Reset)
    );
  } else {
    eprintln!("{error}");
  }
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(&cli) {
    Ok(found) => {
      info!(found, "search finished");
      process::exit(exitcode::OK);
    }
    Err(error) => {
      report(&error);
      process::exit(error.exit_code());
    }
  }
}
