//! Command line front end for bracket-padder.
//!
//! Replays one keystroke on a single line and prints what the padder made of
//! it, or prints the delimiters a line leaves open.

use std::{
  fmt,
  path::PathBuf,
  str::FromStr,
};

use clap::{
  ArgAction,
  Parser,
  Subcommand,
};
use eyre::{
  Result,
  bail,
  eyre,
};
use padder_lib::{
  config::PadderConfig,
  document::{
    CURSOR_MARKER,
    Document,
  },
  padding::{
    Outcome,
    Padder,
  },
  scanner::{
    remove_escaped_quotes,
    strip_closed_pairs,
    unclosed_pairs,
  },
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bracket-padder")]
#[command(about = "Keeps bracket and quote pairs padded while typing")]
struct Cli {
  /// Config file to use instead of the user config
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Raise log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Press KEY on LINE and print the line afterwards
  Replay {
    /// Line of text with a `|` marking the cursor
    line: String,
    /// `space`, `backspace` or a single character
    key:  Key,
  },
  /// Print the delimiters TEXT leaves open, innermost last
  Scan {
    text: String,

    /// Also print TEXT with every closed span removed
    #[arg(long)]
    stripped: bool,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
  Space,
  Backspace,
  Char(char),
}

impl FromStr for Key {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "space" => Ok(Self::Space),
      "backspace" => Ok(Self::Backspace),
      _ => {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
          (Some(ch), None) => Ok(Self::Char(ch)),
          _ => Err(format!("expected `space`, `backspace` or one character, got `{s}`")),
        }
      },
    }
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Space => f.write_str("space"),
      Self::Backspace => f.write_str("backspace"),
      Self::Char(ch) => write!(f, "{ch:?}"),
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let config = load_config(cli.config)?;
  match cli.command {
    Command::Replay { line, key } => {
      let padder = Padder::new(&config);
      let (text, outcome) = replay(&padder, &line, key)?;
      println!("{text}");
      println!("{}", describe(outcome));
    },
    Command::Scan { text, stripped } => {
      let registry = config.registry();
      if stripped {
        println!("{}", strip_closed_pairs(&remove_escaped_quotes(&text), &registry));
      }
      let unclosed: String = unclosed_pairs(&text, &registry).into_iter().collect();
      println!("{unclosed}");
    },
  }

  Ok(())
}

fn init_logging(verbosity: u8) {
  let level = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
    .with_writer(std::io::stderr)
    .init();
}

fn load_config(path: Option<PathBuf>) -> Result<PadderConfig> {
  if let Some(path) = &path
    && !path.is_file()
  {
    bail!("config file {} does not exist", path.display());
  }

  padder_loader::initialize_config_file(path);
  let config = PadderConfig::load_default()?;
  tracing::debug!(?config, "loaded config");
  Ok(config)
}

fn replay(padder: &Padder, line: &str, key: Key) -> Result<(String, Outcome)> {
  let mut doc = Document::from_marked(line)
    .ok_or_else(|| eyre!("LINE needs a `{CURSOR_MARKER}` marking the cursor"))?;

  let event = match key {
    Key::Space => doc.type_text(" "),
    Key::Backspace => doc.backspace(),
    Key::Char(ch) => doc.type_text(ch.encode_utf8(&mut [0; 4])),
  }
  .ok_or_else(|| eyre!("{key} does nothing at the cursor"))?;

  let outcome = padder.on_change_event(&event, &mut doc);
  Ok((doc.marked(), outcome))
}

fn describe(outcome: Outcome) -> String {
  match outcome {
    Outcome::Applied(kind) => format!("action: {kind}"),
    Outcome::Ignored => "action: none".to_owned(),
    Outcome::Failed(kind) => format!("action: {kind} (failed)"),
  }
}

#[cfg(test)]
mod test {
  use padder_lib::padding::ActionKind;

  use super::*;

  #[test]
  fn parses_keys() {
    assert_eq!("space".parse(), Ok(Key::Space));
    assert_eq!("backspace".parse(), Ok(Key::Backspace));
    assert_eq!("}".parse(), Ok(Key::Char('}')));
    assert_eq!(" ".parse(), Ok(Key::Char(' ')));
    assert!("tab".parse::<Key>().is_err());
    assert!("".parse::<Key>().is_err());
  }

  #[test]
  fn replays_keystrokes() {
    let padder = Padder::default();

    let (text, outcome) = replay(&padder, "f(|)", Key::Space).unwrap();
    assert_eq!(text, "f( | )");
    assert_eq!(outcome, Outcome::Applied(ActionKind::Pad));

    let (text, outcome) = replay(&padder, "f( | )", Key::Backspace).unwrap();
    assert_eq!(text, "f(|)");
    assert_eq!(outcome, Outcome::Applied(ActionKind::Unpad));

    let (text, outcome) = replay(&padder, "f( a | )", Key::Char(')')).unwrap();
    assert_eq!(text, "f( a  )|");
    assert_eq!(describe(outcome), "action: skip-close");
  }

  #[test]
  fn replay_needs_a_cursor() {
    let padder = Padder::default();
    assert!(replay(&padder, "f()", Key::Space).is_err());
    assert!(replay(&padder, "|f()", Key::Backspace).is_err());
  }

  #[test]
  fn cli_shape() {
    use clap::CommandFactory;
    Cli::command().debug_assert();

    let cli = Cli::parse_from(["bracket-padder", "-vv", "replay", "{|}", "space"]);
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Command::Replay { key: Key::Space, .. }));
  }
}
