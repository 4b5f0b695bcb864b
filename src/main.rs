use clap::Parser;
use std::error::Error;

use verba::config::{ConfigStore, FileConfigStore, Rules};
use verba::dialog::ConsoleDialog;
use verba::dictionary::Dictionary;
use verba::session::GameSession;

/// turn-based word puzzle with solo and multiplayer modes
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret word in a limited number of tries. Solo or multiplayer, \
                  classic or custom rules, with per-series leaderboards and cumulative \
                  standings across replays."
)]
pub struct Cli {
    /// word length for the first game
    #[clap(short = 'w', long)]
    word_length: Option<usize>,

    /// guesses allowed per word
    #[clap(short = 'g', long)]
    max_guesses: Option<usize>,

    /// games per series
    #[clap(short = 'r', long)]
    rounds: Option<usize>,

    /// embedded word list to play against
    #[clap(short = 'l', long, default_value = "english")]
    word_list: String,
}

/// CLI flags override stored preferences; zeroes from either side are not
/// playable and fall back to the classic value.
fn effective_rules(cli: &Cli, stored: Rules) -> Rules {
    let classic = Rules::default();
    let pick = |flag: Option<usize>, stored: usize, classic: usize| {
        flag.filter(|n| *n > 0)
            .unwrap_or(if stored > 0 { stored } else { classic })
    };
    Rules {
        word_length: pick(cli.word_length, stored.word_length, classic.word_length),
        max_guesses: pick(cli.max_guesses, stored.max_guesses, classic.max_guesses),
        rounds: pick(cli.rounds, stored.rounds, classic.rounds),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let rules = effective_rules(&cli, store.load());
    let dictionary = Dictionary::load(&cli.word_list)?;

    let mut session = GameSession::new(ConsoleDialog::stdio(), dictionary, rules);
    session.run()?;

    if let Err(err) = store.save(&session.rules()) {
        log::warn!("could not persist rules: {err}");
    }
    Ok(())
}
