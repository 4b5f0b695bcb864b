use crate::config::GameConfig;
use crate::dictionary::{Dictionary, Entry};
use crate::grade::{grade, GuessRecord};
use log::debug;
use thiserror::Error;

/// Lifecycle of one round. `Playing` is the only non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Playing,
    Won,
    Lost,
    Quit,
}

/// Why a submitted guess was not accepted. The first two are retry signals
/// resolved by re-prompting with the same board; `RoundOver` guards a round
/// that has already reached a terminal state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("expected {needed} characters, got {entered}")]
    WrongLength { entered: usize, needed: usize },
    #[error("`{0}` is not in this game's dictionary")]
    UnknownWord(String),
    #[error("this round is already over")]
    RoundOver,
}

/// One player's attempt sequence against one secret word.
#[derive(Clone, Debug)]
pub struct Round {
    pub target: Entry,
    pub attempts: Vec<GuessRecord>,
    pub status: Status,
    pub remaining: usize,
    pub remaining_at_quit: usize,
}

/// Lowercase and strip everything outside `[a-z0-9]`, matching the
/// dictionary's own alphabet.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

impl Round {
    pub fn new(target: Entry, config: &GameConfig) -> Self {
        Self {
            target,
            attempts: Vec::new(),
            // a zero-guess config has nothing to play
            status: if config.max_guesses == 0 {
                Status::Lost
            } else {
                Status::Playing
            },
            remaining: config.max_guesses,
            remaining_at_quit: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Playing
    }

    pub fn guesses_used(&self) -> usize {
        self.attempts.len()
    }

    /// Submit a raw guess: normalize, validate length and dictionary
    /// membership, then grade it and advance the state machine. Returns the
    /// graded record on success.
    pub fn submit(
        &mut self,
        raw: &str,
        dictionary: &Dictionary,
        config: &GameConfig,
    ) -> Result<GuessRecord, GuessError> {
        if self.is_over() {
            return Err(GuessError::RoundOver);
        }

        let word = normalize(raw);
        let entered = word.chars().count();
        if entered != config.word_length {
            return Err(GuessError::WrongLength {
                entered,
                needed: config.word_length,
            });
        }
        if !dictionary.contains(&word) {
            return Err(GuessError::UnknownWord(word));
        }

        let verdicts = grade(&word, &self.target.word);
        let record = GuessRecord { word, verdicts };
        self.attempts.push(record.clone());
        self.remaining -= 1;

        if record.solved() {
            self.status = Status::Won;
        } else if self.remaining == 0 {
            self.status = Status::Lost;
        }
        if self.is_over() {
            debug!(
                "round over: {} after {} attempt(s)",
                self.status,
                self.attempts.len()
            );
        }

        Ok(record)
    }

    /// Confirmable quit. Freezes the remaining count for the penalty, then
    /// zeroes it so no bonus can be computed from a stale value.
    pub fn quit(&mut self) {
        if self.is_over() {
            return;
        }
        self.status = Status::Quit;
        self.remaining_at_quit = self.remaining;
        self.remaining = 0;
        debug!("round quit with {} attempt(s) left", self.remaining_at_quit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Verdict;
    use assert_matches::assert_matches;

    fn dictionary() -> Dictionary {
        serde_json::from_str(
            r#"{
                "name": "test",
                "entries": [
                    { "word": "apple", "definition": "a fruit" },
                    { "word": "alert", "definition": "watchful" },
                    { "word": "angle", "definition": "a figure" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn apple_round(config: &GameConfig) -> Round {
        Round::new(
            Entry {
                word: "apple".into(),
                definition: "a fruit".into(),
            },
            config,
        )
    }

    #[test]
    fn normalize_strips_and_lowercases() {
        assert_eq!(normalize("  A-p_p!LE "), "apple");
        assert_eq!(normalize("Täst"), "tst");
        assert_eq!(normalize("abc123"), "abc123");
    }

    #[test]
    fn submit_rejects_wrong_length() {
        let config = GameConfig::default();
        let dict = dictionary();
        let mut round = apple_round(&config);

        assert_eq!(
            round.submit("oak", &dict, &config),
            Err(GuessError::WrongLength {
                entered: 3,
                needed: 5
            })
        );
        assert!(round.attempts.is_empty());
        assert_eq!(round.remaining, config.max_guesses);
    }

    #[test]
    fn submit_rejects_unknown_word() {
        let config = GameConfig::default();
        let dict = dictionary();
        let mut round = apple_round(&config);

        assert_eq!(
            round.submit("zzzzz", &dict, &config),
            Err(GuessError::UnknownWord("zzzzz".into()))
        );
        assert!(round.attempts.is_empty());
    }

    #[test]
    fn winning_guess_ends_the_round() {
        let config = GameConfig::default();
        let dict = dictionary();
        let mut round = apple_round(&config);

        let record = round.submit("alert", &dict, &config).unwrap();
        assert_eq!(
            record.verdicts,
            vec![
                Verdict::Correct,
                Verdict::Almost,
                Verdict::Almost,
                Verdict::Incorrect,
                Verdict::Incorrect
            ]
        );
        assert_eq!(round.status, Status::Playing);
        assert_eq!(round.remaining, 5);

        let record = round.submit("APPLE", &dict, &config).unwrap();
        assert!(record.solved());
        assert_eq!(round.status, Status::Won);
        assert_eq!(round.remaining, 4);
        assert_eq!(round.guesses_used(), 2);
    }

    #[test]
    fn exhausting_attempts_loses_the_round() {
        let config = GameConfig {
            max_guesses: 2,
            ..GameConfig::default()
        };
        let dict = dictionary();
        let mut round = apple_round(&config);

        round.submit("alert", &dict, &config).unwrap();
        round.submit("angle", &dict, &config).unwrap();
        assert_eq!(round.status, Status::Lost);
        assert_eq!(round.remaining, 0);
    }

    #[test]
    fn quit_freezes_remaining_for_the_penalty() {
        let config = GameConfig::default();
        let dict = dictionary();
        let mut round = apple_round(&config);

        round.submit("alert", &dict, &config).unwrap();
        round.quit();
        assert_eq!(round.status, Status::Quit);
        assert_eq!(round.remaining_at_quit, 5);
        assert_eq!(round.remaining, 0);
    }

    #[test]
    fn terminal_round_ignores_further_input() {
        let config = GameConfig::default();
        let dict = dictionary();
        let mut round = apple_round(&config);

        round.submit("apple", &dict, &config).unwrap();
        let frozen_attempts = round.attempts.len();

        assert_matches!(
            round.submit("alert", &dict, &config),
            Err(GuessError::RoundOver)
        );
        assert_eq!(round.attempts.len(), frozen_attempts);
        assert_eq!(round.status, Status::Won);

        // quitting after the fact changes nothing either
        round.quit();
        assert_eq!(round.status, Status::Won);
        assert_eq!(round.remaining_at_quit, 0);
    }
}
