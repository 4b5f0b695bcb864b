use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Points awarded per letter verdict. `incorrect` is usually negative, so a
/// guess (and a whole round) can score below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointValues {
    pub correct: i32,
    pub almost: i32,
    pub incorrect: i32,
}

pub const CLASSIC_POINTS: PointValues = PointValues {
    correct: 2,
    almost: 1,
    incorrect: -1,
};

/// Active scoring configuration. Mutable between rounds only; the word
/// selector's clamp step keeps `word_length` in line with the active target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_guesses: usize,
    pub points: PointValues,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: CLASSIC_RULES.word_length,
            max_guesses: CLASSIC_RULES.max_guesses,
            points: CLASSIC_POINTS,
        }
    }
}

impl GameConfig {
    pub fn apply(&mut self, rules: &Rules) {
        self.word_length = rules.word_length;
        self.max_guesses = rules.max_guesses;
    }
}

/// The three numbers a player can customize: word length, guesses per word,
/// and games per series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub word_length: usize,
    pub max_guesses: usize,
    pub rounds: usize,
}

pub const CLASSIC_RULES: Rules = Rules {
    word_length: 5,
    max_guesses: 6,
    rounds: 1,
};

impl Default for Rules {
    fn default() -> Self {
        CLASSIC_RULES
    }
}

impl Rules {
    /// Parse a "5, 6, 3" or "5 6 3" style line. Any separator works; extra
    /// numbers are ignored. A missing, zero, or unparseable field keeps the
    /// value it already has, so malformed input degrades instead of failing.
    pub fn parse_line(&self, line: &str) -> Rules {
        let fields: Vec<Option<usize>> = line
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<usize>().ok().filter(|n| *n > 0))
            .collect();

        let pick = |idx: usize, current: usize| fields.get(idx).copied().flatten().unwrap_or(current);

        Rules {
            word_length: pick(0, self.word_length),
            max_guesses: pick(1, self.max_guesses),
            rounds: pick(2, self.rounds),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Rules;
    fn save(&self, rules: &Rules) -> std::io::Result<()>;
}

/// Persists the last-used rules as JSON under the platform config dir.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "verba") {
            pd.config_dir().join("rules.json")
        } else {
            PathBuf::from("verba_rules.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Rules {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(rules) = serde_json::from_slice::<Rules>(&bytes) {
                return rules;
            }
        }
        Rules::default()
    }

    fn save(&self, rules: &Rules) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(rules).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
