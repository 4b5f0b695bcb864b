use std::collections::HashMap;

/// Per-letter outcome of grading one guess against the secret word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Almost,
    Incorrect,
}

/// One submitted guess together with its per-letter verdicts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRecord {
    pub word: String,
    pub verdicts: Vec<Verdict>,
}

impl GuessRecord {
    pub fn solved(&self) -> bool {
        self.verdicts.iter().all(|v| *v == Verdict::Correct)
    }
}

/// Grade `guess` against `target`, producing one verdict per position.
///
/// Two passes keep duplicate letters honest: exact matches are settled first
/// and removed from the pool, then the remaining positions (left to right)
/// earn `Almost` only while unmatched copies of that letter are left in the
/// target. A letter never gets more credit than the target can cover.
///
/// Both words must have the same number of characters; the round state
/// machine validates length before calling.
pub fn grade(guess: &str, target: &str) -> Vec<Verdict> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();
    assert_eq!(
        guess_chars.len(),
        target_chars.len(),
        "guess and target must be the same length"
    );

    let mut verdicts = vec![Verdict::Incorrect; guess_chars.len()];
    let mut unmatched: HashMap<char, usize> = HashMap::new();

    for (i, (&g, &t)) in guess_chars.iter().zip(target_chars.iter()).enumerate() {
        if g == t {
            verdicts[i] = Verdict::Correct;
        } else {
            *unmatched.entry(t).or_insert(0) += 1;
        }
    }

    for (i, &g) in guess_chars.iter().enumerate() {
        if verdicts[i] == Verdict::Correct {
            continue;
        }
        if let Some(count) = unmatched.get_mut(&g) {
            if *count > 0 {
                verdicts[i] = Verdict::Almost;
                *count -= 1;
            }
        }
    }

    verdicts
}
