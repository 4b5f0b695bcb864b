use crate::config::{GameConfig, PointValues};
use crate::grade::Verdict;
use crate::round::{Round, Status};
use itertools::Itertools;

/// Tally of verdicts in one guess, kept separate from the point total so the
/// presentation layer can show the breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub correct: usize,
    pub almost: usize,
    pub incorrect: usize,
}

pub fn verdict_counts(verdicts: &[Verdict]) -> VerdictCounts {
    let mut counts = VerdictCounts::default();
    for verdict in verdicts {
        match verdict {
            Verdict::Correct => counts.correct += 1,
            Verdict::Almost => counts.almost += 1,
            Verdict::Incorrect => counts.incorrect += 1,
        }
    }
    counts
}

/// Points for a single guess: each verdict is worth its configured value.
pub fn points_for(verdicts: &[Verdict], values: &PointValues) -> i32 {
    let counts = verdict_counts(verdicts);
    counts.correct as i32 * values.correct
        + counts.almost as i32 * values.almost
        + counts.incorrect as i32 * values.incorrect
}

/// Full score breakdown for one round, derived on demand from the round
/// state. The round itself stays authoritative; nothing here is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundScore {
    pub per_guess: Vec<i32>,
    pub guess_points: i32,
    pub bonus: i32,
    pub penalty: i32,
    pub total: i32,
}

/// Score a round under the given config.
///
/// The bonus is the value of unused attempts (`remaining * word_length *
/// correct`) and exists only once the round is terminal; a quit turns the
/// same quantity, frozen at `remaining_at_quit`, into a penalty. A lost
/// round has neither, since its remaining count is zero.
pub fn round_score(round: &Round, config: &GameConfig) -> RoundScore {
    let per_guess: Vec<i32> = round
        .attempts
        .iter()
        .map(|attempt| points_for(&attempt.verdicts, &config.points))
        .collect();
    let guess_points: i32 = per_guess.iter().sum();

    let stake = config.word_length as i32 * config.points.correct;
    let bonus = if round.is_over() {
        round.remaining as i32 * stake
    } else {
        0
    };
    let penalty = if round.status == Status::Quit {
        round.remaining_at_quit as i32 * stake
    } else {
        0
    };

    RoundScore {
        total: guess_points + bonus - penalty,
        per_guess,
        guess_points,
        bonus,
        penalty,
    }
}

/// One player's row in a per-game stats table.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    pub total: i32,
    pub bonus: i32,
    pub penalty: i32,
    pub average: f64,
    pub best: i32,
    pub best_at: usize,
    pub worst: i32,
    pub worst_at: usize,
}

/// Standings plus leader highlights for one game.
#[derive(Clone, Debug)]
pub struct GameStats {
    /// Sorted descending by total; equal totals keep their input order.
    pub standings: Vec<PlayerStats>,
    pub leader_total: Option<PlayerStats>,
    pub leader_avg: Option<PlayerStats>,
    pub leader_best: Option<PlayerStats>,
    pub leader_worst: Option<PlayerStats>,
}

/// Build per-player stats from already-derived round scores. Bonus and
/// penalty ride along in each total exactly as `round_score` produced them,
/// so in-progress players never preview a bonus they have not locked in.
pub fn compute_game_stats(entries: &[(String, RoundScore)]) -> GameStats {
    let rows: Vec<PlayerStats> = entries
        .iter()
        .map(|(name, score)| {
            let count = score.per_guess.len();
            let average = score.per_guess.iter().sum::<i32>() as f64 / count.max(1) as f64;

            let mut best = 0;
            let mut best_at = 0;
            let mut worst = 0;
            let mut worst_at = 0;
            for (i, &points) in score.per_guess.iter().enumerate() {
                if best_at == 0 || points > best {
                    best = points;
                    best_at = i + 1;
                }
                if worst_at == 0 || points < worst {
                    worst = points;
                    worst_at = i + 1;
                }
            }

            PlayerStats {
                name: name.clone(),
                total: score.total,
                bonus: score.bonus,
                penalty: score.penalty,
                average,
                best,
                best_at,
                worst,
                worst_at,
            }
        })
        .collect();

    let leader = |better: fn(&PlayerStats, &PlayerStats) -> bool| {
        let mut current: Option<&PlayerStats> = None;
        for row in &rows {
            match current {
                Some(held) if !better(row, held) => {}
                _ => current = Some(row),
            }
        }
        current.cloned()
    };

    // strict comparisons: the first player encountered keeps a tied lead
    let leader_total = leader(|a, b| a.total > b.total);
    let leader_avg = leader(|a, b| a.average > b.average);
    let leader_best = leader(|a, b| a.best > b.best);
    let leader_worst = leader(|a, b| a.worst < b.worst);

    let standings = rows
        .iter()
        .cloned()
        .sorted_by(|a, b| b.total.cmp(&a.total))
        .collect();

    GameStats {
        standings,
        leader_total,
        leader_avg,
        leader_best,
        leader_worst,
    }
}
