use crate::score::RoundScore;
use itertools::Itertools;
use log::debug;

/// One player's accumulated results across the games of a series (or, for
/// the cumulative board, across every series this process has played).
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerTotals {
    pub name: String,
    pub total: i32,
    pub game_totals: Vec<i32>,
    pub best_guess: Option<i32>,
    pub worst_guess: Option<i32>,
    pub bonus: i32,
    pub penalty: i32,
}

impl PlayerTotals {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total: 0,
            game_totals: Vec::new(),
            best_guess: None,
            worst_guess: None,
            bonus: 0,
            penalty: 0,
        }
    }

    /// Average points per game.
    pub fn average(&self) -> f64 {
        self.game_totals.iter().sum::<i32>() as f64 / self.game_totals.len().max(1) as f64
    }

    /// Highest single-game total and its 1-based game index.
    pub fn best_game(&self) -> Option<(i32, usize)> {
        let mut best: Option<(i32, usize)> = None;
        for (i, &points) in self.game_totals.iter().enumerate() {
            match best {
                Some((held, _)) if points <= held => {}
                _ => best = Some((points, i + 1)),
            }
        }
        best
    }
}

/// A rendered standings row: total plus the bonus/penalty tags shown next
/// to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesStanding {
    pub name: String,
    pub total: i32,
    pub bonus: i32,
    pub penalty: i32,
}

/// The four highlight cards shown when a series (or the all-games board)
/// wraps up.
#[derive(Clone, Debug)]
pub struct SeriesHighlights {
    /// name, points, 1-based game index
    pub single_game: (String, i32, usize),
    pub top_average: (String, f64),
    pub best_guess: (String, i32),
    pub worst_guess: (String, i32),
}

/// Per-player totals keyed by display name, in order of first appearance so
/// tied standings stay deterministic.
#[derive(Clone, Debug, Default)]
pub struct Totals {
    players: Vec<PlayerTotals>,
}

impl Totals {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerTotals] {
        &self.players
    }

    pub fn get(&self, name: &str) -> Option<&PlayerTotals> {
        self.players.iter().find(|p| p.name == name)
    }

    fn entry(&mut self, name: &str) -> &mut PlayerTotals {
        let idx = match self.players.iter().position(|p| p.name == name) {
            Some(idx) => idx,
            None => {
                self.players.push(PlayerTotals::new(name));
                self.players.len() - 1
            }
        };
        &mut self.players[idx]
    }

    /// Fold one finalized round into a player's running totals.
    pub fn fold(&mut self, name: &str, score: &RoundScore) {
        let entry = self.entry(name);
        entry.total += score.total;
        entry.game_totals.push(score.total);
        entry.bonus += score.bonus;
        entry.penalty += score.penalty;
        for &points in &score.per_guess {
            entry.best_guess = Some(entry.best_guess.map_or(points, |b| b.max(points)));
            entry.worst_guess = Some(entry.worst_guess.map_or(points, |w| w.min(points)));
        }
        debug!("folded round for {name}: total now {}", entry.total);
    }

    /// Roll another totals table into this one (series into cumulative).
    pub fn absorb(&mut self, other: &Totals) {
        for player in &other.players {
            let entry = self.entry(&player.name);
            entry.total += player.total;
            entry.game_totals.extend_from_slice(&player.game_totals);
            entry.bonus += player.bonus;
            entry.penalty += player.penalty;
            if let Some(best) = player.best_guess {
                entry.best_guess = Some(entry.best_guess.map_or(best, |b| b.max(best)));
            }
            if let Some(worst) = player.worst_guess {
                entry.worst_guess = Some(entry.worst_guess.map_or(worst, |w| w.min(worst)));
            }
        }
    }

    /// Leaderboard rows, highest total first; ties keep first-appearance
    /// order.
    pub fn standings(&self) -> Vec<SeriesStanding> {
        self.players
            .iter()
            .map(|p| SeriesStanding {
                name: p.name.clone(),
                total: p.total,
                bonus: p.bonus,
                penalty: p.penalty,
            })
            .sorted_by(|a, b| b.total.cmp(&a.total))
            .collect()
    }

    pub fn highlights(&self) -> Option<SeriesHighlights> {
        let first = self.players.first()?;

        let mut single_game = (first.name.clone(), i32::MIN, 0);
        let mut top_average = (first.name.clone(), f64::NEG_INFINITY);
        let mut best_guess = (first.name.clone(), i32::MIN);
        let mut worst_guess = (first.name.clone(), i32::MAX);

        for player in &self.players {
            if let Some((points, game_at)) = player.best_game() {
                if points > single_game.1 {
                    single_game = (player.name.clone(), points, game_at);
                }
            }
            if player.average() > top_average.1 {
                top_average = (player.name.clone(), player.average());
            }
            let best = player.best_guess.unwrap_or(0);
            if best > best_guess.1 {
                best_guess = (player.name.clone(), best);
            }
            let worst = player.worst_guess.unwrap_or(0);
            if worst < worst_guess.1 {
                worst_guess = (player.name.clone(), worst);
            }
        }

        Some(SeriesHighlights {
            single_game: (single_game.0, single_game.1, single_game.2),
            top_average,
            best_guess,
            worst_guess,
        })
    }
}

/// Rollup shown after a solo session of two or more rounds.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub rounds: usize,
    pub total: i32,
    pub average: f64,
    pub best: i32,
    pub best_at: usize,
    pub worst: i32,
    pub worst_at: usize,
}

/// Summarize a solo session's round totals. A single round has nothing to
/// compare against, so this only kicks in at two.
pub fn session_summary(totals: &[i32]) -> Option<SessionSummary> {
    if totals.len() < 2 {
        return None;
    }

    let mut best = totals[0];
    let mut best_at = 1;
    let mut worst = totals[0];
    let mut worst_at = 1;
    for (i, &points) in totals.iter().enumerate().skip(1) {
        if points > best {
            best = points;
            best_at = i + 1;
        }
        if points < worst {
            worst = points;
            worst_at = i + 1;
        }
    }

    Some(SessionSummary {
        rounds: totals.len(),
        total: totals.iter().sum(),
        average: totals.iter().sum::<i32>() as f64 / totals.len() as f64,
        best,
        best_at,
        worst,
        worst_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::RoundScore;

    fn score(per_guess: Vec<i32>, bonus: i32, penalty: i32) -> RoundScore {
        let guess_points: i32 = per_guess.iter().sum();
        RoundScore {
            total: guess_points + bonus - penalty,
            per_guess,
            guess_points,
            bonus,
            penalty,
        }
    }

    #[test]
    fn fold_accumulates_per_player() {
        let mut totals = Totals::default();
        totals.fold("ana", &score(vec![2, 10], 40, 0));
        totals.fold("ana", &score(vec![-3, 4], 0, 20));

        let ana = totals.get("ana").unwrap();
        assert_eq!(ana.total, 52 - 19);
        assert_eq!(ana.game_totals, vec![52, -19]);
        assert_eq!(ana.best_guess, Some(10));
        assert_eq!(ana.worst_guess, Some(-3));
        assert_eq!(ana.bonus, 40);
        assert_eq!(ana.penalty, 20);
    }

    #[test]
    fn standings_keep_first_appearance_order_on_ties() {
        let mut totals = Totals::default();
        totals.fold("ana", &score(vec![5], 0, 0));
        totals.fold("ben", &score(vec![5], 0, 0));
        totals.fold("cal", &score(vec![9], 0, 0));

        let standings = totals.standings();
        let order: Vec<&str> = standings.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(order, vec!["cal", "ana", "ben"]);
    }

    #[test]
    fn highlights_pick_leaders_across_players() {
        let mut totals = Totals::default();
        totals.fold("ana", &score(vec![2, 10], 40, 0)); // game total 52
        totals.fold("ana", &score(vec![1], 0, 0)); // game total 1
        totals.fold("ben", &score(vec![-4, 8], 0, 0)); // game total 4

        let highlights = totals.highlights().unwrap();
        assert_eq!(highlights.single_game, ("ana".to_string(), 52, 1));
        assert_eq!(highlights.best_guess, ("ana".to_string(), 10));
        assert_eq!(highlights.worst_guess, ("ben".to_string(), -4));
        assert_eq!(highlights.top_average.0, "ana");
    }

    #[test]
    fn highlights_need_at_least_one_player() {
        assert!(Totals::default().highlights().is_none());
    }

    #[test]
    fn absorb_merges_series_into_cumulative() {
        let mut cumulative = Totals::default();
        let mut first_series = Totals::default();
        first_series.fold("ana", &score(vec![3, 7], 0, 0));
        cumulative.absorb(&first_series);

        let mut second_series = Totals::default();
        second_series.fold("ana", &score(vec![-6, 2], 0, 10));
        second_series.fold("ben", &score(vec![4], 30, 0));
        cumulative.absorb(&second_series);

        let ana = cumulative.get("ana").unwrap();
        assert_eq!(ana.game_totals, vec![10, -14]);
        assert_eq!(ana.total, -4);
        assert_eq!(ana.best_guess, Some(7));
        assert_eq!(ana.worst_guess, Some(-6));
        assert_eq!(ana.penalty, 10);

        let ben = cumulative.get("ben").unwrap();
        assert_eq!(ben.total, 34);
        assert_eq!(ben.bonus, 30);
    }

    #[test]
    fn session_summary_needs_two_rounds() {
        assert_eq!(session_summary(&[]), None);
        assert_eq!(session_summary(&[42]), None);
    }

    #[test]
    fn session_summary_rollup() {
        let summary = session_summary(&[10, -5, 25]).unwrap();
        assert_eq!(summary.rounds, 3);
        assert_eq!(summary.total, 30);
        assert!((summary.average - 10.0).abs() < 1e-9);
        assert_eq!((summary.best, summary.best_at), (25, 3));
        assert_eq!((summary.worst, summary.worst_at), (-5, 2));
    }
}
