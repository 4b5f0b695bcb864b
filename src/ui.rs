//! Text blocks shown through the dialog layer. Everything here is a pure
//! function of the data model; no game logic, no I/O.

use crate::config::GameConfig;
use crate::dictionary::Entry;
use crate::grade::{GuessRecord, Verdict};
use crate::round::{Round, Status};
use crate::score::{PlayerStats, RoundScore, VerdictCounts};
use crate::series::{SeriesHighlights, SeriesStanding, SessionSummary};
use std::fmt::Write;

pub fn symbol(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "✅",
        Verdict::Almost => "🟨",
        Verdict::Incorrect => "⬜",
    }
}

pub fn welcome() -> &'static str {
    "Welcome! Would you like to play a word puzzle game?"
}

pub fn farewell() -> &'static str {
    "We would love for you to play again another time."
}

pub fn goodbye() -> &'static str {
    "So sad to see you leave... closing up."
}

pub fn quit_confirm() -> &'static str {
    "Are you sure? I bet you had a change of heart...\n(answering no ends this game)"
}

pub fn exit_confirm() -> &'static str {
    "One more before you go?"
}

pub fn need_more_players() -> &'static str {
    "Multiplayer requires at least 2 players!"
}

pub fn main_menu() -> &'static str {
    "Choose a game mode:\n\n    - solo\n    - multiplayer\n    - quit"
}

pub fn rules_menu(mode_label: &str, config: &GameConfig) -> String {
    format!(
        "Choose the rules for {} mode:\n\n    \
         - classic ({} letters, {} guesses, 1 game)\n    \
         - custom  (choose length, guesses, games)",
        mode_label.to_uppercase(),
        config.word_length,
        config.max_guesses
    )
}

pub fn post_menu() -> &'static str {
    "POST-GAME MENU\n\nEnter one of these options:\n\n    \
     - replay -> same mode and rules\n    \
     - custom -> same mode, new rules\n    \
     - mode   -> change game mode\n    \
     - quit"
}

pub fn rules_info(config: &GameConfig) -> String {
    format!(
        "Each player has {max} tries to guess the hidden {len}-letter word. \
         After each guess, the marks show how accurate each letter is:\n\n    \
         {c} (+{pc})  -> right letter in the right spot\n    \
         {a} (+{pa})  -> right letter in the wrong spot\n    \
         {i} ({pi})  -> letter not in the word\n\n\
         bonus        = remaining tries * word length ({len}) * correct points ({pc})\n\
         quit penalty = the same amount, charged instead of paid",
        max = config.max_guesses,
        len = config.word_length,
        c = symbol(Verdict::Correct),
        a = symbol(Verdict::Almost),
        i = symbol(Verdict::Incorrect),
        pc = config.points.correct,
        pa = config.points.almost,
        pi = config.points.incorrect,
    )
}

pub fn legend(config: &GameConfig) -> String {
    format!(
        "Legend:  correct = {} (+{})   almost = {} (+{})   incorrect = {} ({})",
        symbol(Verdict::Correct),
        config.points.correct,
        symbol(Verdict::Almost),
        config.points.almost,
        symbol(Verdict::Incorrect),
        config.points.incorrect,
    )
}

/// Render a round's attempts as stacked two-line blocks: spaced uppercase
/// letters above, the matching verdict marks below, then the legend once.
pub fn board(round: &Round, config: &GameConfig) -> String {
    let mut text = String::new();
    for (i, attempt) in round.attempts.iter().enumerate() {
        let letters = attempt
            .word
            .to_uppercase()
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("   ");
        let marks = attempt
            .verdicts
            .iter()
            .map(|v| symbol(*v))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(text, "{} of {} :   {}", i + 1, config.max_guesses, letters);
        let _ = writeln!(text, "            {marks}");
    }
    text.push_str(&legend(config));
    text
}

pub fn guess_prompt(name: Option<&str>, board: &str) -> String {
    match name {
        Some(name) => format!("{name} -> Guess a word:\n\n{board}"),
        None => format!("Guess a word.\n\n{board}"),
    }
}

pub fn wrong_length(needed: usize, board: &str) -> String {
    format!(
        "That entry is not the right length.\n\
         Enter exactly {needed} characters (anything but letters and digits is cleaned out).\n\n{board}"
    )
}

pub fn unknown_word(board: &str) -> String {
    format!(
        "Right length, but that word is not in this game's dictionary.\n\
         Try another word.\n\n{board}"
    )
}

pub fn custom_rules_prompt() -> &'static str {
    "Enter three values (word length, guesses, games)\n    Example:  5, 6, 3   or   5 6 3"
}

pub fn solo_name_prompt() -> &'static str {
    "Optional: enter a player name if desired (or leave blank)"
}

pub fn player_count_prompt() -> &'static str {
    "How many players? (2 - 6 recommended)\n\n\
     Add 'yes' after the number to pick custom names in the next step.\n    \
     Example:  3 yes"
}

pub fn player_names_prompt(expected: usize) -> String {
    format!(
        "Enter {expected} names (comma or space separated). Numbers are OK.\n    \
         Example:  Rose, Team7, Kai"
    )
}

pub fn outcome_line(round: &Round, config: &GameConfig) -> String {
    match round.status {
        Status::Won => format!(
            "Victory! Solved in {} attempt(s).",
            round.guesses_used()
        ),
        Status::Lost => format!("So close! All {} attempts were used.", config.max_guesses),
        _ => "Exit noted.".to_string(),
    }
}

pub fn reveal(entry: &Entry) -> String {
    format!(
        "The game word was:  {}\nDefinition:  {}",
        entry.word.to_uppercase(),
        entry.definition
    )
}

pub fn score_summary(score: &RoundScore) -> String {
    let mut text = format!("Score Summary:\n    Guess Points:   {}", score.guess_points);
    if score.bonus > 0 {
        let _ = write!(text, "\n    Bonus Points:   {}", score.bonus);
    }
    if score.penalty > 0 {
        let _ = write!(text, "\n    Quit Penalty:   -{}", score.penalty);
    }
    let _ = write!(text, "\n    Total Points:   {}", score.total);
    text
}

/// Everything the per-turn explanation needs, precomputed by the session.
pub struct TurnReport<'a> {
    pub name: &'a str,
    pub game_index: Option<usize>,
    pub attempt: usize,
    pub record: &'a GuessRecord,
    pub points: i32,
    pub counts: VerdictCounts,
    pub bonus_this_turn: i32,
    pub locked_bonus: i32,
    pub game_total: i32,
    pub all_games_total: Option<i32>,
    pub all_games_bonus: i32,
}

pub fn turn_report(report: &TurnReport, config: &GameConfig) -> String {
    let game_prefix = report
        .game_index
        .map(|n| format!("Game {n} -> "))
        .unwrap_or_default();
    let marks = report
        .record
        .verdicts
        .iter()
        .map(|v| symbol(*v))
        .collect::<Vec<_>>()
        .join(" ");

    let mut text = format!(
        "{game_prefix}{} -> Attempt {} of {}\n\n\
         Guess:  {} -> {marks}\n\nScore:  {:+} pts",
        report.name,
        report.attempt,
        config.max_guesses,
        report.record.word.to_uppercase(),
        report.points,
    );
    if report.bonus_this_turn > 0 {
        let _ = write!(text, "\nBonus:  +{} pts", report.bonus_this_turn);
    }
    let _ = write!(
        text,
        "\n    ({}: {} x {},  {}: {} x {},  {}: {} x {})",
        symbol(Verdict::Correct),
        report.counts.correct,
        config.points.correct,
        symbol(Verdict::Almost),
        report.counts.almost,
        config.points.almost,
        symbol(Verdict::Incorrect),
        report.counts.incorrect,
        config.points.incorrect,
    );
    let _ = write!(text, "\n\nTotal (this game):  {} pts", report.game_total);
    if report.locked_bonus > 0 {
        let _ = write!(text, " (incl. {} bonus)", report.locked_bonus);
    }
    if let Some(all) = report.all_games_total {
        let _ = write!(text, "\nTotal (all games):  {all} pts");
        if report.all_games_bonus > 0 {
            let _ = write!(text, " (incl. {} bonus)", report.all_games_bonus);
        }
    }
    text
}

pub fn solved_skip_notice(
    name: &str,
    total: i32,
    locked_bonus: i32,
    all_games: Option<(i32, i32)>,
) -> String {
    let mut text = format!(
        "{name} solved theirs! -> skipping remaining guesses...\n\nThis game:  {total} points"
    );
    if locked_bonus > 0 {
        let _ = write!(text, " (incl. {locked_bonus} bonus)");
    }
    if let Some((all_total, all_penalty_or_bonus)) = all_games {
        let _ = write!(text, "\nAll games:  {all_total} points");
        if all_penalty_or_bonus > 0 {
            let _ = write!(text, " (incl. {all_penalty_or_bonus} bonus)");
        }
    }
    text
}

pub fn quit_skip_notice(
    name: &str,
    total: i32,
    penalty: i32,
    all_games: Option<(i32, i32)>,
) -> String {
    let mut text = format!(
        "{name} quit this game -> skipping remaining guesses...\n\n\
         This game:  {total} points (-{penalty} penalty)"
    );
    if let Some((all_total, all_penalty)) = all_games {
        let _ = write!(text, "\nAll games:  {all_total} points");
        if all_penalty > 0 {
            let _ = write!(text, " (-{all_penalty} penalty)");
        }
    }
    text
}

pub fn exhausted_skip_notice(name: &str, total: i32, all_games: Option<i32>) -> String {
    let mut text = format!(
        "{name} is out of guesses -> skipping remaining turns...\n\nThis game:  {total} points"
    );
    if let Some(all_total) = all_games {
        let _ = write!(text, "\nAll games:  {all_total} points");
    }
    text
}

fn tags(bonus: i32, penalty: i32) -> String {
    let mut parts = Vec::new();
    if bonus > 0 {
        parts.push(format!("incl. {bonus} bonus"));
    }
    if penalty > 0 {
        parts.push(format!("-{penalty} penalty"));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("   ({})", parts.join(" ; "))
    }
}

pub fn interim_standings(game_index: usize, cycle: usize, rows: &[PlayerStats]) -> String {
    let mut text = format!("STANDINGS -> GAME {game_index} -- Guess {cycle}\n\n");
    for (pos, row) in rows.iter().enumerate() {
        let _ = writeln!(
            text,
            "    {}.  {}  --  {} pts{}",
            pos + 1,
            row.name,
            row.total,
            tags(row.bonus, row.penalty)
        );
    }
    text.trim_end().to_string()
}

pub fn answers_block(game_index: usize, players: &[(String, Entry)]) -> String {
    let mut text = format!("GAME {game_index} -> Answers + Definitions\n");
    for (name, entry) in players {
        let _ = write!(
            text,
            "\n    {}  ->  {}  --  {}",
            name,
            entry.word.to_uppercase(),
            entry.definition
        );
    }
    text
}

fn leaderboard_lines(text: &mut String, standings: &[SeriesStanding]) {
    for (pos, row) in standings.iter().enumerate() {
        let _ = writeln!(
            text,
            "    {}.  {}  --  {} points{}",
            pos + 1,
            row.name,
            row.total,
            tags(row.bonus, row.penalty)
        );
    }
}

fn highlight_lines(text: &mut String, highlights: &SeriesHighlights) {
    let (name, points, game_at) = &highlights.single_game;
    let _ = writeln!(
        text,
        "Best Game:        {name}  ({points} points in Game {game_at})"
    );
    let _ = writeln!(
        text,
        "Average Game:     {}  ({:.2} points)",
        highlights.top_average.0, highlights.top_average.1
    );
    let _ = writeln!(
        text,
        "Best Attempt:     {}  ({} points)",
        highlights.best_guess.0, highlights.best_guess.1
    );
    let _ = write!(
        text,
        "Weakest Attempt:  {}  ({} points)",
        highlights.worst_guess.0, highlights.worst_guess.1
    );
}

pub fn series_summary(
    rounds: usize,
    standings: &[SeriesStanding],
    highlights: &SeriesHighlights,
) -> String {
    let mut text = format!("SERIES COMPLETE - {rounds} game(s)\n\nLeaderboard (this series):\n");
    leaderboard_lines(&mut text, standings);
    text.push('\n');
    highlight_lines(&mut text, highlights);
    text
}

pub fn cumulative_summary(standings: &[SeriesStanding], highlights: &SeriesHighlights) -> String {
    let mut text = String::from("ALL GAMES -> Cumulative Leaderboard:\n\n");
    leaderboard_lines(&mut text, standings);
    text.push('\n');
    highlight_lines(&mut text, highlights);
    text
}

pub fn session_summary_block(summary: &SessionSummary) -> String {
    format!(
        "SESSION SUMMARY -> {} rounds\n\n    \
         Total:         {} points\n    \
         Average Game:  {:.2} points\n    \
         Best Game:     {} points  (Game {})\n    \
         Weakest Game:  {} points  (Game {})",
        summary.rounds,
        summary.total,
        summary.average,
        summary.best,
        summary.best_at,
        summary.worst,
        summary.worst_at,
    )
}
