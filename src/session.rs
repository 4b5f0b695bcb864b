use crate::config::{GameConfig, Rules, CLASSIC_RULES};
use crate::dialog::Dialog;
use crate::dictionary::{Dictionary, DictionaryError, Entry};
use crate::grade::GuessRecord;
use crate::round::{GuessError, Round, Status};
use crate::score::{compute_game_stats, round_score, verdict_counts, RoundScore};
use crate::series::{session_summary, Totals};
use crate::ui;
use log::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Mode {
    Solo,
    Multi,
}

/// A remembered multiplayer setup, so "replay" can skip every prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiSetup {
    pub names: Vec<String>,
    pub rules: Rules,
}

enum MenuPhase {
    Main,
    Post,
}

struct PlayerBoard {
    name: String,
    round: Round,
    skip_notified: bool,
}

/// Owns one process lifetime of play: menu flow, rounds, series, and the
/// running totals that survive between them. All human interaction goes
/// through the dialog collaborator; all state lives here, never in globals.
pub struct GameSession<D: Dialog> {
    pub dialog: D,
    dictionary: Dictionary,
    pub config: GameConfig,
    rules: Rules,
    history: Vec<String>,
    pub solo_scores: Vec<RoundScore>,
    solo_name: Option<String>,
    pub cumulative: Totals,
    last_mode: Option<Mode>,
    last_multi_setup: Option<MultiSetup>,
}

impl<D: Dialog> GameSession<D> {
    pub fn new(dialog: D, dictionary: Dictionary, rules: Rules) -> Self {
        let mut config = GameConfig::default();
        config.apply(&rules);
        Self {
            dialog,
            dictionary,
            config,
            rules,
            history: Vec::new(),
            solo_scores: Vec::new(),
            solo_name: None,
            cumulative: Totals::default(),
            last_mode: None,
            last_multi_setup: None,
        }
    }

    /// The rules currently in effect, for persisting across runs.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Top-level flow: welcome, menus, and a reconsideration step on the
    /// way out.
    pub fn run(&mut self) -> Result<(), DictionaryError> {
        loop {
            if self.dialog.confirm(ui::welcome()) {
                self.menu_loop()?;
            } else {
                self.dialog.notify(ui::farewell());
            }
            if self.dialog.confirm(ui::exit_confirm()) {
                continue;
            }
            self.dialog.notify(ui::goodbye());
            return Ok(());
        }
    }

    fn menu_loop(&mut self) -> Result<(), DictionaryError> {
        let mut phase = MenuPhase::Main;
        loop {
            match phase {
                MenuPhase::Main => {
                    let Some(mode_input) = self.dialog.prompt(ui::main_menu(), "") else {
                        self.show_solo_summary_if_due();
                        return Ok(());
                    };
                    let mode_clean = mode_input.to_lowercase();
                    // prefix sniffing: "so", "solo", "SOLO" all land on solo
                    let mode = if mode_clean.contains("so") {
                        Mode::Solo
                    } else if mode_clean.contains("mu") {
                        Mode::Multi
                    } else if mode_clean.contains('q') {
                        self.show_solo_summary_if_due();
                        return Ok(());
                    } else {
                        Mode::Solo
                    };

                    let menu = ui::rules_menu(&mode.to_string(), &GameConfig::default());
                    let Some(rules_input) = self.dialog.prompt(&menu, "") else {
                        continue;
                    };
                    let custom = rules_input.to_lowercase().contains("cu");
                    info!("mode {mode}, custom rules: {custom}");

                    match mode {
                        Mode::Solo => {
                            let name = self.dialog.prompt(ui::solo_name_prompt(), "");
                            self.solo_name = name
                                .map(|n| n.trim().to_string())
                                .filter(|n| !n.is_empty());

                            if custom {
                                let Some(line) =
                                    self.dialog.prompt(ui::custom_rules_prompt(), "")
                                else {
                                    continue;
                                };
                                self.rules = self.rules.parse_line(&line);
                            } else {
                                self.rules = CLASSIC_RULES;
                            }
                            self.config.apply(&self.rules);
                            self.last_mode = Some(Mode::Solo);
                            for _ in 0..self.rules.rounds {
                                self.play_solo_round()?;
                            }
                        }
                        Mode::Multi => {
                            self.last_mode = Some(Mode::Multi);
                            let preset = (!custom).then_some(CLASSIC_RULES);
                            self.play_multi(None, preset)?;
                        }
                    }
                    phase = MenuPhase::Post;
                }
                MenuPhase::Post => {
                    let Some(post_input) = self.dialog.prompt(ui::post_menu(), "") else {
                        self.show_solo_summary_if_due();
                        return Ok(());
                    };
                    let clean = post_input.to_lowercase();

                    if clean.contains("re") {
                        self.replay()?;
                    } else if clean.contains("cu") {
                        match self.last_mode {
                            Some(Mode::Multi) => self.play_multi(None, None)?,
                            _ => {
                                let Some(line) =
                                    self.dialog.prompt(ui::custom_rules_prompt(), "")
                                else {
                                    continue;
                                };
                                self.rules = self.rules.parse_line(&line);
                                self.config.apply(&self.rules);
                                for _ in 0..self.rules.rounds {
                                    self.play_solo_round()?;
                                }
                            }
                        }
                    } else if clean.contains("mo") {
                        phase = MenuPhase::Main;
                    } else if clean.contains('q') {
                        self.show_solo_summary_if_due();
                        return Ok(());
                    } else {
                        // anything else means "again"
                        self.replay()?;
                    }
                }
            }
        }
    }

    fn replay(&mut self) -> Result<(), DictionaryError> {
        match self.last_mode {
            Some(Mode::Multi) => {
                let setup = self.last_multi_setup.clone();
                self.play_multi(setup, None)
            }
            _ => {
                self.config.apply(&self.rules);
                for _ in 0..self.rules.rounds {
                    self.play_solo_round()?;
                }
                Ok(())
            }
        }
    }

    fn show_solo_summary_if_due(&mut self) {
        if self.last_mode != Some(Mode::Solo) {
            return;
        }
        let totals: Vec<i32> = self.solo_scores.iter().map(|s| s.total).collect();
        if let Some(summary) = session_summary(&totals) {
            self.dialog.notify(&ui::session_summary_block(&summary));
        }
    }

    fn pick_target(&mut self) -> Result<Entry, DictionaryError> {
        let (entry, effective_len) = self.dictionary.pick(self.config.word_length, &self.history)?;
        // the selector resolves the playable length; everyone downstream
        // trusts the config
        self.config.word_length = effective_len;
        if !self.history.contains(&entry.word) {
            self.history.push(entry.word.clone());
        }
        Ok(entry)
    }

    /// Prompt until a valid guess lands or the player confirms quitting.
    /// Validation failures loop with the same board context; a cancelled
    /// prompt needs an explicit confirmation before it becomes a quit.
    fn run_turn(&mut self, round: &mut Round, name: Option<&str>) -> Option<GuessRecord> {
        loop {
            let board = ui::board(round, &self.config);
            let mut line = self.dialog.prompt(&ui::guess_prompt(name, &board), "");
            let outcome = loop {
                match line.take() {
                    None => break None,
                    Some(raw) => match round.submit(&raw, &self.dictionary, &self.config) {
                        Ok(record) => break Some(record),
                        Err(GuessError::WrongLength { needed, .. }) => {
                            line = self.dialog.prompt(&ui::wrong_length(needed, &board), "");
                        }
                        Err(GuessError::UnknownWord(_)) => {
                            line = self.dialog.prompt(&ui::unknown_word(&board), "");
                        }
                        Err(GuessError::RoundOver) => break None,
                    },
                }
            };
            match outcome {
                Some(record) => return Some(record),
                None => {
                    if self.dialog.confirm(ui::quit_confirm()) {
                        continue; // changed their mind, same turn again
                    }
                    round.quit();
                    return None;
                }
            }
        }
    }

    fn play_solo_round(&mut self) -> Result<(), DictionaryError> {
        self.dialog.notify(&ui::rules_info(&self.config));
        let target = self.pick_target()?;
        let mut round = Round::new(target, &self.config);
        debug!("solo round started");

        while !round.is_over() {
            let name = self.solo_name.clone();
            self.run_turn(&mut round, name.as_deref());
        }

        let score = round_score(&round, &self.config);
        let mut text = format!(
            "{}\n\n{}\n\n{}",
            ui::outcome_line(&round, &self.config),
            ui::reveal(&round.target),
            ui::score_summary(&score),
        );
        self.solo_scores.push(score);
        if self.solo_scores.len() > 1 {
            let all: i32 = self.solo_scores.iter().map(|s| s.total).sum();
            text.push_str(&format!("\n\nAll games (solo):  {all} points"));
        }
        self.dialog.notify(&text);
        Ok(())
    }

    /// One multiplayer series: a roster of players, `rules.rounds` games,
    /// round-robin turns inside each game, aggregation at every seam.
    fn play_multi(
        &mut self,
        setup: Option<MultiSetup>,
        preset_rules: Option<Rules>,
    ) -> Result<(), DictionaryError> {
        let (names, rules) = match setup {
            Some(setup) => (setup.names, setup.rules),
            None => {
                let Some(names) = self.prompt_roster() else {
                    return Ok(());
                };
                let rules = match preset_rules {
                    Some(rules) => rules,
                    None => self.prompt_multi_rules(),
                };
                (names, rules)
            }
        };

        self.rules = rules;
        self.config.apply(&self.rules);
        self.last_multi_setup = Some(MultiSetup {
            names: names.clone(),
            rules,
        });

        self.dialog.notify(&ui::rules_info(&self.config));

        let had_prior = !self.cumulative.is_empty();
        let mut series = Totals::default();

        for game_index in 1..=rules.rounds {
            let mut players = Vec::with_capacity(names.len());
            for name in &names {
                let target = self.pick_target()?;
                players.push(PlayerBoard {
                    name: name.clone(),
                    round: Round::new(target, &self.config),
                    skip_notified: false,
                });
            }
            info!("game {game_index} of {}: {} players", rules.rounds, players.len());

            let mut cycle = 0;
            while players.iter().any(|p| !p.round.is_over()) {
                cycle += 1;
                for player in &mut players {
                    if player.round.is_over() {
                        if !player.skip_notified {
                            self.notify_skip(player, had_prior);
                            player.skip_notified = true;
                        }
                        continue;
                    }
                    self.take_turn(player, game_index, had_prior);
                }

                let entries: Vec<(String, RoundScore)> = players
                    .iter()
                    .map(|p| (p.name.clone(), round_score(&p.round, &self.config)))
                    .collect();
                let stats = compute_game_stats(&entries);
                self.dialog
                    .notify(&ui::interim_standings(game_index, cycle, &stats.standings));
            }

            let answers: Vec<(String, Entry)> = players
                .iter()
                .map(|p| (p.name.clone(), p.round.target.clone()))
                .collect();
            self.dialog.notify(&ui::answers_block(game_index, &answers));

            for player in &players {
                series.fold(&player.name, &round_score(&player.round, &self.config));
            }
        }

        let standings = series.standings();
        if let Some(highlights) = series.highlights() {
            self.dialog
                .notify(&ui::series_summary(rules.rounds, &standings, &highlights));
        }

        self.cumulative.absorb(&series);
        if had_prior {
            let standings = self.cumulative.standings();
            if let Some(highlights) = self.cumulative.highlights() {
                self.dialog
                    .notify(&ui::cumulative_summary(&standings, &highlights));
            }
        }
        Ok(())
    }

    /// Ask for a player count ("3" or "3 yes") and, when requested, names.
    /// `None` backs out to the menu.
    fn prompt_roster(&mut self) -> Option<Vec<String>> {
        let line = self.dialog.prompt(ui::player_count_prompt(), "")?;
        let Some((count, wants_names)) = parse_roster_request(&line) else {
            self.dialog.notify(ui::need_more_players());
            return None;
        };

        let mut names = None;
        if wants_names {
            if let Some(line) = self.dialog.prompt(&ui::player_names_prompt(count), "") {
                names = Some(resolve_names(&line, count));
            }
        }
        Some(names.unwrap_or_else(|| default_names(count)))
    }

    /// Blank or cancelled input keeps the classic setup; anything else is
    /// parsed the forgiving way.
    fn prompt_multi_rules(&mut self) -> Rules {
        let prompt = format!(
            "{}\n(leave blank to keep classic multiplayer settings)",
            ui::custom_rules_prompt()
        );
        match self.dialog.prompt(&prompt, "") {
            Some(line) if !line.trim().is_empty() => self.rules.parse_line(&line),
            _ => Rules {
                rounds: self.rules.rounds,
                ..CLASSIC_RULES
            },
        }
    }

    fn take_turn(&mut self, player: &mut PlayerBoard, game_index: usize, had_prior: bool) {
        let Some(record) = self.run_turn(&mut player.round, Some(&player.name)) else {
            return;
        };

        let score = round_score(&player.round, &self.config);
        let prior = self.cumulative.get(&player.name);
        let prior_total = prior.map(|p| p.total).unwrap_or(0);
        let prior_bonus = prior.map(|p| p.bonus).unwrap_or(0);

        let report = ui::TurnReport {
            name: &player.name,
            game_index: Some(game_index),
            attempt: player.round.guesses_used(),
            record: &record,
            points: score.per_guess.last().copied().unwrap_or(0),
            counts: verdict_counts(&record.verdicts),
            bonus_this_turn: if player.round.status == Status::Won {
                score.bonus
            } else {
                0
            },
            locked_bonus: score.bonus,
            game_total: score.total,
            all_games_total: had_prior.then(|| prior_total + score.total),
            all_games_bonus: if had_prior { prior_bonus + score.bonus } else { 0 },
        };
        self.dialog.notify(&ui::turn_report(&report, &self.config));
    }

    /// One notice the first time a finished player's turn comes around
    /// again; the flag on the player record keeps it from repeating.
    fn notify_skip(&mut self, player: &PlayerBoard, had_prior: bool) {
        let score = round_score(&player.round, &self.config);
        let prior = self.cumulative.get(&player.name);
        let prior_total = prior.map(|p| p.total).unwrap_or(0);
        let prior_bonus = prior.map(|p| p.bonus).unwrap_or(0);
        let prior_penalty = prior.map(|p| p.penalty).unwrap_or(0);

        let text = match player.round.status {
            Status::Won => ui::solved_skip_notice(
                &player.name,
                score.total,
                score.bonus,
                had_prior.then(|| (prior_total + score.total, prior_bonus + score.bonus)),
            ),
            Status::Quit => ui::quit_skip_notice(
                &player.name,
                score.total,
                score.penalty,
                had_prior.then(|| (prior_total + score.total, prior_penalty + score.penalty)),
            ),
            _ => ui::exhausted_skip_notice(
                &player.name,
                score.total,
                had_prior.then(|| prior_total + score.total),
            ),
        };
        self.dialog.notify(&text);
    }
}

/// "3 yes" -> (3, true); "4" -> (4, false). `None` for anything under two
/// players or without a leading count.
fn parse_roster_request(line: &str) -> Option<(usize, bool)> {
    let clean = line.trim().to_lowercase();
    let digits: String = clean.chars().take_while(|c| c.is_ascii_digit()).collect();
    let count: usize = digits.parse().ok()?;
    if count < 2 {
        return None;
    }
    let wants_names = clean
        .split_whitespace()
        .any(|token| matches!(token, "yes" | "y" | "name" | "names"));
    Some((count, wants_names))
}

fn default_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player {i}")).collect()
}

/// Comma or space separated; short lists are padded with default names,
/// long ones clamped.
fn resolve_names(line: &str, count: usize) -> Vec<String> {
    let mut names: Vec<String> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    while names.len() < count {
        names.push(format!("Player {}", names.len() + 1));
    }
    names.truncate(count);
    names
}
