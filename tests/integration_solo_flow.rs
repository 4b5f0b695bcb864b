// Headless end-to-end solo sessions driven through the scripted dialog.
// One five-letter word in the dictionary keeps the word selection
// deterministic; the three-letter filler proves the length filter.

use verba::config::Rules;
use verba::dialog::ScriptedDialog;
use verba::dictionary::Dictionary;
use verba::session::GameSession;

fn single_word_dictionary() -> Dictionary {
    serde_json::from_str(
        r#"{
            "name": "test",
            "entries": [
                { "word": "apple", "definition": "a crisp fruit" },
                { "word": "oak", "definition": "a hardwood tree" }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn classic_solo_win_in_one_guess() {
    let dialog = ScriptedDialog::new()
        .answer_yes(1) // welcome
        .type_line("solo")
        .type_line("classic")
        .type_line("") // no display name
        .type_line("apple")
        .type_line("quit"); // post-game menu
    let mut session = GameSession::new(dialog, single_word_dictionary(), Rules::default());

    session.run().unwrap();

    let transcript = session.dialog.transcript();
    assert!(transcript.contains("Victory! Solved in 1 attempt(s)."));
    assert!(transcript.contains("The game word was:  APPLE"));
    // 5 correct letters (10) plus 5 unused guesses * 5 letters * 2
    assert!(transcript.contains("Bonus Points:   50"));
    assert!(transcript.contains("Total Points:   60"));

    assert_eq!(session.solo_scores.len(), 1);
    assert_eq!(session.solo_scores[0].total, 60);
}

#[test]
fn invalid_guesses_retry_without_consuming_attempts() {
    let dialog = ScriptedDialog::new()
        .answer_yes(1)
        .type_line("solo")
        .type_line("classic")
        .type_line("")
        .type_line("zzzzz") // right length, not a word
        .type_line("oak") // wrong length
        .type_line("apple")
        .type_line("quit");
    let mut session = GameSession::new(dialog, single_word_dictionary(), Rules::default());

    session.run().unwrap();

    // both rejections re-prompted instead of ending or charging a guess
    let prompts = session.dialog.prompt_log.join("\n");
    assert!(prompts.contains("not in this game's dictionary"));
    assert!(prompts.contains("not the right length"));
    assert!(session
        .dialog
        .transcript()
        .contains("Victory! Solved in 1 attempt(s)."));
}

#[test]
fn cancelled_guess_quits_after_confirmation_with_penalty() {
    let dialog = ScriptedDialog::new()
        .answer_yes(1) // welcome
        .answer_no(1) // no change of heart: the quit stands
        .type_line("solo")
        .type_line("classic")
        .type_line("")
        .cancel(); // cancel the first guess prompt
    let mut session = GameSession::new(dialog, single_word_dictionary(), Rules::default());

    session.run().unwrap();

    let transcript = session.dialog.transcript();
    assert!(transcript.contains("Exit noted."));
    // all six guesses unused at quit time: 6 * 5 * 2
    assert!(transcript.contains("Quit Penalty:   -60"));
    assert!(transcript.contains("Total Points:   -60"));
    assert_eq!(session.solo_scores[0].penalty, 60);
}

#[test]
fn reconsidered_cancel_keeps_the_round_alive() {
    let dialog = ScriptedDialog::new()
        .answer_yes(2) // welcome, then "changed my mind" on the quit confirm
        .type_line("solo")
        .type_line("classic")
        .type_line("")
        .cancel()
        .type_line("apple")
        .type_line("quit");
    let mut session = GameSession::new(dialog, single_word_dictionary(), Rules::default());

    session.run().unwrap();

    assert!(session.dialog.transcript().contains("Victory!"));
    assert_eq!(session.solo_scores[0].penalty, 0);
}

#[test]
fn two_round_session_shows_cumulative_line_and_summary() {
    let dialog = ScriptedDialog::new()
        .answer_yes(1)
        .type_line("solo")
        .type_line("custom")
        .type_line("") // anonymous
        .type_line("5, 6, 2") // two games this series
        .type_line("apple") // game 1 (the only five-letter word repeats
        .type_line("apple") // once the exclusion pool runs dry)
        .type_line("quit");
    let mut session = GameSession::new(dialog, single_word_dictionary(), Rules::default());

    session.run().unwrap();

    let transcript = session.dialog.transcript();
    assert!(transcript.contains("All games (solo):  120 points"));
    assert!(transcript.contains("SESSION SUMMARY -> 2 rounds"));
    assert!(transcript.contains("Total:         120 points"));
    assert!(transcript.contains("Average Game:  60.00 points"));
    assert_eq!(session.rules().rounds, 2);
}

#[test]
fn requested_length_is_clamped_to_the_dictionary() {
    // nothing has nine letters; the selector settles on five and the round
    // plays normally
    let dialog = ScriptedDialog::new()
        .answer_yes(1)
        .type_line("solo")
        .type_line("custom")
        .type_line("")
        .type_line("9 6 1")
        .type_line("apple")
        .type_line("quit");
    let mut session = GameSession::new(dialog, single_word_dictionary(), Rules::default());

    session.run().unwrap();

    assert_eq!(session.config.word_length, 5);
    assert!(session.dialog.transcript().contains("Victory!"));
}
