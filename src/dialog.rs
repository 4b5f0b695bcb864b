use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// How the game talks to a human: a yes/no question, a line of text, or a
/// plain message. Implementations may block for as long as they like; the
/// game has nothing to do while it waits. A `None` from `prompt` is the
/// cancellation signal, distinct from any typed answer.
pub trait Dialog {
    fn confirm(&mut self, message: &str) -> bool;
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
    fn notify(&mut self, message: &str);
}

/// Blocking stdin/stdout implementation. Cancellation is end-of-input or a
/// lone `:q` on the line.
pub struct ConsoleDialog<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl ConsoleDialog<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self {
            input: io::BufReader::new(io::stdin()),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> ConsoleDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None, // end of input counts as cancel
            Ok(_) => {
                let line = line.trim().to_string();
                if line == ":q" {
                    None
                } else {
                    Some(line)
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Dialog for ConsoleDialog<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        let _ = writeln!(self.output, "\n{message}");
        let _ = write!(self.output, "[y/n] > ");
        let _ = self.output.flush();
        match self.read_line() {
            Some(line) => {
                let answer = line.to_lowercase();
                answer.starts_with('y') || answer == "ok"
            }
            None => false,
        }
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let _ = writeln!(self.output, "\n{message}");
        if default.is_empty() {
            let _ = write!(self.output, "> ");
        } else {
            let _ = write!(self.output, "[{default}] > ");
        }
        let _ = self.output.flush();
        let line = self.read_line()?;
        if line.is_empty() && !default.is_empty() {
            Some(default.to_string())
        } else {
            Some(line)
        }
    }

    fn notify(&mut self, message: &str) {
        let _ = writeln!(self.output, "\n{message}");
        let _ = self.output.flush();
    }
}

/// Scripted dialog for tests: answers are popped from queues, every notice
/// is recorded. An exhausted script cancels, which drives the game toward
/// its quit path instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedDialog {
    confirms: VecDeque<bool>,
    prompts: VecDeque<Option<String>>,
    pub notices: Vec<String>,
    pub prompt_log: Vec<String>,
}

impl ScriptedDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_yes(mut self, times: usize) -> Self {
        self.confirms.extend(std::iter::repeat(true).take(times));
        self
    }

    pub fn answer_no(mut self, times: usize) -> Self {
        self.confirms.extend(std::iter::repeat(false).take(times));
        self
    }

    pub fn type_line(mut self, line: &str) -> Self {
        self.prompts.push_back(Some(line.to_string()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.prompts.push_back(None);
        self
    }

    /// All notices joined, for substring assertions.
    pub fn transcript(&self) -> String {
        self.notices.join("\n")
    }
}

impl Dialog for ScriptedDialog {
    fn confirm(&mut self, _message: &str) -> bool {
        self.confirms.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.prompt_log.push(message.to_string());
        match self.prompts.pop_front() {
            Some(Some(line)) if line.is_empty() && !default.is_empty() => {
                Some(default.to_string())
            }
            Some(answer) => answer,
            None => None,
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_confirm_accepts_yes_variants() {
        for (typed, expected) in [
            ("y\n", true),
            ("Yes\n", true),
            ("ok\n", true),
            ("n\n", false),
            ("no\n", false),
            ("\n", false),
        ] {
            let mut out = Vec::new();
            let mut dialog = ConsoleDialog::new(typed.as_bytes(), &mut out);
            assert_eq!(dialog.confirm("continue?"), expected, "input {typed:?}");
        }
    }

    #[test]
    fn console_prompt_reads_a_line() {
        let mut out = Vec::new();
        let mut dialog = ConsoleDialog::new("  apple  \n".as_bytes(), &mut out);
        assert_eq!(dialog.prompt("guess", ""), Some("apple".to_string()));
    }

    #[test]
    fn console_prompt_empty_line_takes_the_default() {
        let mut out = Vec::new();
        let mut dialog = ConsoleDialog::new("\n".as_bytes(), &mut out);
        assert_eq!(dialog.prompt("rules", "5 6 1"), Some("5 6 1".to_string()));
    }

    #[test]
    fn console_prompt_cancels_on_eof_and_quit_token() {
        let mut out = Vec::new();
        let mut dialog = ConsoleDialog::new("".as_bytes(), &mut out);
        assert_eq!(dialog.prompt("guess", ""), None);

        let mut out = Vec::new();
        let mut dialog = ConsoleDialog::new(":q\n".as_bytes(), &mut out);
        assert_eq!(dialog.prompt("guess", ""), None);
    }

    #[test]
    fn console_notify_writes_the_message() {
        let mut out = Vec::new();
        {
            let mut dialog = ConsoleDialog::new("".as_bytes(), &mut out);
            dialog.notify("hello there");
        }
        assert!(String::from_utf8(out).unwrap().contains("hello there"));
    }

    #[test]
    fn scripted_dialog_replays_and_records() {
        let mut dialog = ScriptedDialog::new()
            .answer_yes(1)
            .type_line("apple")
            .cancel();

        assert!(dialog.confirm("play?"));
        assert!(!dialog.confirm("exhausted?"));
        assert_eq!(dialog.prompt("guess", ""), Some("apple".to_string()));
        assert_eq!(dialog.prompt("guess", ""), None);
        assert_eq!(dialog.prompt("guess", ""), None);

        dialog.notify("one");
        dialog.notify("two");
        assert_eq!(dialog.transcript(), "one\ntwo");
    }
}
