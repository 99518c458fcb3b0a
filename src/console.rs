//! Terminal plumbing: bounded integer prompts, the welcome banner and the
//! score line.

use std::cell::RefCell;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::rc::Rc;

use itertools::Itertools;

use crate::player::Player;

pub const BANNER_WIDTH: usize = 70;

/// Source of answers for the questions asked during setup and by human players.
pub trait Prompt {
    /// Blocks until an integer in `min..=max` is supplied. Invalid answers are
    /// retried here and never reach the caller.
    fn read_int(&mut self, prompt: &str, min: i64, max: Option<i64>) -> io::Result<i64>;

    /// Reads one trimmed line of free text.
    fn read_text(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompt shared by setup and every human player of a match.
pub type SharedPrompt = Rc<RefCell<dyn Prompt>>;

pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_shared(self) -> SharedPrompt
    where
        R: 'static,
        W: 'static,
    {
        Rc::new(RefCell::new(self))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsoleInput<R, W> {
    fn read_int(&mut self, prompt: &str, min: i64, max: Option<i64>) -> io::Result<i64> {
        loop {
            let answer = self.ask(prompt)?;
            let number = match answer.parse::<i64>() {
                Ok(number) => number,
                Err(_) => {
                    writeln!(self.writer, "You need to enter a number")?;
                    continue;
                }
            };

            if number < min || max.map_or(false, |max| number > max) {
                let upper = max.map_or_else(|| "unbounded".to_string(), |max| max.to_string());
                writeln!(
                    self.writer,
                    "Number is not within range: {} to {}",
                    min, upper
                )?;
                continue;
            }

            log::debug!("Accepted answer {} for prompt {:?}", number, prompt.trim());
            return Ok(number);
        }
    }

    fn read_text(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }
}

/// Rules text shown before the first turn.
pub fn welcome_banner(target: u32) -> String {
    let stars = "*".repeat(BANNER_WIDTH);
    let centered = [
        "The objective is to be the first to reach {target} points.",
        "On each turn, the player will roll a die.",
        "The die value will stored in a temporary score box.",
        "(If the die value is 1, the player earns no points,",
        "and the turn goes to the next player.)",
        "A human player has an option to either roll again,",
        "or hold. If you hold, the score in the",
        "temporary box will be added to your total score.",
    ];
    let mottos = [
        " Good luck! ",
        " Remember ",
        " Fortune favors the brave... ",
        " but chance favors the smart! ",
    ];

    let mut lines = vec![
        stars.clone(),
        format!("{:^width$}", "Welcome to Pig Dice!", width = BANNER_WIDTH),
        stars,
    ];
    lines.extend(centered.iter().map(|line| {
        let line = line.replace("{target}", &target.to_string());
        format!("{:^width$}", line, width = BANNER_WIDTH)
    }));
    lines.extend(
        mottos
            .iter()
            .map(|line| format!("{:*^width$}", line, width = BANNER_WIDTH)),
    );
    lines.push(String::new());
    lines.push(format!(
        "{:^width$}",
        "I will now decide who starts",
        width = BANNER_WIDTH
    ));
    lines.join("\n")
}

/// "name: score" pairs in turn order, comma separated.
pub fn score_line(players: &[Player]) -> String {
    players.iter().map(|player| player.to_string()).join(", ")
}

/// Text padded with `*` to the banner width, e.g. for win announcements.
pub fn starred(text: &str) -> String {
    format!("{:*^width$}", text, width = BANNER_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleInput::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &ConsoleInput<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.writer().clone()).unwrap()
    }

    #[test]
    fn test_read_int_accepts_value_in_range() {
        let mut input = console("1\n");
        assert_eq!(input.read_int("Roll? ", 0, Some(1)).unwrap(), 1);
        assert_eq!(output(&input), "Roll? ");
    }

    #[test]
    fn test_read_int_retries_until_valid() {
        let mut input = console("abc\n7\n-1\n 0 \n");
        assert_eq!(input.read_int("Roll? ", 0, Some(1)).unwrap(), 0);

        let text = output(&input);
        assert_eq!(text.matches("Roll? ").count(), 4);
        assert!(text.contains("You need to enter a number"));
        assert_eq!(text.matches("Number is not within range: 0 to 1").count(), 2);
    }

    #[test]
    fn test_read_int_without_upper_bound() {
        let mut input = console("-3\n12\n");
        assert_eq!(input.read_int("How many? ", 0, None).unwrap(), 12);
        assert!(output(&input).contains("Number is not within range: 0 to unbounded"));
    }

    #[test]
    fn test_read_int_reports_closed_input() {
        let mut input = console("x\n");
        let err = input.read_int("Roll? ", 0, Some(1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_read_text_trims() {
        let mut input = console("  Ada \n");
        assert_eq!(input.read_text("Name: ").unwrap(), "Ada");
    }

    #[test]
    fn test_banner_mentions_target_and_is_centered() {
        let banner = welcome_banner(50);
        assert!(banner.contains("first to reach 50 points."));
        for line in banner.lines().filter(|line| !line.is_empty()) {
            assert_eq!(line.chars().count(), BANNER_WIDTH);
        }
    }

    #[test]
    fn test_score_line_joins_players() {
        use crate::players::ScriptedStrategy;

        let mut human = Player::new("Human", Box::new(ScriptedStrategy::default()));
        human.add_score(40);
        let cpu = Player::new("Ca", Box::new(ScriptedStrategy::default()));
        assert_eq!(score_line(&[human, cpu]), "Human: 40, Ca: 0");
    }

    #[test]
    fn test_starred_pads_to_width() {
        let line = starred(" Human has won ");
        assert_eq!(line.len(), BANNER_WIDTH);
        assert!(line.starts_with('*') && line.ends_with('*'));
        assert!(line.contains(" Human has won "));
    }
}
