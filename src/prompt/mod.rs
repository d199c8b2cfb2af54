//! Interactive input for values not supplied on the command line.

use std::io::{self, BufRead, BufReader};
use std::str::FromStr;

use console::{style, Term};

use crate::config::validation::validate_resolution;
use crate::download::session::LectureRange;
use crate::error::{Error, Result};
use crate::output::print_error;

/// Number of times a malformed answer is re-asked before giving up.
const MAX_REASK: usize = 3;

/// Source of values the run needs but was not given up front.
pub trait Prompter: Send {
    /// Ask for the access token.
    fn access_token(&mut self) -> Result<String>;

    /// Ask for the id of the course to download.
    fn course_id(&mut self) -> Result<String>;

    /// Ask for the inclusive lecture range to download.
    fn lecture_range(&mut self) -> Result<(u32, u32)>;

    /// Ask for the video resolution label.
    fn resolution(&mut self) -> Result<String>;
}

/// Ask for a resolution until the label is well formed.
pub fn ask_resolution<P: Prompter + ?Sized>(prompter: &mut P) -> Result<String> {
    for _ in 0..MAX_REASK {
        let resolution = prompter.resolution()?;
        match validate_resolution(&resolution) {
            Ok(()) => return Ok(resolution),
            Err(e) => print_error(&e.to_string()),
        }
    }

    Err(Error::Prompt("Too many invalid resolutions".to_string()))
}

/// Ask for a lecture range until it starts at 1 or later and is not inverted.
pub fn ask_range<P: Prompter + ?Sized>(prompter: &mut P) -> Result<LectureRange> {
    for _ in 0..MAX_REASK {
        let (start, end) = prompter.lecture_range()?;
        match LectureRange::new(start, end) {
            Ok(range) => return Ok(range),
            Err(e) => print_error(&e.to_string()),
        }
    }

    Err(Error::Prompt("Too many invalid lecture ranges".to_string()))
}

/// Prompter writing questions to the terminal.
///
/// Answers come from the terminal when it is attended, otherwise from the
/// input reader (stdin by default), so redirected output still works.
pub struct ConsolePrompter {
    term: Term,
    input: Box<dyn BufRead + Send>,
    attended: bool,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        let term = Term::stdout();
        let attended = term.is_term();
        Self {
            term,
            input: Box::new(BufReader::new(io::stdin())),
            attended,
        }
    }

    /// Read answers from `input` instead of the terminal.
    pub fn with_input<R: BufRead + Send + 'static>(input: R) -> Self {
        Self {
            term: Term::stdout(),
            input: Box::new(input),
            attended: false,
        }
    }

    fn read_answer(&mut self) -> Result<String> {
        if self.attended {
            return self
                .term
                .read_line()
                .map_err(|e| Error::Prompt(e.to_string()));
        }

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::Prompt(e.to_string()))?;
        if read == 0 {
            return Err(Error::Prompt("Input closed".to_string()));
        }
        // Keep the transcript readable when the answer was not echoed
        let _ = self.term.write_line("");
        Ok(line)
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} {}", style("[?]").magenta().bold(), question))
            .map_err(|e| Error::Prompt(e.to_string()))?;

        let answer = self.read_answer()?;
        let answer = answer.trim().to_string();

        if answer.is_empty() {
            return Err(Error::Prompt(format!("No answer given to: {}", question)));
        }

        Ok(answer)
    }

    fn ask_parsed<T: FromStr>(&mut self, question: &str) -> Result<T> {
        for _ in 0..MAX_REASK {
            let answer = self.ask(question)?;
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    let _ = self
                        .term
                        .write_line(&format!("{} '{}' is not a valid number", style("[x]").red(), answer));
                }
            }
        }

        Err(Error::Prompt(format!("Too many invalid answers to: {}", question)))
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn access_token(&mut self) -> Result<String> {
        self.ask("Enter the udemy authentication token: ")
    }

    fn course_id(&mut self) -> Result<String> {
        self.ask("Enter the course Id which you want to download: ")
    }

    fn lecture_range(&mut self) -> Result<(u32, u32)> {
        let start = self.ask_parsed("Enter the lecture id from start download: ")?;
        let end = self.ask_parsed("Enter the lecture id till you want download: ")?;
        Ok((start, end))
    }

    fn resolution(&mut self) -> Result<String> {
        self.ask("Enter the video Resolution(360/480/720/1080): ")
    }
}

/// Prompter that replays canned answers, used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub tokens: std::collections::VecDeque<String>,
    pub course_ids: std::collections::VecDeque<String>,
    pub ranges: std::collections::VecDeque<(u32, u32)>,
    pub resolutions: std::collections::VecDeque<String>,
    pub resolution_prompts: usize,
    pub course_id_prompts: usize,
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn access_token(&mut self) -> Result<String> {
        self.tokens
            .pop_front()
            .ok_or_else(|| Error::Prompt("no scripted token".into()))
    }

    fn course_id(&mut self) -> Result<String> {
        self.course_id_prompts += 1;
        self.course_ids
            .pop_front()
            .ok_or_else(|| Error::Prompt("no scripted course id".into()))
    }

    fn lecture_range(&mut self) -> Result<(u32, u32)> {
        self.ranges
            .pop_front()
            .ok_or_else(|| Error::Prompt("no scripted range".into()))
    }

    fn resolution(&mut self) -> Result<String> {
        self.resolution_prompts += 1;
        self.resolutions
            .pop_front()
            .ok_or_else(|| Error::Prompt("no scripted resolution".into()))
    }
}
