//! Live prompt asking questions on the terminal.

use std::io::{self, BufRead, Write};

use crate::ports::{PortError, Prompt};

/// Asks on stderr and reads the answer from stdin.
pub struct LivePrompt;

impl Prompt for LivePrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PortError> {
        let hint = if default { "Y/n" } else { "y/N" };
        let mut stderr = io::stderr().lock();
        write!(stderr, "{question} ({hint}) ")?;
        stderr.flush()?;

        let answer = read_answer(&mut io::stdin().lock(), default)?;
        Ok(answer)
    }
}

/// Reads one answer line. Closed input is a no whatever the default.
fn read_answer(input: &mut impl BufRead, default: bool) -> io::Result<bool> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(parse_answer(&line, default))
}

/// Interprets a typed answer; anything unrecognised is a no.
fn parse_answer(line: &str, default: bool) -> bool {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
