use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const GRAPH_FILE_PROMPT: &str = "Please enter a graph file to import: ";
pub const SECONDS_PROMPT: &str = "Enter an integer number of seconds to run the algorithm: ";
pub const REPEAT_PROMPT: &str =
    "Type \"yes\" and hit ENTER to load a new graph or press ENTER to finish the program: ";

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("console input was closed")]
    Closed,
    #[error("console I/O failed")]
    Io(#[from] io::Error),
}

/// Result of reading one line as an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerInput {
    Value(i32),
    NotAnInteger,
    UnexpectedCharacter(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a positive integer")]
pub struct RangeError(pub i32);

/// Reads a line as a stream extraction of one `int` would: leading whitespace is
/// skipped, then an optional sign and digits. Anything but whitespace after the number
/// is reported as unexpected.
pub fn parse_integer(line: &str) -> IntegerInput {
    let rest = line.trim_start();
    let sign_len = usize::from(rest.starts_with(['+', '-']));
    let digits_len = rest[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return IntegerInput::NotAnInteger;
    }

    let (number, remaining) = rest.split_at(sign_len + digits_len);
    let Ok(value) = number.parse::<i32>() else {
        return IntegerInput::NotAnInteger;
    };

    match remaining.trim_start().chars().next() {
        Some(unexpected) => IntegerInput::UnexpectedCharacter(unexpected),
        None => IntegerInput::Value(value),
    }
}

pub fn check_positive(value: i32) -> Result<u32, RangeError> {
    u32::try_from(value)
        .ok()
        .filter(|&seconds| seconds > 0)
        .ok_or(RangeError(value))
}

/// Line-oriented prompt/answer channel used by the session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn welcome(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "Welcome to CS106L GraphViz!")?;
        writeln!(
            self.output,
            "This program uses a force-directed graph layout algorithm"
        )?;
        writeln!(
            self.output,
            "to render sleek, snazzy pictures of various graphs."
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    pub fn say(&mut self, message: impl std::fmt::Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), ConsoleError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Next input line without its line terminator. Invalid UTF-8 is replaced rather
    /// than rejected, so it only ever fails validation like any other bad answer.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(ConsoleError::Closed);
        }

        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn prompt_integer(&mut self) -> Result<i32, ConsoleError> {
        loop {
            match parse_integer(&self.read_line()?) {
                IntegerInput::Value(value) => return Ok(value),
                IntegerInput::UnexpectedCharacter(unexpected) => {
                    self.say(format_args!("Unexpected character: {unexpected}"))?;
                }
                IntegerInput::NotAnInteger => self.say("Please enter an integer.")?,
            }
            self.prompt("Retry: ")?;
        }
    }

    pub fn prompt_positive_integer(&mut self) -> Result<u32, ConsoleError> {
        loop {
            match check_positive(self.prompt_integer()?) {
                Ok(value) => return Ok(value),
                Err(RangeError(value)) => {
                    log::debug!("rejected non-positive input {value}");
                    self.say("Not a positive integer.")?;
                    self.prompt("Please enter a positive integer: ")?;
                }
            }
        }
    }

    pub fn prompt_for_seconds(&mut self) -> Result<u32, ConsoleError> {
        self.prompt(SECONDS_PROMPT)?;
        self.prompt_positive_integer()
    }

    /// Asks for a path until one can be opened for reading.
    pub fn prompt_for_graph_file(&mut self) -> Result<(PathBuf, File), ConsoleError> {
        loop {
            self.prompt(GRAPH_FILE_PROMPT)?;
            let name = self.read_line()?;
            match File::open(&name) {
                Ok(file) => return Ok((PathBuf::from(name), file)),
                Err(error) => {
                    log::debug!("could not open {name:?}: {error}");
                    self.say(format_args!("{name} is an invalid file name."))?;
                }
            }
        }
    }

    /// True only for the exact line `yes`; end of input counts as no.
    pub fn prompt_for_repeat(&mut self) -> Result<bool, ConsoleError> {
        self.prompt(REPEAT_PROMPT)?;
        match self.read_line() {
            Ok(line) => Ok(line == "yes"),
            Err(ConsoleError::Closed) => Ok(false),
            Err(error) => Err(error),
        }
    }
}
