use crate::environment::Environment;
use crate::interpreter;
use crate::printer::PrintMode;
use ansi_term::Colour;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

pub const USAGE: &str = "usage: tendril [--tree | --compact] [FILE]

  --tree      print results as an indented tree (the default)
  --compact   print results on one line, s-expression style
  FILE        evaluate FILE one line at a time instead of prompting
  -h, --help  show this message

Set RUST_LOG (e.g. RUST_LOG=tendril=trace) to see what the evaluator is doing.";

#[derive(Debug)]
pub enum Error {
    Usage(UsageError),
    IO(io::Error),
    /// Number of lines of a script that failed.
    ScriptFailed(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(e) => write!(f, "{}\n\n{}", e, USAGE),
            Error::IO(e) => write!(f, "io error: {}", e),
            Error::ScriptFailed(n) => write!(f, "{} expression(s) failed", n),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::IO(e)
    }
}

impl From<UsageError> for Error {
    fn from(e: UsageError) -> Self {
        Self::Usage(e)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum UsageError {
    UnknownFlag(String),
    TooManyFiles,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::UnknownFlag(flag) => write!(f, "unknown flag {}", flag),
            UsageError::TooManyFiles => write!(f, "at most one FILE may be given"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: PrintMode,
    pub script: Option<PathBuf>,
    pub prompt: String,
    /// A line consisting of exactly this text ends the session.
    pub quit: String,
    pub colour: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: PrintMode::Tree,
            script: None,
            prompt: String::from("[]> "),
            quit: String::from("quit"),
            colour: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options {
        colour: atty::is(atty::Stream::Stdout),
        ..Options::default()
    };
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--tree" => options.mode = PrintMode::Tree,
            "--compact" => options.mode = PrintMode::Compact,
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(UsageError::UnknownFlag(flag.to_string()));
            }
            path => match options.script {
                None => options.script = Some(PathBuf::from(path)),
                Some(_) => return Err(UsageError::TooManyFiles),
            },
        }
    }
    Ok(Command::Run(options))
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ')
}

pub fn format_result(result: &interpreter::Result<String>, colour: bool) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => {
            let text = format!("Error: {}", e);
            match colour {
                true => Colour::Red.paint(text).to_string(),
                false => text,
            }
        }
    }
}

/// Evaluate each line of `input` as one expression, writing one result per
/// line. Returns how many lines failed.
pub fn run_lines<R, W>(
    input: R,
    output: &mut W,
    env: &Environment,
    options: &Options,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut failures = 0;
    for line in input.lines() {
        let line = line?;
        if line == options.quit {
            break;
        }
        if is_blank(&line) {
            continue;
        }
        let result = interpreter::rep(&line, env, options.mode);
        if let Err(e) = &result {
            log::info!("{:?} failed: {}", line, e);
            failures += 1;
        }
        writeln!(output, "{}", format_result(&result, options.colour))?;
    }
    Ok(failures)
}

pub fn setup(options: &Options) -> io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("tendril")?;
    interface.set_prompt(&options.prompt)?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".tendril_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

pub fn repl<T: Terminal>(interface: &Interface<T>, env: &Environment, options: &Options) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line == options.quit {
                    break;
                }
                if is_blank(&line) {
                    continue;
                }
                interface.add_history_unique(line.clone());
                let result = interpreter::rep(&line, env, options.mode);
                writeln!(interface, "{}", format_result(&result, options.colour)).ok();
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

pub fn launch(args: Vec<String>, env: &Environment) -> Result<(), Error> {
    let options = match parse_args(args.into_iter().skip(1))? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Run(options) => options,
    };
    match &options.script {
        Some(path) => {
            log::debug!("running script {}", path.display());
            let input = BufReader::new(File::open(path)?);
            let stdout = io::stdout();
            let mut output = stdout.lock();
            match run_lines(input, &mut output, env, &options)? {
                0 => Ok(()),
                n => Err(Error::ScriptFailed(n)),
            }
        }
        None => {
            let interface = setup(&options)?;
            repl(&interface, env, &options);
            save_history(&interface)?;
            Ok(())
        }
    }
}
