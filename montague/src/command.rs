// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! The montague binary's command-line interface and interactive shell.

use clap::Args;
use codespan_reporting::{
    files::SimpleFile,
    term::{
        self as terminal,
        termcolor::{ColorChoice, StandardStream},
    },
};
use itertools::Itertools;
use logic::parser::{parse_error_diagnostic, parse_formula};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};
use translator::{load_lexicon, translate_sentence, Lexicon};

#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ColorOutput {
    Never,
    Auto,
    Always,
}

#[derive(Args, Clone, Debug, PartialEq, Eq)]
struct LexiconArgs {
    #[arg(long, default_value = "montague/resources/fragment.json")]
    /// Path to the lexicon fragment in JSON format
    lexicon: PathBuf,
}

#[derive(clap::Subcommand, Clone, Debug, PartialEq, Eq)]
enum Command {
    /// Start the interactive shell
    Repl(LexiconArgs),
    /// Translate a single sentence and print its readings
    Translate {
        #[command(flatten)]
        lexicon: LexiconArgs,

        /// The sentence to translate
        sentence: String,
    },
    /// Parse a formula and print its canonical rendering
    Parse {
        /// The formula text to parse
        formula: String,
    },
}

#[derive(clap::Parser, Debug)]
#[command(about, long_about=None)]
/// Entrypoint for the montague binary, including all commands.
pub struct App {
    #[arg(value_enum, long, default_value_t = ColorOutput::Auto)]
    /// Control color output. Auto disables colors with TERM=dumb or
    /// NO_COLOR=true.
    color: ColorOutput,

    #[command(subcommand)]
    /// Command to run
    command: Command,
}

impl App {
    /// Run the application.
    pub fn exec(self) {
        let writer = StandardStream::stderr(match &self.color {
            ColorOutput::Never => ColorChoice::Never,
            ColorOutput::Always => ColorChoice::Always,
            ColorOutput::Auto => ColorChoice::Auto,
        });
        let config = codespan_reporting::term::Config::default();

        match self.command {
            Command::Repl(args) => {
                let lexicon = load_lexicon_file(&args.lexicon);
                run_shell(lexicon);
            }
            Command::Translate { lexicon, sentence } => {
                let lexicon = load_lexicon_file(&lexicon.lexicon);
                match translate_sentence(&sentence, &lexicon) {
                    Ok(readings) => {
                        for reading in readings {
                            println!("Denotation: {}", reading.formula);
                            println!("Type: {}", reading.typ.concise());
                        }
                    }
                    Err(err) => {
                        eprintln!("Error: {err}");
                        process::exit(1);
                    }
                }
            }
            Command::Parse { formula } => match parse_formula(&formula) {
                Ok(parsed) => println!("{parsed}"),
                Err(err) => {
                    let files = SimpleFile::new("<input>", &formula);
                    let diagnostic = parse_error_diagnostic((), &err);
                    terminal::emit(&mut writer.lock(), &config, &files, &diagnostic).unwrap();
                    process::exit(1);
                }
            },
        }
    }
}

fn load_lexicon_file(path: &Path) -> Lexicon {
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error: failed to open {}: {err}", path.display());
        process::exit(1);
    });
    let json = serde_json::from_str(&text).unwrap_or_else(|err| {
        eprintln!("Error: {} is not valid JSON: {err}", path.display());
        process::exit(1);
    });
    load_lexicon(&json).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(1);
    })
}

/// Operating modes for the interactive shell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// Translate English sentences into logic
    Translate,
    /// Parse formula text and echo its canonical form
    Parse,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Translate => write!(f, "translate"),
            Mode::Parse => write!(f, "parse"),
        }
    }
}

/// A box holding all the information the shell needs to run.
struct ShellState {
    mode: Mode,
    lexicon: Lexicon,
}

const HELP_MESSAGE: &str = "\
Available commands:
    !mode          Display the current operating mode.
    !mode <mode>   Switch the operating mode.
    !words         List all words in the lexicon.
    !help          Display this help message.
    Ctrl+D         Exit the program.

Available modes:
    translate      Translate English text into logic.
    parse          Parse a formula and echo its canonical form.


Enter a sentence to see its translation!
";

fn run_shell(lexicon: Lexicon) {
    println!("The Montague natural language system.\n");
    println!("{HELP_MESSAGE}");

    let mut state = ShellState {
        mode: Mode::Translate,
        lexicon,
    };
    let stdin = io::stdin();
    loop {
        print!(">>> ");
        io::stdout().flush().expect("could not flush stdout");
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                break;
            }
            Ok(_) => {}
        }
        if let Some(response) = execute_command(&line, &mut state) {
            println!("{response}");
        }
    }
}

/// Execute one shell line and return the text to display, if any.
fn execute_command(command: &str, state: &mut ShellState) -> Option<String> {
    let command = command.trim();
    if let Some(command) = command.strip_prefix('!') {
        Some(execute_bang_command(command, state))
    } else if command.is_empty() {
        None
    } else {
        Some(match state.mode {
            Mode::Translate => translate_response(command, &state.lexicon),
            Mode::Parse => parse_response(command),
        })
    }
}

fn execute_bang_command(command: &str, state: &mut ShellState) -> String {
    if command == "mode" {
        format!("You are currently in {} mode.", state.mode)
    } else if let Some(new_mode) = command.strip_prefix("mode ") {
        match new_mode.trim() {
            "translate" => {
                state.mode = Mode::Translate;
                "Switched to translate mode.".to_string()
            }
            "parse" => {
                state.mode = Mode::Parse;
                "Switched to parse mode.".to_string()
            }
            other => format!(
                "{other} is not a recognized mode. Available modes are: translate, parse.\n\
                 Remaining in {} mode.",
                state.mode
            ),
        }
    } else if command == "words" {
        state
            .lexicon
            .keys()
            .sorted_by_key(|word| word.to_lowercase())
            .join(" ")
    } else if command == "help" {
        format!("{HELP_MESSAGE}\nYou are currently in {} mode.", state.mode)
    } else {
        format!("Unrecognized command {command}.")
    }
}

fn translate_response(sentence: &str, lexicon: &Lexicon) -> String {
    match translate_sentence(sentence, lexicon) {
        Ok(readings) => readings
            .iter()
            .map(|reading| {
                format!(
                    "Denotation: {}\nType: {}",
                    reading.formula,
                    reading.typ.concise()
                )
            })
            .join("\n\n"),
        Err(err) => format!("Error: {err}"),
    }
}

fn parse_response(text: &str) -> String {
    match parse_formula(text) {
        Ok(parsed) => parsed.to_string(),
        Err(err) => format!("Error: {err}"),
    }
}
