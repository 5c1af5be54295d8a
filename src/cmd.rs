use anyhow::{Context, Result};
use calc_common::error::{report_err, Error};
use calc_interpreter::Interpreter;
use clap::Parser;
use termcolor::{ColorChoice, StandardStream};
use tracing::Level;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[remain::sorted]
#[derive(Debug, Parser)]
#[command(about, author, disable_help_subcommand = true, propagate_version = true, version)]
pub enum Cmd {
    /// Evaluate a single expression.
    Eval {
        source: String,
        /// Log the parsed tree and every assignment.
        #[arg(long)]
        debug: bool,
        /// List the variables afterwards.
        #[arg(long)]
        vars: bool,
    },
    /// Start an interactive session.
    #[cfg(feature = "repl")]
    Repl {
        #[arg(long)]
        debug: bool,
    },
    /// Evaluate a file one line at a time.
    Run {
        path: PathBuf,
        #[arg(long)]
        debug: bool,
        #[arg(long)]
        vars: bool,
    },
}

impl Cmd {
    pub fn run(&self) -> Result<ExitCode> {
        match self {
            Cmd::Eval { source, debug, vars } => {
                init_tracing(*debug);
                let mut interpreter = Interpreter::default();
                let result = interpreter.run(source);
                if let Ok(Some(value)) = result {
                    println!("{value}");
                }
                if *vars {
                    print!("{}", interpreter.env());
                }
                match result {
                    Ok(_) => Ok(ExitCode::SUCCESS),
                    Err(e) => report("<expr>", source, &e),
                }
            }
            #[cfg(feature = "repl")]
            Cmd::Repl { debug } => {
                init_tracing(*debug);
                calc_repl::run()?;
                Ok(ExitCode::SUCCESS)
            }
            Cmd::Run { path, debug, vars } => {
                init_tracing(*debug);
                let source = fs::read_to_string(path)
                    .with_context(|| format!("could not read file: {}", path.display()))?;
                let mut interpreter = Interpreter::default();
                let result = interpreter.run_lines(&source, |value| println!("{value}"));
                if *vars {
                    print!("{}", interpreter.env());
                }
                match result {
                    Ok(()) => Ok(ExitCode::SUCCESS),
                    Err(e) => report(&path.display().to_string(), &source, &e),
                }
            }
        }
    }
}

fn report(name: &str, source: &str, e: &Error) -> Result<ExitCode> {
    let stderr = StandardStream::stderr(ColorChoice::Auto);
    report_err(&mut stderr.lock(), name, source, e).context("could not report error")?;
    Ok(ExitCode::FAILURE)
}

fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt().with_max_level(Level::TRACE).with_writer(io::stderr).init();
    }
}
