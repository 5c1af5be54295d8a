mod cmd;

use crate::cmd::Cmd;

use clap::Parser;

use std::process::ExitCode;

fn main() -> ExitCode {
    human_panic::setup_panic!();

    match Cmd::parse().run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
