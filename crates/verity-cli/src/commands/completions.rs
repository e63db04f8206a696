//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "verity";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    match args.shell {
        Shell::Bash => write(shells::Bash, &mut io::stdout()),
        Shell::Zsh => write(shells::Zsh, &mut io::stdout()),
        Shell::Fish => write(shells::Fish, &mut io::stdout()),
        Shell::PowerShell => write(shells::PowerShell, &mut io::stdout()),
        Shell::Elvish => write(shells::Elvish, &mut io::stdout()),
    }
    Ok(())
}

fn write(shell: impl Generator, out: &mut dyn io::Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}
