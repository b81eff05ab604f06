// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use eyre::bail;
use prophecy_tools::core::build::CompilerConfig;

pub use style::{BOLD, DIM, ERROR, OK};

mod style;

/// Splits a compiler command line such as `scarb --release build` on whitespace.
pub fn parse_compiler(command_line: &str) -> eyre::Result<CompilerConfig> {
    let mut words = command_line.split_whitespace().map(str::to_owned);
    let Some(program) = words.next() else {
        bail!("compiler command must not be empty");
    };
    Ok(CompilerConfig {
        program,
        args: words.collect(),
    })
}

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}
