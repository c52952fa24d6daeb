//! `vdiv` picks standard resistor values for a voltage divider.

use std::process;

use clap::Parser;

mod cli;
use cli::{Cli, Colorize};

fn main() {
    if let Err(error) = Cli::parse().run() {
        eprintln!("{} {error:#}", "error:".error());
        process::exit(1);
    }
}
