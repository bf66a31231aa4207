use clap::Parser;
use colored::Colorize;

mod app;
mod assets;
mod cli;
mod commands;
mod config;
mod images;
mod input;
mod limiter;
mod navigator;
mod render;
mod segmenter;
mod shell;
mod watcher;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = cli.run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
