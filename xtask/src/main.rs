// Licensed under the Apache-2.0 license

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod settings_gen;

#[derive(Parser)]
#[command(name = "xtask", version, about = "Project automation tasks", long_about = None)]
struct Xtask {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the driver settings bindings from NvApiDriverSettings.h
    SettingsGen(settings_gen::SettingsGenArgs),
}

fn main() {
    let cli = Xtask::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("failed to install logger: {err}");
    }

    let result = match &cli.xtask {
        Commands::SettingsGen(args) => settings_gen::run(args),
    };
    result.unwrap_or_else(|e| {
        eprintln!("{e:#}");
        std::process::exit(-1);
    });
}
