//! og-image - Open Graph images for Jekyll-style blog posts.

mod cli;
mod config;
mod generator;
mod image;
mod logger;
mod post;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::OgConfig;
use image::FontBook;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = OgConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { force } => cli::init::write_config(&config, *force),
        Commands::Generate { args } => {
            let fonts = load_fonts(&config);
            cli::generate::run(&config, &fonts, args)
        }
        Commands::Render { args } => {
            let fonts = load_fonts(&config);
            cli::render::run(&config, &fonts, args).map(|_| ())
        }
        Commands::Fonts => cli::fonts::list_fonts(&config, &load_fonts(&config)),
    }
}

/// Font discovery scans the system, so only commands that draw pay for it.
fn load_fonts(config: &OgConfig) -> FontBook {
    let fonts = FontBook::new(&config.fonts.sources());
    debug!("fonts"; "{} families available", fonts.families().len());
    fonts
}
