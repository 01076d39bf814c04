//! `og-image generate`

use anyhow::Result;

use crate::{cli::GenerateArgs, config::OgConfig, generator, image::FontBook};

pub fn run(config: &OgConfig, fonts: &FontBook, args: &GenerateArgs) -> Result<()> {
    generator::generate(config, fonts, &args.paths, args.dry)?;
    Ok(())
}
