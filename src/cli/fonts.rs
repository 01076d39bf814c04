//! `og-image fonts`: list the families the renderer can resolve.

use anyhow::Result;

use crate::{config::OgConfig, image::FontBook, log};

pub fn list_fonts(config: &OgConfig, fonts: &FontBook) -> Result<()> {
    let families = fonts.families();
    if families.is_empty() {
        log!("fonts"; "no fonts found (system: {}, extra dirs: {})",
            config.fonts.system, config.fonts.dirs.len());
        return Ok(());
    }

    for family in &families {
        println!("{family}");
    }
    log!("fonts"; "{} families", families.len());
    Ok(())
}
