//! `og-image render`: one image from command-line metadata.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::{
    cli::RenderArgs,
    config::OgConfig,
    generator::{Card, Template, write_atomic},
    image::{FontBook, output_format},
    log,
    post::split_tags,
    utils::date::DateTimeUtc,
};

pub fn run(config: &OgConfig, fonts: &FontBook, args: &RenderArgs) -> Result<PathBuf> {
    let date = args
        .date
        .as_deref()
        .map(|raw| DateTimeUtc::parse(raw).ok_or_else(|| anyhow!("Invalid date `{raw}`")))
        .transpose()?;
    let tags: Vec<String> = args.tags.iter().flat_map(|tag| split_tags(tag)).collect();

    let card = Card {
        title: &args.title,
        date,
        tags: &tags,
    };
    let image = Template::new(config, fonts).compose(&card)?;

    let output = &args.output;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    write_atomic(output, |tmp| {
        image.save_with_format(tmp, output_format(output))
    })?;

    log!("render"; "{}", output.display());
    Ok(output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::test_parse_config, image::FontSources};
    use tempfile::TempDir;

    fn args(output: PathBuf, date: Option<&str>) -> RenderArgs {
        RenderArgs {
            title: "Hello".to_string(),
            date: date.map(str::to_string),
            tags: vec!["rust, web".to_string()],
            output,
        }
    }

    fn plain() -> (OgConfig, FontBook) {
        let config = test_parse_config(
            "[canvas]\nwidth = 20\nheight = 10\n[border]\nsize = 2\nfill = \"#000000\"\n\
             [title]\nenable = false\n[date]\nenable = false\n[tags]\nenable = false\n[label]\nenable = false",
        );
        let fonts = FontBook::new(&FontSources {
            system: false,
            dirs: Vec::new(),
            fallback: None,
        });
        (config, fonts)
    }

    #[test]
    fn test_render_by_extension() {
        let dir = TempDir::new().unwrap();
        let (config, fonts) = plain();
        let output = dir.path().join("nested").join("card.jpg");

        let written = run(&config, &fonts, &args(output.clone(), Some("2024-06-05"))).unwrap();
        assert_eq!(written, output);
        let decoded = ::image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_render_invalid_date() {
        let dir = TempDir::new().unwrap();
        let (config, fonts) = plain();
        let output = dir.path().join("card.png");

        let err = run(&config, &fonts, &args(output.clone(), Some("June 5th"))).unwrap_err();
        assert!(err.to_string().contains("June 5th"));
        assert!(!output.exists());
    }
}
