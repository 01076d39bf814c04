//! Post image generation.
//!
//! Loads posts, renders one card per published post in parallel and writes
//! `<output>/<slug>.<format>`. A failing post is logged and counted; the
//! other posts still render. Images are written to a temporary file and
//! renamed into place, so a failure never leaves a half-written image where
//! a good one was.

mod manifest;
mod template;

pub use manifest::{Manifest, ManifestEntry};
pub use template::{Card, Template};

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::{
    config::OgConfig,
    debug,
    image::{FontBook, ImageError},
    log,
    logger::ProgressLine,
    post::{self, Post},
    utils::{path::resolve_path, plural::plural_count},
};

/// Outcome of one `generate` run.
#[derive(Debug, Default)]
pub struct Summary {
    /// Posts whose image was written (or would be, in a dry run).
    pub written: Vec<(Post, PathBuf)>,
    /// Unpublished posts.
    pub skipped: usize,
    /// Post file and the error that stopped it.
    pub failed: Vec<(PathBuf, String)>,
}

/// Generate images for `paths`, or for every post when `paths` is empty.
///
/// Returns an error after all posts ran if any of them failed.
pub fn generate(config: &OgConfig, fonts: &FontBook, paths: &[PathBuf], dry: bool) -> Result<Summary> {
    if config.skips_env() {
        log!("generate"; "skipping, environment `{}` is in build.skip_envs", config.env);
        return Ok(Summary::default());
    }

    let files = if paths.is_empty() {
        post::scan(&config.posts.dir)
    } else {
        paths
            .iter()
            .map(|p| resolve_path(p, &config.posts.dir))
            .collect()
    };
    if files.is_empty() {
        log!("generate"; "no posts found in {}", config.root_relative(&config.posts.dir).display());
        return Ok(Summary::default());
    }

    let mut summary = Summary::default();
    let posts = load_posts(&files, &mut summary);
    debug!("generate"; "{} loaded, {} unpublished",
        plural_count(posts.len(), "post"), summary.skipped);

    if dry {
        for post in posts {
            let output = output_path(config, &post);
            log!("dry"; "{} -> {}", config.root_relative(&post.path).display(),
                config.root_relative(&output).display());
            summary.written.push((post, output));
        }
        return Ok(summary);
    }

    fs::create_dir_all(&config.posts.output)
        .with_context(|| format!("Failed to create {}", config.posts.output.display()))?;

    let template = Template::new(config, fonts);
    debug!("generate"; "site label: {}", template.label().unwrap_or("(none)"));
    let progress = ProgressLine::new("generate", &[("images", posts.len())]);
    let results: Vec<_> = posts
        .into_par_iter()
        .map(|post| {
            let result = render_post(config, &template, &post);
            progress.inc("images");
            (post, result)
        })
        .collect();
    progress.finish();

    for (post, result) in results {
        match result {
            Ok(path) => summary.written.push((post, path)),
            Err(e) => {
                log!("error"; "{}: {:#}", config.root_relative(&post.path).display(), e);
                summary.failed.push((post.path, format!("{e:#}")));
            }
        }
    }

    if let Some(manifest_path) = &config.posts.manifest {
        write_manifest(config, manifest_path, &summary.written)?;
    }

    log!("generate"; "wrote {}", plural_count(summary.written.len(), "image"));
    if !summary.failed.is_empty() {
        bail!("{} failed", plural_count(summary.failed.len(), "post"));
    }
    Ok(summary)
}

/// Load post files, dropping unpublished posts and duplicate slugs.
fn load_posts(files: &[PathBuf], summary: &mut Summary) -> Vec<Post> {
    let loaded: Vec<_> = files.par_iter().map(|path| (path, Post::load(path))).collect();

    let mut slugs: FxHashMap<String, PathBuf> = FxHashMap::default();
    let mut posts = Vec::with_capacity(loaded.len());
    for (path, result) in loaded {
        match result {
            Ok(post) if !post.published => summary.skipped += 1,
            Ok(post) => {
                if let Some(first) = slugs.get(&post.slug) {
                    let e = anyhow!("slug `{}` already used by {}", post.slug, first.display());
                    log!("error"; "{}: {}", path.display(), e);
                    summary.failed.push((path.clone(), e.to_string()));
                    continue;
                }
                slugs.insert(post.slug.clone(), post.path.clone());
                posts.push(post);
            }
            Err(e) => {
                log!("error"; "{:#}", e);
                summary.failed.push((path.clone(), format!("{e:#}")));
            }
        }
    }
    posts
}

pub fn output_path(config: &OgConfig, post: &Post) -> PathBuf {
    config
        .posts
        .output
        .join(format!("{}.{}", post.slug, config.posts.format.extension()))
}

fn render_post(config: &OgConfig, template: &Template<'_>, post: &Post) -> Result<PathBuf> {
    let path = output_path(config, post);
    let image = template.compose(&Card::from(post))?;
    write_atomic(&path, |tmp| {
        image.save_with_format(tmp, config.posts.format.image_format())
    })?;
    debug!("generate"; "{}", config.root_relative(&path).display());
    Ok(path)
}

/// Write through `<path>.tmp` and rename into place.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<(), ImageError>,
{
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = write(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to move image into {}", path.display()));
    }
    Ok(())
}

fn write_manifest(config: &OgConfig, path: &Path, written: &[(Post, PathBuf)]) -> Result<()> {
    let mut manifest = Manifest::load(path)?;
    for (post, image_path) in written {
        // A post that declares its own image keeps it.
        if post.image.is_some() {
            continue;
        }
        manifest.insert(
            post.slug.clone(),
            ManifestEntry {
                path: web_path(&config.root_relative(image_path)),
                width: config.canvas.width,
                height: config.canvas.height,
                alt: post.title.clone(),
            },
        );
    }
    manifest.save(path)?;
    debug!("generate"; "manifest: {} entries", manifest.len());
    Ok(())
}

/// `/`-separated form of a relative path.
fn web_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
