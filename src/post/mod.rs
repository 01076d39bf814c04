//! Blog posts: discovery and metadata.
//!
//! Posts follow the Jekyll layout: `_posts/YYYY-MM-DD-some-title.md` with a
//! front matter block. The date and slug come from the front matter when
//! present, else from the file name.

mod front_matter;

pub use front_matter::split_tags;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use jwalk::WalkDir;

use crate::utils::{date::DateTimeUtc, slug::slugify};

/// File extensions scanned as posts.
const POST_EXTENSIONS: &[&str] = &["md", "markdown", "html"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub path: PathBuf,
    pub title: String,
    pub date: DateTimeUtc,
    /// In front matter order, possibly empty.
    pub tags: Vec<String>,
    pub slug: String,
    pub published: bool,
    /// Image declared by the post itself, if any.
    pub image: Option<String>,
}

impl Post {
    /// Read and parse a post file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(path, &content)
    }

    /// Parse a post from its path and content.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let meta = front_matter::extract(content)
            .with_context(|| format!("Bad front matter in {}", path.display()))?
            .map(|(meta, _body)| meta)
            .unwrap_or_default();

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("Invalid post file name: {}", path.display()))?;
        let (file_date, file_name) = match DateTimeUtc::parse_filename_prefix(stem) {
            Some((date, rest)) => (Some(date), rest),
            None => (None, stem),
        };

        let date = match meta.date.as_deref() {
            Some(raw) => DateTimeUtc::parse(raw)
                .ok_or_else(|| anyhow!("Invalid date `{raw}` in {}", path.display()))?,
            None => file_date.ok_or_else(|| {
                anyhow!(
                    "No date in {}: set `date` or name the file YYYY-MM-DD-title",
                    path.display()
                )
            })?,
        };

        let slug = slugify(meta.slug.as_deref().unwrap_or(file_name));
        if slug.is_empty() {
            return Err(anyhow!("Empty slug for {}", path.display()));
        }

        let title = meta
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| titleize(file_name));

        Ok(Self {
            path: path.to_path_buf(),
            title,
            date,
            tags: meta.tags,
            slug,
            published: meta.published.unwrap_or(true),
            image: meta.image,
        })
    }
}

/// `hello-world` -> `Hello World`
fn titleize(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| POST_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Collect post files under `dir`, sorted by path.
///
/// Hidden files and directories are skipped. A missing directory yields no
/// posts.
pub fn scan(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| is_post_file(path))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(name: &str, content: &str) -> Result<Post> {
        Post::parse(Path::new(name), content)
    }

    #[test]
    fn test_parse_full_front_matter() {
        let post = parse(
            "_posts/2024-06-05-ignored.md",
            "---\ntitle: Shipping OG images\ndate: 2024-06-07 10:00:00 +0200\ntags: [rust, images]\nslug: og-images\n---\nBody",
        )
        .unwrap();

        assert_eq!(post.title, "Shipping OG images");
        assert_eq!(post.date, DateTimeUtc::new(2024, 6, 7, 10, 0, 0));
        assert_eq!(post.tags, vec!["rust", "images"]);
        assert_eq!(post.slug, "og-images");
        assert!(post.published);
    }

    #[test]
    fn test_date_and_slug_from_file_name() {
        let post = parse("2023-11-02-Hello-World.md", "---\ntitle: Hi\n---\n").unwrap();
        assert_eq!(post.date, DateTimeUtc::from_ymd(2023, 11, 2));
        assert_eq!(post.slug, "hello-world");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_file_name() {
        let post = parse("2023-11-02-hello-world.md", "no front matter").unwrap();
        assert_eq!(post.title, "Hello World");
    }

    #[test]
    fn test_slug_is_normalized() {
        let post = parse("2023-11-02-x.md", "---\nslug: Ünïcödé Post!\n---\n").unwrap();
        assert_eq!(post.slug, "unicode-post");
    }

    #[test]
    fn test_missing_date_is_error() {
        let err = parse("hello.md", "---\ntitle: Hi\n---\n").unwrap_err();
        assert!(err.to_string().contains("No date"));
    }

    #[test]
    fn test_invalid_date_is_error() {
        let err = parse("2023-11-02-x.md", "---\ndate: someday\n---\n").unwrap_err();
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn test_unpublished() {
        let post = parse("2023-11-02-x.md", "---\npublished: false\n---\n").unwrap();
        assert!(!post.published);
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("hello-world"), "Hello World");
        assert_eq!(titleize("snake_case__name"), "Snake Case Name");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn test_scan_finds_posts_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2024")).unwrap();
        fs::create_dir_all(root.join(".drafts")).unwrap();
        fs::write(root.join("2024-02-01-b.md"), "").unwrap();
        fs::write(root.join("2024-01-01-a.markdown"), "").unwrap();
        fs::write(root.join("2024").join("2024-03-01-c.html"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".drafts").join("2024-04-01-d.md"), "").unwrap();

        let names: Vec<_> = scan(root)
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("2024").join("2024-03-01-c.html"),
                PathBuf::from("2024-01-01-a.markdown"),
                PathBuf::from("2024-02-01-b.md"),
            ]
        );
    }

    #[test]
    fn test_scan_missing_dir() {
        assert!(scan(Path::new("/definitely/not/a/posts/dir")).is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2024-05-05-file.md");
        fs::write(&path, "---\ntitle: From disk\ntags: a\n---\n").unwrap();

        let post = Post::load(&path).unwrap();
        assert_eq!(post.title, "From disk");
        assert_eq!(post.tags, vec!["a"]);
        assert!(Post::load(&dir.path().join("missing.md")).is_err());
    }
}
