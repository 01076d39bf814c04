//! Front matter from YAML-like (`---`) or TOML (`+++`) blocks.

use anyhow::{Context, Result};

/// The post fields the generator reads. Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub slug: Option<String>,
    pub published: Option<bool>,
    /// An image the post already declares.
    pub image: Option<String>,
}

/// Extract front matter and return `(front_matter, body)`.
///
/// Returns `Ok(None)` when the content has no front matter block.
pub fn extract(content: &str) -> Result<Option<(FrontMatter, &str)>> {
    match detect(content) {
        Some((block, body, true)) => Ok(Some((parse_toml(block)?, body))),
        Some((block, body, false)) => Ok(Some((parse_yaml_like(block), body))),
        None => Ok(None),
    }
}

/// Detect and extract a front matter block.
/// Returns `(block, body, is_toml)` if found.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && rest.starts_with(['\n', '\r'])
        {
            let close = format!("\n{fence}");
            let end = rest.find(&close)?;
            let block = rest[..end].trim();
            let body = rest[end + close.len()..].trim_start_matches(['\r', '\n']);
            return Some((block, body, is_toml));
        }
    }
    None
}

// ============================================================================
// YAML-like
// ============================================================================

/// Parse simple YAML-like front matter.
///
/// Supports `key: value`, quoted scalars, inline `[a, b]` lists, block
/// `- item` lists and a nested `image:` map with a `path:` key.
fn parse_yaml_like(content: &str) -> FrontMatter {
    let mut meta = FrontMatter::default();
    // Key whose value continues on the following indented lines.
    let mut open_key: Option<String> = None;

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let indented = raw.starts_with([' ', '\t']);

        if let Some(item) = line.strip_prefix("- ").or_else(|| (line == "-").then_some("")) {
            if open_key.as_deref() == Some("tags") {
                let item = unquote(item.trim());
                if !item.is_empty() {
                    meta.tags.push(item.to_string());
                }
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        if indented {
            if open_key.as_deref() == Some("image") && key == "path" {
                meta.image = Some(unquote(value).to_string());
            }
            continue;
        }

        open_key = None;
        if value.is_empty() {
            open_key = Some(key);
            continue;
        }

        match key.as_str() {
            "title" => meta.title = Some(unquote(value).to_string()),
            "date" => meta.date = Some(unquote(value).to_string()),
            "slug" => meta.slug = Some(unquote(value).to_string()),
            "published" => meta.published = parse_bool(unquote(value)),
            "image" => meta.image = Some(unquote(value).to_string()),
            "tags" => meta.tags = parse_tag_value(value),
            _ => {}
        }
    }

    meta
}

/// Strip one pair of matching quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `[a, "b c"]` as a list, anything else as a comma/space separated string.
fn parse_tag_value(value: &str) -> Vec<String> {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect();
    }
    split_tags(unquote(value))
}

/// Split a tag string on commas and whitespace.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// TOML
// ============================================================================

fn parse_toml(content: &str) -> Result<FrontMatter> {
    let table: toml::Table = toml::from_str(content).context("Invalid TOML front matter")?;

    let string = |key: &str| match table.get(key) {
        Some(toml::Value::String(s)) => Some(s.clone()),
        Some(toml::Value::Datetime(dt)) => Some(dt.to_string()),
        _ => None,
    };

    let tags = match table.get("tags") {
        Some(toml::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect(),
        Some(toml::Value::String(s)) => split_tags(s),
        _ => Vec::new(),
    };

    let image = match table.get("image") {
        Some(toml::Value::String(s)) => Some(s.clone()),
        Some(toml::Value::Table(t)) => t.get("path").and_then(|p| p.as_str()).map(str::to_string),
        _ => None,
    };

    Ok(FrontMatter {
        title: string("title"),
        date: string("date"),
        tags,
        slug: string("slug"),
        published: table.get("published").and_then(toml::Value::as_bool),
        image,
    })
}
