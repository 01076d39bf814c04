//! The post card layout.
//!
//! Draw order: border, title, date, tags, site label. Every block takes its
//! style from the config; the date and label move up when tags are shown.

use crate::{
    config::{OgConfig, TextStyle},
    image::{FontBook, Image, ImageError},
    post::Post,
    utils::date::DateTimeUtc,
};

/// What goes on one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'p> {
    pub title: &'p str,
    pub date: Option<DateTimeUtc>,
    pub tags: &'p [String],
}

impl<'p> From<&'p Post> for Card<'p> {
    fn from(post: &'p Post) -> Self {
        Self {
            title: &post.title,
            date: Some(post.date),
            tags: &post.tags,
        }
    }
}

impl Card<'_> {
    /// Tags as `#a #b`.
    pub fn tag_line(&self) -> String {
        self.tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lays cards out on canvases using one config and one font book.
pub struct Template<'a> {
    config: &'a OgConfig,
    fonts: &'a FontBook,
    label: Option<String>,
}

impl<'a> Template<'a> {
    pub fn new(config: &'a OgConfig, fonts: &'a FontBook) -> Self {
        Self {
            config,
            fonts,
            label: config.site.label(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Compose the card into a fresh image.
    pub fn compose(&self, card: &Card<'_>) -> Result<Image<'a>, ImageError> {
        let config = self.config;
        let canvas = &config.canvas;
        let mut image = Image::new(canvas.width, canvas.height, canvas.background, self.fonts);

        if config.border.enable {
            image.border(config.border.size, &config.border.options())?;
        }

        let tagged = !card.tags.is_empty() && config.tags.enabled();

        draw(&mut image, &config.title, card.title, tagged)?;
        if let Some(date) = card.date {
            draw(&mut image, &config.date, &date.format(&config.posts.date_format), tagged)?;
        }
        if tagged {
            draw(&mut image, &config.tags, &card.tag_line(), tagged)?;
        }
        if let Some(label) = &self.label {
            draw(&mut image, &config.label, label, tagged)?;
        }

        Ok(image)
    }
}

fn draw(image: &mut Image<'_>, style: &TextStyle, message: &str, tagged: bool) -> Result<(), ImageError> {
    if !style.enabled() {
        return Ok(());
    }
    let offset = style.offset(tagged);
    image.text_with(message, &style.options(), |_, _| offset)?;
    Ok(())
}
