//! Configuration section definitions.

mod build;
mod canvas;
mod fonts;
mod posts;
mod site;
mod style;

pub use build::BuildSectionConfig;
pub use canvas::{BorderSectionConfig, CanvasSectionConfig};
pub use fonts::FontsSectionConfig;
pub use posts::{OutputFormat, PostsSectionConfig};
pub use site::SiteSectionConfig;
pub use style::TextStyle;
