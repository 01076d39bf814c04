//! Font discovery and loading.
//!
//! [`FontBook`] owns a `fontdb` database of system fonts and user font
//! directories, resolves [`FontDescriptor`]s against it, and caches the
//! loaded `rusttype` faces so parallel renders share one copy per face.

mod descriptor;

pub use descriptor::{FamilyName, FontDescriptor};

use std::{path::PathBuf, sync::Arc};

use fontdb::{Database, ID, Query, Stretch};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use rusttype::Font;
use serde::{Deserialize, Serialize};

use crate::{debug, image::ImageError, log};

/// Preferred faces for the generic sans-serif family, in order.
const SANS_SERIF_CANDIDATES: &[&str] = &[
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
];
const SERIF_CANDIDATES: &[&str] = &["Times New Roman", "Liberation Serif", "DejaVu Serif", "Noto Serif"];
const MONOSPACE_CANDIDATES: &[&str] = &["Courier New", "Liberation Mono", "DejaVu Sans Mono", "Noto Sans Mono"];

/// Where fonts come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSources {
    /// Load fonts installed on the system.
    pub system: bool,
    /// Extra font directories or font files.
    pub dirs: Vec<PathBuf>,
    /// Family tried when a requested family is not installed.
    pub fallback: Option<String>,
}

impl Default for FontSources {
    fn default() -> Self {
        Self {
            system: true,
            dirs: Vec::new(),
            fallback: None,
        }
    }
}

pub struct FontBook {
    db: Database,
    fallback: Option<FamilyName>,
    faces: Mutex<FxHashMap<ID, Arc<Font<'static>>>>,
    /// Families already reported as replaced by the fallback.
    substituted: Mutex<FxHashSet<String>>,
}

impl FontBook {
    pub fn new(sources: &FontSources) -> Self {
        let mut db = Database::new();
        if sources.system {
            db.load_system_fonts();
        }
        for path in &sources.dirs {
            if path.is_file() {
                if let Err(e) = db.load_font_file(path) {
                    log!("fonts"; "failed to load {}: {}", path.display(), e);
                }
            } else if path.is_dir() {
                db.load_fonts_dir(path);
            } else {
                log!("fonts"; "font path not found: {}", path.display());
            }
        }

        assign_generic_families(&mut db);
        debug!("fonts"; "loaded {} font faces", db.len());

        Self {
            db,
            fallback: sources.fallback.as_deref().map(FamilyName::parse),
            faces: Mutex::new(FxHashMap::default()),
            substituted: Mutex::new(FxHashSet::default()),
        }
    }

    /// A book of the fonts installed on this machine.
    pub fn system() -> Self {
        Self::new(&FontSources::default())
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Sorted, deduplicated family names of every loaded face.
    pub fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Resolve and load the face matching `descriptor`.
    pub fn resolve(&self, descriptor: &FontDescriptor) -> Result<Arc<Font<'static>>, ImageError> {
        let id = match self.query(&descriptor.family, descriptor) {
            Some(id) => id,
            None => {
                let fallback = self.fallback.as_ref().ok_or_else(|| {
                    ImageError::font(descriptor.to_string(), "family is not installed")
                })?;
                if self.substituted.lock().insert(descriptor.family.to_string()) {
                    log!("fonts"; "`{}` is not installed, using `{}`", descriptor.family, fallback);
                }
                self.query(fallback, descriptor).ok_or_else(|| {
                    ImageError::font(
                        descriptor.to_string(),
                        format!("family and fallback `{fallback}` are not installed"),
                    )
                })?
            }
        };

        self.load(id)
            .ok_or_else(|| ImageError::font(descriptor.to_string(), "font data is unreadable"))
    }

    fn query(&self, family: &FamilyName, descriptor: &FontDescriptor) -> Option<ID> {
        let families = [family.as_family()];
        self.db.query(&Query {
            families: &families,
            weight: descriptor.weight,
            stretch: Stretch::Normal,
            style: descriptor.style,
        })
    }

    fn load(&self, id: ID) -> Option<Arc<Font<'static>>> {
        if let Some(font) = self.faces.lock().get(&id) {
            return Some(Arc::clone(font));
        }

        // Parse outside the lock; a racing thread may parse the same face.
        let font = self
            .db
            .with_face_data(id, |data, index| {
                Font::try_from_vec_and_index(data.to_vec(), index)
            })
            .flatten()?;
        let font = Arc::new(font);

        let mut faces = self.faces.lock();
        Some(Arc::clone(faces.entry(id).or_insert(font)))
    }
}

/// Point the generic families at faces that actually exist.
fn assign_generic_families(db: &mut Database) {
    let installed = |name: &str| {
        db.faces()
            .any(|face| face.families.iter().any(|(family, _)| family == name))
    };
    let first_face = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());

    let sans = pick(SANS_SERIF_CANDIDATES, installed).or_else(|| first_face.clone());
    let serif = pick(SERIF_CANDIDATES, installed).or_else(|| sans.clone());
    let mono = pick(MONOSPACE_CANDIDATES, installed).or_else(|| sans.clone());

    if let Some(name) = sans {
        db.set_sans_serif_family(name);
    }
    if let Some(name) = serif {
        db.set_serif_family(name);
    }
    if let Some(name) = mono {
        db.set_monospace_family(name);
    }
}

fn pick(candidates: &[&str], installed: impl Fn(&str) -> bool) -> Option<String> {
    candidates
        .iter()
        .find(|name| installed(name))
        .map(|name| (*name).to_string())
}

/// Shared system font book for tests that render real glyphs.
///
/// Returns `None` on machines without any installed fonts so those tests
/// can skip themselves.
#[cfg(test)]
pub fn test_book() -> Option<&'static FontBook> {
    use std::sync::LazyLock;

    static BOOK: LazyLock<FontBook> = LazyLock::new(FontBook::system);
    (!BOOK.is_empty()).then(|| &*BOOK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book() {
        let book = FontBook::new(&FontSources {
            system: false,
            dirs: Vec::new(),
            fallback: None,
        });
        assert!(book.is_empty());
        assert!(book.families().is_empty());

        let err = book.resolve(&FontDescriptor::default()).unwrap_err();
        assert!(matches!(err, ImageError::FontResolution { .. }));
    }

    #[test]
    fn test_missing_dir_is_not_fatal() {
        let book = FontBook::new(&FontSources {
            system: false,
            dirs: vec![PathBuf::from("/definitely/not/a/font/dir")],
            fallback: None,
        });
        assert!(book.is_empty());
    }

    #[test]
    fn test_unknown_family_without_fallback() {
        let Some(book) = test_book() else { return };
        let descriptor: FontDescriptor = "No Such Family Anywhere, Bold".parse().unwrap();
        let err = book.resolve(&descriptor).unwrap_err();
        assert!(err.to_string().contains("not installed"));
    }

    #[test]
    fn test_unknown_family_with_fallback() {
        let Some(book) = test_book() else { return };
        let Some(family) = book.families().into_iter().next() else { return };

        let with_fallback = FontBook::new(&FontSources {
            fallback: Some(family),
            ..FontSources::default()
        });
        let descriptor: FontDescriptor = "No Such Family Anywhere".parse().unwrap();
        assert!(with_fallback.resolve(&descriptor).is_ok());
        assert!(with_fallback.resolve(&descriptor).is_ok());

        // Reported once per family, however often it is resolved.
        let substituted = with_fallback.substituted.lock();
        assert_eq!(substituted.len(), 1);
        assert!(substituted.contains(&descriptor.family.to_string()));
    }

    #[test]
    fn test_generic_family_resolves() {
        let Some(book) = test_book() else { return };
        assert!(book.resolve(&FontDescriptor::default()).is_ok());
    }

    #[test]
    fn test_faces_are_cached() {
        let Some(book) = test_book() else { return };
        let a = book.resolve(&FontDescriptor::default()).unwrap();
        let b = book.resolve(&FontDescriptor::default()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
