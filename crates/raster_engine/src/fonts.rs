//! Font resolution
//!
//! Fonts are resolved by family and weight through font-kit's system
//! source, falling back to the platform sans-serif family. The detached
//! export render has no ambient style context, so every run resolves its
//! font here; a run whose family cannot be resolved at all is degraded by
//! the painter, never fatal.

use font_kit::family_name::FamilyName;
use font_kit::properties::{Properties, Weight};
use font_kit::source::SystemSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A loaded font: raw data plus the face index inside it
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub data: Arc<Vec<u8>>,
    pub index: u32,
}

impl LoadedFont {
    /// Parse a shaping face from the font data
    ///
    /// The face borrows `data`, so it is built per use rather than cached.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontKey {
    family: String,
    weight: u16,
}

/// Resolves and caches fonts by family and weight
///
/// Failed lookups are cached too, so a missing family costs one system
/// query rather than one per text run.
pub struct FontLibrary {
    source: SystemSource,
    cache: Mutex<HashMap<FontKey, Option<Arc<LoadedFont>>>>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("cached", &self.cache.lock().unwrap().len())
            .finish()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self {
            source: SystemSource::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a font for a family and weight, trying the named family
    /// first and the platform sans-serif second
    pub fn resolve(&self, family: &str, weight: u16) -> Option<Arc<LoadedFont>> {
        let key = FontKey {
            family: family.to_lowercase(),
            weight,
        };

        if let Some(cached) = self.cache.lock().unwrap().get(&key) {
            return cached.clone();
        }

        let resolved = self.lookup(family, weight);
        if resolved.is_none() {
            tracing::warn!(family, weight, "font not resolvable; runs will degrade");
        }
        self.cache.lock().unwrap().insert(key, resolved.clone());
        resolved
    }

    fn lookup(&self, family: &str, weight: u16) -> Option<Arc<LoadedFont>> {
        let mut properties = Properties::new();
        properties.weight = Weight(weight as f32);
        let families = [
            FamilyName::Title(family.to_string()),
            FamilyName::SansSerif,
        ];

        let handle = self.source.select_best_match(&families, &properties).ok()?;
        let index = match &handle {
            font_kit::handle::Handle::Path { font_index, .. } => *font_index,
            font_kit::handle::Handle::Memory { font_index, .. } => *font_index,
        };
        let font = handle.load().ok()?;
        let data = font.copy_font_data()?;

        Some(Arc::new(LoadedFont { data, index }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_lookups_are_cached() {
        let library = FontLibrary::new();
        // Whatever the environment resolves, asking twice must hit the
        // cache the second time and agree with the first answer.
        let first = library.resolve("Definitely Not A Real Family 123", 400);
        let second = library.resolve("Definitely Not A Real Family 123", 400);
        assert_eq!(first.is_some(), second.is_some());
    }
}
