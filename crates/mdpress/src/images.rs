use std::collections::HashMap;
use std::path::PathBuf;

use crate::assets;
use crate::render::ImageResolver;

/// Memoized image resolution for the current document.
///
/// Every document load bumps the generation stamp and drops old entries.
/// Asynchronous work started against an earlier document (watcher reloads,
/// deferred resolutions) carries the stamp it was started with; results whose
/// stamp is no longer current are discarded instead of overwriting output
/// that belongs to a newer document.
#[derive(Debug, Default)]
pub struct ImageCache {
    base: Option<PathBuf>,
    generation: u64,
    resolved: HashMap<String, Option<String>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Point the cache at a new document. Returns the new generation stamp.
    /// `base` is the document path images resolve against; `None` for an
    /// unsaved buffer, in which case nothing embeds.
    pub fn retarget(&mut self, base: Option<PathBuf>) -> u64 {
        self.base = base;
        self.resolved.clear();
        self.generation += 1;
        self.generation
    }

    /// Drop memoized entries but keep the base and generation. Used when the
    /// document file changes on disk: images next to it may have changed too,
    /// while the watcher's stamp must stay valid.
    pub fn invalidate(&mut self) {
        self.resolved.clear();
    }
}

impl ImageResolver for ImageCache {
    fn resolve(&mut self, reference: &str) -> Option<String> {
        let base = self.base.as_deref()?;
        if let Some(hit) = self.resolved.get(reference) {
            return hit.clone();
        }
        let path = assets::resolve_path(base, reference);
        let value = match assets::image_data_url(&path) {
            Ok(url) => Some(url),
            Err(err) => {
                // Per-image failure: keep the original (likely broken)
                // reference and carry on with the render.
                eprintln!("mdpress: could not embed {reference}: {err:#}");
                None
            }
        };
        self.resolved.insert(reference.to_string(), value.clone());
        value
    }
}
