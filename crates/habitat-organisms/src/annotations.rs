//! Renderer-owned per-organism data.
//!
//! Renderers often want to attach their own data to an organism (a sprite
//! handle, a colour, a trail). Frozen states cannot carry it, so it lives
//! in this side table keyed by [`OrganismId`] and survives from one tick's
//! snapshot to the next. The table never touches organism state.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use habitat_types::OrganismId;

/// Thread-safe map from organism id to a renderer annotation.
#[derive(Debug)]
pub struct RenderAnnotations<T> {
    entries: RwLock<HashMap<OrganismId, T>>,
}

impl<T> Default for RenderAnnotations<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> RenderAnnotations<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `annotation` to `organism`, returning the previous one.
    pub fn set(&self, organism: OrganismId, annotation: T) -> Option<T> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(organism, annotation)
    }

    /// Detach and return the annotation for `organism`.
    pub fn remove(&self, organism: OrganismId) -> Option<T> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&organism)
    }

    /// Keep only annotations whose organism passes `keep`.
    ///
    /// Renderers call this with the set of organisms still in the world to
    /// drop annotations of organisms that have been removed.
    pub fn retain(&self, mut keep: impl FnMut(OrganismId) -> bool) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|id, _| keep(*id));
    }

    /// Number of annotated organisms.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no organism is annotated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> RenderAnnotations<T> {
    /// A copy of the annotation for `organism`.
    pub fn get(&self, organism: OrganismId) -> Option<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&organism)
            .cloned()
    }
}
