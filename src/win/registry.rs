//! Window registry: owns every live surface, keyed by handle identifier.
//!
//! The registry is the single owner of window resources. Removing an entry
//! drops its surface, which runs the backend release path exactly once;
//! that release is never skipped, even when an earlier operation on the
//! surface failed.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::term::Surface;

struct Entry {
    surface: Box<dyn Surface>,
    parent: Option<String>,
}

/// Mapping from handle identifier to its owned surface.
#[derive(Default)]
pub struct WindowRegistry {
    entries: HashMap<String, Entry>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a new handle. A collision means the allocator's uniqueness
    /// guarantee was violated somewhere upstream.
    pub fn register(
        &mut self,
        id: &str,
        surface: Box<dyn Surface>,
        parent: Option<&str>,
    ) -> Result<()> {
        if self.entries.contains_key(id) {
            return Err(Error::DuplicateHandle(id.to_string()));
        }
        debug!(handle = %id, parent = ?parent, "registered window");
        self.entries.insert(
            id.to_string(),
            Entry {
                surface,
                parent: parent.map(str::to_string),
            },
        );
        Ok(())
    }

    /// Borrow the live surface for a handle.
    pub fn resolve_mut(&mut self, id: &str) -> Result<&mut dyn Surface> {
        match self.entries.get_mut(id) {
            Some(entry) => Ok(entry.surface.as_mut()),
            None => Err(Error::HandleNotFound(id.to_string())),
        }
    }

    /// Whether a handle is currently registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destroy a handle and every registered descendant, children first.
    /// Destroying an unknown or already-destroyed handle is a no-op.
    /// Returns the identifiers actually removed.
    pub fn destroy(&mut self, id: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.destroy_inner(id, &mut removed);
        removed
    }

    fn destroy_inner(&mut self, id: &str, removed: &mut Vec<String>) {
        if !self.entries.contains_key(id) {
            return;
        }
        let children: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.parent.as_deref() == Some(id))
            .map(|(child, _)| child.clone())
            .collect();
        for child in children {
            self.destroy_inner(&child, removed);
        }
        // dropping the entry releases the surface
        self.entries.remove(id);
        debug!(handle = %id, "destroyed window");
        removed.push(id.to_string());
    }

    /// Destroy every handle. Returns the identifiers removed.
    pub fn destroy_all(&mut self) -> Vec<String> {
        let ids: Vec<String> = self.entries.keys().cloned().collect();
        let mut removed = Vec::new();
        for id in ids {
            // handles already removed by a parent's cascade are skipped
            self.destroy_inner(&id, &mut removed);
        }
        removed
    }
}
