use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::error::{LayoutError, Result};
use crate::geometry::Rect;
use crate::style::Rgb;
use crate::tree::Tree;

/// Last known state of one named box.
#[derive(Debug, Clone)]
pub struct BoxState {
    pub rect: Rect,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub content: String,
    hash: Option<Hash>,
    pub is_dirty: bool,
}

impl BoxState {
    fn new(rect: Rect, fg: Option<Rgb>, bg: Option<Rgb>) -> Self {
        Self {
            rect,
            fg,
            bg,
            content: String::new(),
            hash: None,
            is_dirty: true,
        }
    }

    fn update_content(&mut self, content: String) {
        let new_hash = blake3::hash(content.as_bytes());
        if self.hash.map(|h| h != new_hash).unwrap_or(true) {
            self.content = content;
            self.hash = Some(new_hash);
            self.is_dirty = true;
        }
    }
}

/// Registry mapping named boxes to their last known states.
///
/// Trees are rebuilt from scratch on every resize, so the box name — not
/// the arena id — is the stable key.
#[derive(Debug, Default)]
pub struct BoxRegistry {
    entries: HashMap<String, BoxState>,
    dirty: HashSet<String>,
}

impl BoxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a freshly solved tree: named boxes whose rect moved (or that
    /// appeared for the first time) become dirty, names that vanished are
    /// dropped.
    pub fn sync_layout(&mut self, tree: &Tree) {
        use std::collections::hash_map::Entry;

        let mut seen = HashSet::new();
        let mut newly_dirty = Vec::new();

        for id in tree.post_order() {
            let node = tree.node(id);
            let Some(name) = node.name() else {
                continue;
            };
            seen.insert(name.to_string());
            let rect = node.rect();
            let (fg, bg) = (node.style.fg, node.style.bg);

            match self.entries.entry(name.to_string()) {
                Entry::Occupied(mut entry) => {
                    let state = entry.get_mut();
                    if state.rect != rect || state.fg != fg || state.bg != bg {
                        state.rect = rect;
                        state.fg = fg;
                        state.bg = bg;
                        state.is_dirty = true;
                        newly_dirty.push(name.to_string());
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(BoxState::new(rect, fg, bg));
                    newly_dirty.push(name.to_string());
                }
            }
        }

        // Remove boxes no longer present in the rebuilt tree.
        let to_remove: Vec<_> = self
            .entries
            .keys()
            .filter(|name| !seen.contains(*name))
            .cloned()
            .collect();
        for name in to_remove {
            self.entries.remove(&name);
            self.dirty.remove(&name);
        }

        for name in newly_dirty {
            self.dirty.insert(name);
        }
    }

    /// Store host content for a named box; unchanged content (by blake3
    /// hash) does not re-dirty the box.
    pub fn apply_content(&mut self, name: &str, content: String) -> Result<()> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| LayoutError::BoxNotFound(name.to_string()))?;
        entry.update_content(content);
        if entry.is_dirty {
            self.dirty.insert(name.to_string());
        }
        Ok(())
    }

    /// Drain every dirty box for the renderer.
    pub fn take_dirty(&mut self) -> Vec<(String, BoxState)> {
        let names: Vec<_> = self.dirty.drain().collect();
        names
            .into_iter()
            .filter_map(|name| {
                self.entries.get_mut(&name).map(|state| {
                    state.is_dirty = false;
                    (name.clone(), state.clone())
                })
            })
            .collect()
    }

    pub fn rect_of(&self, name: &str) -> Option<Rect> {
        self.entries.get(name).map(|state| state.rect)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}
