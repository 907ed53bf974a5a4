//! Entity identifiers mined from responses, used to fill `{id}` templates.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

/// Only this many leading entries of a response are mined for identifiers
pub const MAX_ENTRIES_SCANNED: usize = 5;

/// Kind of entity an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    LibraryItem,
    Highlight,
    Tag,
    Collection,
}

impl EntityKind {
    /// Matching order for endpoint paths; earlier kinds win
    pub const ALL: [EntityKind; 4] = [
        EntityKind::LibraryItem,
        EntityKind::Highlight,
        EntityKind::Tag,
        EntityKind::Collection,
    ];

    /// Path segment that identifies endpoints of this kind
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityKind::LibraryItem => "library_items/",
            EntityKind::Highlight => "highlights/",
            EntityKind::Tag => "tags/",
            EntityKind::Collection => "collections/",
        }
    }

    /// First kind whose segment appears anywhere in `path`
    pub fn mentioned_in(path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| path.contains(kind.path_segment()))
    }

    /// Kind whose segment starts `template`
    pub fn from_template_prefix(template: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| template.starts_with(kind.path_segment()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::LibraryItem => "library_item",
            EntityKind::Highlight => "highlight",
            EntityKind::Tag => "tag",
            EntityKind::Collection => "collection",
        };
        f.write_str(name)
    }
}

/// Per-kind identifiers in first-seen order, without duplicates
#[derive(Debug, Clone, Default)]
pub struct IdentifierStore {
    ids: HashMap<EntityKind, Vec<String>>,
}

impl IdentifierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, kind: EntityKind, id: impl Into<String>) -> bool {
        let id = id.into();
        let ids = self.ids.entry(kind).or_default();
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    pub fn get(&self, kind: EntityKind) -> &[String] {
        self.ids.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.ids.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mine identifiers from a successful response body into `store`.
///
/// Returns how many new identifiers were stored. Bodies or entries that do
/// not have the expected shape are skipped.
pub fn extract_ids(path: &str, body: &Value, store: &mut IdentifierStore) -> usize {
    let Some(kind) = EntityKind::mentioned_in(path) else {
        return 0;
    };

    let entries = match kind {
        EntityKind::LibraryItem | EntityKind::Highlight => body.get("feed").and_then(Value::as_array),
        EntityKind::Tag | EntityKind::Collection => body.as_array(),
    };

    let Some(entries) = entries else {
        debug!(path, %kind, "Response has no identifier list, skipping extraction");
        return 0;
    };

    let mut added = 0;
    for entry in entries.iter().take(MAX_ENTRIES_SCANNED) {
        let mut candidates = vec![entry.get("id")];
        if kind == EntityKind::LibraryItem {
            candidates.push(entry.get("content").and_then(|content| content.get("id")));
        }

        for candidate in candidates.into_iter().flatten() {
            match identifier(candidate) {
                Some(id) => {
                    if store.insert(kind, id) {
                        added += 1;
                    }
                }
                None => trace!(path, %kind, value = %candidate, "Ignoring non-identifier value"),
            }
        }
    }

    if added > 0 {
        debug!(path, %kind, added, "Collected identifiers");
    }
    added
}

/// Non-empty strings and numbers are usable identifiers
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
