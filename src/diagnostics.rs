use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

/// Occurrence counts for tags the flattener does not recognize. Threaded
/// through the extraction and returned next to the result so no state
/// survives across calls. Informational only — an unknown tag costs its
/// subtree's text, never the run.
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    pub unknown_tags: BTreeMap<String, u64>,
}

impl Diagnostics {
    /// Count one sighting of an unrecognized tag, logging only the first.
    pub fn unknown_tag(&mut self, tag: &str) {
        let count = self.unknown_tags.entry(tag.to_string()).or_insert(0);
        if *count == 0 {
            warn!(tag, "unknown tag skipped during flatten");
        }
        *count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.unknown_tags.is_empty()
    }
}

// ── Tests ──
