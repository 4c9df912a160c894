//! Parsing of choco list output.

use std::collections::HashMap;

/// Field separator in `choco list -r` output.
pub const LIST_DELIMITER: char = '|';

/// A name → version lookup built from one list query.
///
/// Names are case-folded on insert and on lookup, so queries match
/// regardless of the casing used in a declaration or in choco's own
/// output. A line without the delimiter is kept as a name-only entry
/// with an absent version.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    entries: HashMap<String, Option<String>>,
}

impl Listing {
    /// Parse raw list output, one `name|version` record per line.
    ///
    /// Carriage returns are stripped (choco runs on Windows), empty lines
    /// are skipped, and the last occurrence wins if a name repeats.
    pub fn parse(raw: &str) -> Self {
        let mut entries = HashMap::new();

        for line in raw.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            match line.split_once(LIST_DELIMITER) {
                Some((name, version)) => {
                    entries.insert(name.to_lowercase(), Some(version.to_string()));
                }
                None => {
                    entries.insert(line.to_lowercase(), None);
                }
            }
        }

        Self { entries }
    }

    /// Version recorded for `name`, if the listing has one.
    pub fn version_of(&self, name: &str) -> Option<String> {
        self.entries.get(&name.to_lowercase()).cloned().flatten()
    }

    /// Whether the listing mentions `name` at all, versioned or not.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
