//! Rewrite report — a record of every rewrite the passes performed.

use serde::{Deserialize, Serialize};

/// Rewrites produced during one translation, in pass order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rewrites: Vec<Rewrite>,
}

/// A single rewrite record. `path` is a JSON Pointer into the schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rewrite {
    RefRewritten {
        path: String,
        from: String,
        to: String,
        /// Sibling keys that were discarded next to the `$ref`.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        dropped: Vec<String>,
    },
    NullableCollapsed {
        path: String,
        nullable_type: String,
    },
    DiscriminatorExtracted {
        path: String,
        property_name: String,
        cases: Vec<String>,
    },
    ConditionalExpanded {
        path: String,
    },
}

impl Rewrite {
    pub fn path(&self) -> &str {
        match self {
            Rewrite::RefRewritten { path, .. }
            | Rewrite::NullableCollapsed { path, .. }
            | Rewrite::DiscriminatorExtracted { path, .. }
            | Rewrite::ConditionalExpanded { path } => path,
        }
    }
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty()
    }

    /// Number of discriminators extracted.
    pub fn discriminators(&self) -> usize {
        self.rewrites
            .iter()
            .filter(|r| matches!(r, Rewrite::DiscriminatorExtracted { .. }))
            .count()
    }

    /// Number of conditionals expanded by material implication.
    pub fn expanded_conditionals(&self) -> usize {
        self.rewrites
            .iter()
            .filter(|r| matches!(r, Rewrite::ConditionalExpanded { .. }))
            .count()
    }
}
