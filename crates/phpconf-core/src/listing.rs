//! Enabled/available partition of the fragment store

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Fragments split into enabled and available-only, each sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub enabled: Vec<String>,
    pub available: Vec<String>,
}

/// Partition the available names by membership in `enabled`.
///
/// Names that are enabled but no longer available are ignored.
#[must_use]
pub fn partition(available: &BTreeSet<String>, enabled: &BTreeSet<String>) -> Listing {
    let (on, off): (Vec<&String>, Vec<&String>) =
        available.iter().partition(|name| enabled.contains(*name));
    Listing {
        enabled: on.into_iter().cloned().collect(),
        available: off.into_iter().cloned().collect(),
    }
}

impl Listing {
    /// Total number of available fragments
    #[must_use]
    pub fn total(&self) -> usize {
        self.enabled.len() + self.available.len()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config enabled ({} files):", self.enabled.len())?;
        for name in &self.enabled {
            writeln!(f, "  {name}")?;
        }
        writeln!(f, "Config available ({} files):", self.available.len())?;
        for name in &self.available {
            writeln!(f, "  {name}")?;
        }
        Ok(())
    }
}
