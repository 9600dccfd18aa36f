// Licensed under the Apache-2.0 license

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Files a generation run created and deleted.
///
/// Overwriting a file records it in both sets; such files are reported as
/// [`Change::Replaced`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    added: BTreeSet<PathBuf>,
    removed: BTreeSet<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
    Replaced,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Change::Added => "added",
            Change::Removed => "removed",
            Change::Replaced => "replaced",
        })
    }
}

impl Manifest {
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        self.added.insert(path.into());
    }

    pub fn remove(&mut self, path: impl Into<PathBuf>) {
        self.removed.insert(path.into());
    }

    pub fn added(&self) -> &BTreeSet<PathBuf> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    /// Files present in both sets.
    pub fn replaced(&self) -> impl Iterator<Item = &Path> + '_ {
        self.added
            .intersection(&self.removed)
            .map(PathBuf::as_path)
    }

    /// Every touched file once, in path order.
    pub fn changes(&self) -> Vec<(Change, &Path)> {
        self.added
            .union(&self.removed)
            .map(|path| {
                let change = match (self.added.contains(path), self.removed.contains(path)) {
                    (true, true) => Change::Replaced,
                    (true, false) => Change::Added,
                    _ => Change::Removed,
                };
                (change, path.as_path())
            })
            .collect()
    }
}
