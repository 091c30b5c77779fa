/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::sync::Arc;

/// Identifies the analysis pass or importer that created a symbol.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SymbolSourceHandle {
    inner: u32,
}

impl SymbolSourceHandle {
    pub(crate) const fn new(index: usize) -> Self {
        Self {
            inner: index as u32,
        }
    }

    pub(crate) const fn index(&self) -> usize {
        self.inner as usize
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SymbolSource {
    name: Arc<str>,
}

impl SymbolSource {
    pub(crate) fn new(name: Arc<str>) -> Self {
        Self { name }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
