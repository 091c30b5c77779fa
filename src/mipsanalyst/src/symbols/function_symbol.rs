/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::sync::Arc;

use crate::addresses::{AddressRange, Size, SizedAddress, Vram};

use super::SymbolSourceHandle;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FunctionSymbol {
    name: Arc<str>,
    address: Vram,
    /// Zero while unknown.
    size: Size,
    source: SymbolSourceHandle,
    is_no_return: bool,
    original_hash: Option<u32>,
}

impl FunctionSymbol {
    pub(crate) fn new(name: Arc<str>, address: Vram, source: SymbolSourceHandle) -> Self {
        Self {
            name,
            address,
            size: Size::new(0),
            source,
            is_no_return: false,
            original_hash: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub const fn address(&self) -> Vram {
        self.address
    }
    #[must_use]
    pub const fn source(&self) -> SymbolSourceHandle {
        self.source
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// `None` while the size is unknown.
    #[must_use]
    pub fn vram_range(&self) -> Option<AddressRange<Vram>> {
        if self.size.is_empty() {
            None
        } else {
            Some(AddressRange::from_start_and_size(self.address, self.size))
        }
    }

    #[must_use]
    pub const fn is_no_return(&self) -> bool {
        self.is_no_return
    }
    pub fn set_no_return(&mut self, is_no_return: bool) {
        self.is_no_return = is_no_return;
    }

    /// Hash of the function's code at the time it was first analyzed.
    #[must_use]
    pub const fn original_hash(&self) -> Option<u32> {
        self.original_hash
    }
    pub fn set_original_hash(&mut self, hash: u32) {
        self.original_hash = Some(hash);
    }
}

impl SizedAddress for FunctionSymbol {
    fn size(&self) -> Option<Size> {
        if self.size.is_empty() {
            None
        } else {
            Some(self.size)
        }
    }
}
