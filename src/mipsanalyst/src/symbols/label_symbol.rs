/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::sync::Arc;

use crate::addresses::{AddressRange, Size, SizedAddress, Vram};

use super::SymbolSourceHandle;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct LabelSymbol {
    name: Arc<str>,
    address: Vram,
    size: Option<Size>,
    /// The label doesn't name anything real, for example a local label emitted by an assembler.
    is_junk: bool,
    source: SymbolSourceHandle,
}

impl LabelSymbol {
    pub(crate) fn new(
        name: Arc<str>,
        address: Vram,
        size: Option<Size>,
        is_junk: bool,
        source: SymbolSourceHandle,
    ) -> Self {
        Self {
            name,
            address,
            size: size.filter(|s| !s.is_empty()),
            is_junk,
            source,
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
    pub fn vram_range(&self) -> Option<AddressRange<Vram>> {
        self.size
            .map(|size| AddressRange::from_start_and_size(self.address, size))
    }
    #[must_use]
    pub const fn is_junk(&self) -> bool {
        self.is_junk
    }
    #[must_use]
    pub const fn source(&self) -> SymbolSourceHandle {
        self.source
    }

    /// A real name always wins over a junk one.
    pub(crate) fn does_new_take_precedence(&self, new_is_junk: bool) -> bool {
        self.is_junk && !new_is_junk
    }
}

impl SizedAddress for LabelSymbol {
    fn size(&self) -> Option<Size> {
        self.size
    }
}
