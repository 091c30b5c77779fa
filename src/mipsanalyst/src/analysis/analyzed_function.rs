/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::addresses::{AddressRange, Size, Vram};

/// A function recovered by the boundary scanner, before it gets turned into a symbol.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnalyzedFunction {
    start: Vram,
    end: Vram,
    is_straight_leaf: bool,
    suspected_no_return: bool,
}

impl AnalyzedFunction {
    #[must_use]
    pub const fn new(
        start: Vram,
        end: Vram,
        is_straight_leaf: bool,
        suspected_no_return: bool,
    ) -> Self {
        Self {
            start,
            end,
            is_straight_leaf,
            suspected_no_return,
        }
    }

    #[must_use]
    pub const fn start(&self) -> Vram {
        self.start
    }
    /// First address past the function, including its delay slot and alignment padding.
    #[must_use]
    pub const fn end(&self) -> Vram {
        self.end
    }
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.end.inner().saturating_sub(self.start.inner()))
    }
    #[must_use]
    pub fn vram_range(&self) -> AddressRange<Vram> {
        AddressRange::from_start_and_size(self.start, self.size())
    }

    /// No branches, no calls. Only the final `jr $ra` transfers control.
    #[must_use]
    pub const fn is_straight_leaf(&self) -> bool {
        self.is_straight_leaf
    }
    /// The function ends in a loop to itself with nothing jumping past it.
    #[must_use]
    pub const fn suspected_no_return(&self) -> bool {
        self.suspected_no_return
    }
}
