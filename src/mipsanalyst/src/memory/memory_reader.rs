/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::addresses::Vram;

/// Read-only view of the emulated address space.
///
/// Implementors must not fail: reading an unmapped address yields whatever the platform would
/// return for it, which for every realization in this crate is zero.
pub trait MemoryReader {
    fn read32(&self, address: Vram) -> u32;

    fn is_valid_address(&self, address: Vram) -> bool;
}

impl<T> MemoryReader for &T
where
    T: MemoryReader + ?Sized,
{
    fn read32(&self, address: Vram) -> u32 {
        (**self).read32(address)
    }

    fn is_valid_address(&self, address: Vram) -> bool {
        (**self).is_valid_address(address)
    }
}
