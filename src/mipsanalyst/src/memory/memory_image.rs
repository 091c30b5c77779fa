/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;

use crate::{
    addresses::{AddressRange, Size, Vram},
    config::Endian,
};

use super::MemoryReader;

/// A flat, static chunk of memory mapped at a fixed address.
///
/// This is what the function scanner usually reads from: a dump of a text section or of the whole
/// main RAM.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct MemoryImage {
    vram: Vram,
    bytes: Vec<u8>,
    endian: Endian,
}

impl MemoryImage {
    #[must_use]
    pub fn new(vram: Vram, bytes: Vec<u8>, endian: Endian) -> Self {
        Self {
            vram,
            bytes,
            endian,
        }
    }

    /// Lays out `words` contiguously starting at `vram`, little endian.
    #[must_use]
    pub fn from_words(vram: Vram, words: &[u32]) -> Self {
        let endian = Endian::Little;
        let bytes = words
            .iter()
            .flat_map(|w| endian.bytes_from_word(*w))
            .collect();

        Self::new(vram, bytes, endian)
    }

    #[must_use]
    pub const fn vram(&self) -> Vram {
        self.vram
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.bytes.len() as u32)
    }

    #[must_use]
    pub fn vram_range(&self) -> AddressRange<Vram> {
        AddressRange::new(self.vram, self.vram + self.size())
    }

    /// Address of the last full word of the image, if there's any.
    #[must_use]
    pub fn last_word(&self) -> Option<Vram> {
        let len = self.bytes.len() as u32;
        if len < 4 {
            None
        } else {
            Some(self.vram + Size::new((len - 4) & !3))
        }
    }

    fn offset_of(&self, address: Vram) -> Option<usize> {
        if address < self.vram {
            return None;
        }
        let offset = (address.inner() - self.vram.inner()) as usize;
        if offset < self.bytes.len() {
            Some(offset)
        } else {
            None
        }
    }
}

impl MemoryReader for MemoryImage {
    fn read32(&self, address: Vram) -> u32 {
        self.offset_of(address)
            .and_then(|offset| self.bytes.get(offset..offset + 4))
            .and_then(|b| self.endian.word_from_bytes(b))
            .unwrap_or(0)
    }

    fn is_valid_address(&self, address: Vram) -> bool {
        self.offset_of(address).is_some()
    }
}
