/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use mipsanalyst::{
    addresses::Vram,
    memory::{MemoryImage, MemoryReader},
};

/// The loadable sections of an elf, each mapped at its own address.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ElfMemory {
    images: Vec<MemoryImage>,
}

impl ElfMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, image: MemoryImage) {
        self.images.push(image);
    }

    fn image_for(&self, address: Vram) -> Option<&MemoryImage> {
        self.images
            .iter()
            .find(|x| x.vram_range().in_range(address))
    }
}

impl MemoryReader for ElfMemory {
    fn read32(&self, address: Vram) -> u32 {
        self.image_for(address)
            .map(|x| x.read32(address))
            .unwrap_or(0)
    }

    fn is_valid_address(&self, address: Vram) -> bool {
        self.image_for(address).is_some()
    }
}
