/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::{
    addresses::{Size, Vram},
    memory::MemoryReader,
    symbols::FunctionSymbol,
};

/// Functions bigger than this are never hashed.
pub const MAX_HASHED_FUNCTION_SIZE: Size = Size::new(1024 * 1024);

const CRC32_POLYNOMIAL: u32 = 0xEDB88320;

static CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC32_POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Running CRC-32 over the words of a function.
///
/// Words are fed as little endian bytes, so the hash doesn't depend on the byte order of the
/// image the code was read from.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FunctionHash {
    hash: u32,
}

impl FunctionHash {
    #[must_use]
    pub const fn new() -> Self {
        Self { hash: 0 }
    }

    pub fn update_bytes(&mut self, bytes: &[u8]) {
        let mut crc = !self.hash;
        for b in bytes {
            crc = CRC32_TABLE[usize::from((crc as u8) ^ b)] ^ (crc >> 8);
        }
        self.hash = !crc;
    }

    pub fn update(&mut self, word: u32) {
        self.update_bytes(&word.to_le_bytes());
    }

    #[must_use]
    pub const fn get(&self) -> u32 {
        self.hash
    }
}

/// Hashes the code of `symbol` as it currently is in memory.
///
/// `None` if the symbol has no size yet or is too big to be a real function.
#[must_use]
pub fn hash_function<R: MemoryReader>(symbol: &FunctionSymbol, reader: &R) -> Option<FunctionHash> {
    let size = symbol.size();
    if size.is_empty() || size > MAX_HASHED_FUNCTION_SIZE {
        return None;
    }

    let start = symbol.address().inner();
    let end = start.checked_add(size.inner())?;

    let mut hash = FunctionHash::new();
    for address in (start..end).step_by(4) {
        hash.update(reader.read32(Vram::new(address)));
    }
    Some(hash)
}
