/* SPDX-FileCopyrightText: © 2024-2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

/// Byte order of a memory image.
///
/// Both the EE and the IOP are little endian, but big endian images show up when feeding the
/// analyzer with dumps produced by other tools.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Endian {
    Big,
    #[default]
    Little,
}

impl Endian {
    /// Returns `None` if `bytes` is not exactly 4 bytes long.
    #[must_use]
    pub fn word_from_bytes(self, bytes: &[u8]) -> Option<u32> {
        let x = bytes.try_into().ok()?;

        Some(match self {
            Endian::Big => u32::from_be_bytes(x),
            Endian::Little => u32::from_le_bytes(x),
        })
    }

    #[must_use]
    pub fn bytes_from_word(self, word: u32) -> [u8; 4] {
        match self {
            Endian::Big => word.to_be_bytes(),
            Endian::Little => word.to_le_bytes(),
        }
    }
}
