/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use object::elf;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElfSectionType {
    Progbits(ProgbitsType),
    Nobits,
}

impl ElfSectionType {
    pub fn new(sh_type: u32, sh_flags: u32) -> Option<Self> {
        match sh_type {
            elf::SHT_PROGBITS => Some(ElfSectionType::Progbits(ProgbitsType::new(sh_flags))),
            elf::SHT_NOBITS => Some(ElfSectionType::Nobits),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgbitsType {
    Text,
    Data,
    Unknown,
}

impl ProgbitsType {
    fn new(sh_flags: u32) -> Self {
        if sh_flags & elf::SHF_ALLOC == 0 {
            ProgbitsType::Unknown
        } else if sh_flags & elf::SHF_EXECINSTR != 0 {
            ProgbitsType::Text
        } else {
            ProgbitsType::Data
        }
    }
}
