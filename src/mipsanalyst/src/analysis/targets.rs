/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

//! Static control flow targets.
//!
//! Every query here only looks at the instruction word, never at register contents, so they are
//! safe to run over code that isn't executing.

use crate::{
    addresses::{Size, Vram},
    memory::MemoryReader,
    opcodes::{classify, encode, BranchType, CondType},
};

/// PC-relative target of a branch, relative to its delay slot.
pub(crate) const fn pc_relative(address: Vram, word: u32) -> Vram {
    let offset = (encode::imm16(word) as i32) << 2;
    Vram::new(address.inner().wrapping_add(4).wrapping_add_signed(offset))
}

/// Top nibble of `address`, the 256MiB region reachable by `j`/`jal`.
pub(crate) const fn region(address: Vram) -> u32 {
    address.inner() & 0xF0000000
}

/// Absolute target of a 26-bit jump, inside the 256MiB region of `address`.
pub(crate) const fn region_jump(address: Vram, word: u32) -> Vram {
    Vram::new(region(address) | (encode::target26(word) << 2))
}

/// Target of the `j` or `jal` at `address`.
#[must_use]
pub fn jump_target<R: MemoryReader>(reader: &R, address: Vram) -> Option<Vram> {
    let word = reader.read32(address);

    match classify(word).branch_type() {
        Some(BranchType::Jump) => Some(region_jump(address, word)),
        _ => None,
    }
}

/// Target of the conditional branch at `address`, including `bc0x` and `bc1x`.
#[must_use]
pub fn branch_target<R: MemoryReader>(reader: &R, address: Vram) -> Option<Vram> {
    let word = reader.read32(address);

    match classify(word).branch_type() {
        Some(BranchType::Branch | BranchType::Bc1 | BranchType::Bc0) => {
            Some(pc_relative(address, word))
        }
        _ => None,
    }
}

/// Like [`branch_target`], but linked branches (`bltzal`, `bgezal`, ...) are ignored since they
/// behave like calls.
#[must_use]
pub fn branch_target_no_ra<R: MemoryReader>(reader: &R, address: Vram) -> Option<Vram> {
    let word = reader.read32(address);
    let descriptor = classify(word);

    if descriptor.is_linked() {
        return None;
    }
    match descriptor.branch_type() {
        Some(BranchType::Branch | BranchType::Bc1 | BranchType::Bc0) => {
            Some(pc_relative(address, word))
        }
        _ => None,
    }
}

/// Where the branch at `address` will certainly end up, if that can be told without knowing any
/// register.
///
/// Only comparisons of a register against itself and of `$zero` against zero are understood.
/// A branch that is certainly not taken continues after its delay slot.
#[must_use]
pub fn sure_branch_target<R: MemoryReader>(reader: &R, address: Vram) -> Option<Vram> {
    let word = reader.read32(address);
    let descriptor = classify(word);

    if descriptor.branch_type() != Some(BranchType::Branch) {
        return None;
    }

    let rs = encode::rs(word);
    let rt = encode::rt(word);
    let (sure, take_branch) = match descriptor.condition()? {
        CondType::Eq => (rs == rt, true),
        CondType::Ne => (rs == rt, false),
        CondType::Lez | CondType::Gez => (rs == 0, true),
        CondType::Ltz | CondType::Gtz => (rs == 0, false),
    };

    match (sure, take_branch) {
        (true, true) => Some(pc_relative(address, word)),
        (true, false) => Some(address + Size::new(8)),
        (false, _) => None,
    }
}
