/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

//! Raw field access and the handful of encodings the analyzer matches literally.

use crate::addresses::Vram;

/// `jr $ra`
pub const JR_RA: u32 = 0x03E00008;
pub const NOP: u32 = 0x00000000;

const OP_MASK: u32 = 0xFC000000;
const OP_J: u32 = 0x08000000;
const OP_JAL: u32 = 0x0C000000;
const TARGET_MASK: u32 = 0x03FFFFFF;

#[must_use]
pub const fn op(word: u32) -> u8 {
    (word >> 26) as u8
}
#[must_use]
pub const fn rs(word: u32) -> u8 {
    ((word >> 21) & 0x1F) as u8
}
#[must_use]
pub const fn rt(word: u32) -> u8 {
    ((word >> 16) & 0x1F) as u8
}
#[must_use]
pub const fn funct(word: u32) -> u8 {
    (word & 0x3F) as u8
}
#[must_use]
pub const fn imm16(word: u32) -> i16 {
    (word & 0xFFFF) as i16
}
#[must_use]
pub const fn target26(word: u32) -> u32 {
    word & TARGET_MASK
}

/// `j target`, without the link.
#[must_use]
pub const fn is_plain_jump(word: u32) -> bool {
    word & OP_MASK == OP_J
}
#[must_use]
pub const fn is_jal(word: u32) -> bool {
    word & OP_MASK == OP_JAL
}

/// `beq $zero, $zero, target`, the canonical unconditional branch.
#[must_use]
pub const fn is_branch_always(word: u32) -> bool {
    (word >> 16) == 0x1000
}

#[must_use]
pub const fn make_j(target: Vram) -> u32 {
    OP_J | ((target.inner() >> 2) & TARGET_MASK)
}
#[must_use]
pub const fn make_jal(target: Vram) -> u32 {
    OP_JAL | ((target.inner() >> 2) & TARGET_MASK)
}
