/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use bitflags::bitflags;

bitflags! {
    /// Boolean properties of an opcode that are orthogonal to its category.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    pub struct OpcodeFlags: u32 {
        /// Writes the return address register (`jal`, `jalr`, `bltzal`, ...).
        const LINKED = 1 << 0;
        /// The delay slot is only executed if the branch is taken.
        const LIKELY = 1 << 1;

        const LOAD = 1 << 2;
        const STORE = 1 << 3;
        /// `lwl`, `swl`, `ldl`, `sdl`.
        const LEFT = 1 << 4;
        /// `lwr`, `swr`, `ldr`, `sdr`.
        const RIGHT = 1 << 5;

        /// The ALU result is worth showing as an address (`addiu`, `addu`, `subu`, ...).
        const ALU_ADDRESS = 1 << 6;
    }
}

/// How an opcode transfers control.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BranchType {
    /// `j` and `jal`, 26-bit region-relative target.
    Jump,
    /// PC-relative conditional branch comparing GPRs.
    Branch,
    /// `jr` and `jalr`.
    Register,
    Syscall,
    Eret,
    /// Branch on the FPU condition flag.
    Bc1,
    /// Branch on the COP0 condition line.
    Bc0,
}

/// Comparison performed by a conditional branch or conditional move.
///
/// For `bc0`/`bc1` and `movz`/`movn`, `Eq` means "flag clear" / "rt is zero" and `Ne` means the
/// opposite.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum CondType {
    Eq,
    Ne,
    Lez,
    Gtz,
    Ltz,
    Gez,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemType {
    Byte,
    Half,
    Word,
    Dword,
    Qword,
}

impl MemType {
    #[must_use]
    pub const fn size(self) -> u32 {
        match self {
            MemType::Byte => 1,
            MemType::Half => 2,
            MemType::Word => 4,
            MemType::Dword => 8,
            MemType::Qword => 16,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AluType {
    Addi,
    Add,
    Sub,
    CondMove,
}

/// Which half of an unaligned access a partial load/store handles.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadStoreSide {
    Left,
    Right,
}
