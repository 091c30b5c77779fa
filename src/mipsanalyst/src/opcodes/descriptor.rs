/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use super::{AluType, BranchType, CondType, LoadStoreSide, MemType, OpcodeFlags};

/// Static classification of an opcode, as far as control flow and memory accesses go.
///
/// Descriptors live in `static` tables and are handed out as `&'static` references, so two
/// classifications of the same word are always the very same descriptor.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct OpcodeDescriptor {
    name: &'static str,
    flags: OpcodeFlags,
    branch: Option<BranchType>,
    condition: Option<CondType>,
    memory: Option<MemType>,
    alu: Option<AluType>,
}

impl OpcodeDescriptor {
    /// Anything the analyzer doesn't care about.
    pub(crate) const UNKNOWN: Self = Self::new("");

    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            flags: OpcodeFlags::empty(),
            branch: None,
            condition: None,
            memory: None,
            alu: None,
        }
    }

    pub(crate) const fn with_flags(self, flags: OpcodeFlags) -> Self {
        Self {
            flags: self.flags.union(flags),
            ..self
        }
    }
    pub(crate) const fn with_branch(self, branch: BranchType) -> Self {
        Self {
            branch: Some(branch),
            ..self
        }
    }
    pub(crate) const fn with_condition(self, condition: CondType) -> Self {
        Self {
            condition: Some(condition),
            ..self
        }
    }
    pub(crate) const fn with_memory(self, memory: MemType) -> Self {
        Self {
            memory: Some(memory),
            ..self
        }
    }
    pub(crate) const fn with_alu(self, alu: AluType) -> Self {
        Self {
            alu: Some(alu),
            ..self
        }
    }
}

impl OpcodeDescriptor {
    /// Mnemonic of the opcode. Empty for opcodes the analyzer doesn't classify.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
    #[must_use]
    pub const fn flags(&self) -> OpcodeFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_branch(&self) -> bool {
        self.branch.is_some()
    }
    #[must_use]
    pub const fn branch_type(&self) -> Option<BranchType> {
        self.branch
    }
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.flags.contains(OpcodeFlags::LINKED)
    }
    #[must_use]
    pub const fn is_likely(&self) -> bool {
        self.flags.contains(OpcodeFlags::LIKELY)
    }
    #[must_use]
    pub const fn condition(&self) -> Option<CondType> {
        self.condition
    }

    #[must_use]
    pub const fn is_memory(&self) -> bool {
        self.memory.is_some()
    }
    #[must_use]
    pub const fn mem_type(&self) -> Option<MemType> {
        self.memory
    }
    #[must_use]
    pub const fn is_load(&self) -> bool {
        self.flags.contains(OpcodeFlags::LOAD)
    }
    #[must_use]
    pub const fn is_store(&self) -> bool {
        self.flags.contains(OpcodeFlags::STORE)
    }
    #[must_use]
    pub const fn load_store_side(&self) -> Option<LoadStoreSide> {
        if self.flags.contains(OpcodeFlags::LEFT) {
            Some(LoadStoreSide::Left)
        } else if self.flags.contains(OpcodeFlags::RIGHT) {
            Some(LoadStoreSide::Right)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_alu(&self) -> bool {
        self.alu.is_some()
    }
    #[must_use]
    pub const fn alu_type(&self) -> Option<AluType> {
        self.alu
    }
    #[must_use]
    pub const fn alu_is_address(&self) -> bool {
        self.flags.contains(OpcodeFlags::ALU_ADDRESS)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.branch.is_none() && self.memory.is_none() && self.alu.is_none()
    }
}
