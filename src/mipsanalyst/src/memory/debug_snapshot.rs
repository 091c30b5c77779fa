/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::addresses::Vram;

use super::{DebugInterface, MemoryImage, MemoryReader, RegisterCategory, RegisterValue};

const REGISTER_COUNT: usize = 32;

/// Frozen CPU state over a [`MemoryImage`].
///
/// Stands in for a live CPU when the registers were captured ahead of time, for example from a
/// savestate or a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSnapshot {
    memory: MemoryImage,
    gpr: [RegisterValue; REGISTER_COUNT],
    gpr_size: u32,
    cp0: [u32; REGISTER_COUNT],
    fcr: [u32; REGISTER_COUNT],
    cp_cond0: bool,
}

impl DebugSnapshot {
    /// All registers zeroed, 64-bit wide GPRs as on the EE.
    #[must_use]
    pub fn new(memory: MemoryImage) -> Self {
        Self {
            memory,
            gpr: [RegisterValue::default(); REGISTER_COUNT],
            gpr_size: 64,
            cp0: [0; REGISTER_COUNT],
            fcr: [0; REGISTER_COUNT],
            cp_cond0: false,
        }
    }

    #[must_use]
    pub const fn memory(&self) -> &MemoryImage {
        &self.memory
    }

    /// Writes to `$zero` are dropped, like the hardware does.
    #[must_use]
    pub fn with_gpr(mut self, index: usize, value: u128) -> Self {
        if index != 0 {
            if let Some(reg) = self.gpr.get_mut(index) {
                *reg = RegisterValue::new(value);
            }
        }
        self
    }

    /// 32 for an IOP-like target, 64 for the EE.
    #[must_use]
    pub fn with_gpr_size(self, gpr_size: u32) -> Self {
        Self { gpr_size, ..self }
    }

    #[must_use]
    pub fn with_cp0(mut self, index: usize, value: u32) -> Self {
        if let Some(reg) = self.cp0.get_mut(index) {
            *reg = value;
        }
        self
    }

    #[must_use]
    pub fn with_fcr(mut self, index: usize, value: u32) -> Self {
        if let Some(reg) = self.fcr.get_mut(index) {
            *reg = value;
        }
        self
    }

    #[must_use]
    pub fn with_cp_cond0(self, cp_cond0: bool) -> Self {
        Self { cp_cond0, ..self }
    }
}

impl MemoryReader for DebugSnapshot {
    fn read32(&self, address: Vram) -> u32 {
        self.memory.read32(address)
    }

    fn is_valid_address(&self, address: Vram) -> bool {
        self.memory.is_valid_address(address)
    }
}

impl DebugInterface for DebugSnapshot {
    fn register(&self, category: RegisterCategory, index: usize) -> RegisterValue {
        match category {
            RegisterCategory::Gpr => self.gpr.get(index).copied().unwrap_or_default(),
            RegisterCategory::Cp0 => self.cp0.get(index).copied().unwrap_or(0).into(),
            RegisterCategory::Fcr => self.fcr.get(index).copied().unwrap_or(0).into(),
            RegisterCategory::Fpr => RegisterValue::default(),
        }
    }

    fn register_size(&self, category: RegisterCategory) -> u32 {
        match category {
            RegisterCategory::Gpr => self.gpr_size,
            RegisterCategory::Cp0 | RegisterCategory::Fpr | RegisterCategory::Fcr => 32,
        }
    }

    fn cp_cond0(&self) -> bool {
        self.cp_cond0
    }
}
