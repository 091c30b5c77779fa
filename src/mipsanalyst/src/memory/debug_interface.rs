/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use super::MemoryReader;

/// Register banks exposed by a debug target.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegisterCategory {
    /// General purpose registers. 128 bits wide on the EE, 32 on the IOP.
    Gpr,
    /// System control coprocessor.
    Cp0,
    /// FPU data registers.
    Fpr,
    /// FPU control registers.
    Fcr,
}

impl RegisterCategory {
    pub const CP0_STATUS: usize = 12;
    pub const CP0_EPC: usize = 14;
    pub const CP0_ERROR_EPC: usize = 30;

    pub const FCR_CONTROL_STATUS: usize = 31;
}

/// Raw contents of a register, at most 128 bits wide.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegisterValue {
    inner: u128,
}

impl RegisterValue {
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self { inner: value }
    }

    #[must_use]
    pub const fn inner(&self) -> u128 {
        self.inner
    }

    #[must_use]
    pub const fn u16_lo(&self) -> u16 {
        self.inner as u16
    }
    #[must_use]
    pub const fn u32_lo(&self) -> u32 {
        self.inner as u32
    }
    #[must_use]
    pub const fn u64_lo(&self) -> u64 {
        self.inner as u64
    }
}

impl From<u32> for RegisterValue {
    fn from(value: u32) -> Self {
        Self::new(value.into())
    }
}
impl From<u64> for RegisterValue {
    fn from(value: u64) -> Self {
        Self::new(value.into())
    }
}

/// A CPU that can be inspected while it is paused.
///
/// Callers must make sure the CPU isn't running while they read from it.
pub trait DebugInterface: MemoryReader {
    fn register(&self, category: RegisterCategory, index: usize) -> RegisterValue;

    /// Width in bits of the registers of `category`, either 32 or 64.
    fn register_size(&self, category: RegisterCategory) -> u32;

    /// State of the COP0 condition line, as tested by `bc0f`/`bc0t`.
    fn cp_cond0(&self) -> bool;
}
