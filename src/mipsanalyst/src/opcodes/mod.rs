/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod descriptor;
pub mod encode;
mod flags;
mod tables;

pub use descriptor::OpcodeDescriptor;
pub use flags::{AluType, BranchType, CondType, LoadStoreSide, MemType, OpcodeFlags};
pub use tables::classify;
