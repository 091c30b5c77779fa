/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod addresses;
pub mod analysis;
pub mod collections;
pub mod config;
pub mod memory;
pub mod opcodes;
pub mod symbols;

pub use rabbitizer;
