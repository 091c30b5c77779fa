/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::{error, fmt};

use crate::addresses::Vram;

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SymDisplayError {
    /// The function has no known size, so there's nothing to list.
    SizeUnknown { address: Vram },
    /// Part of the function lies outside of the readable memory.
    NotMapped { address: Vram },
}

impl fmt::Display for SymDisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymDisplayError::SizeUnknown { address } => {
                write!(f, "Function at 0x{} doesn't have a size", address)
            }
            SymDisplayError::NotMapped { address } => {
                write!(f, "Address 0x{} can't be read", address)
            }
        }
    }
}
impl error::Error for SymDisplayError {}
