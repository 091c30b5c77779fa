/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::sync::Arc;
use core::{error, fmt};

use crate::addresses::Vram;

use super::SymbolSourceHandle;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum SymbolDatabaseError {
    EmptyName {
        address: Option<Vram>,
    },
    UnknownSource {
        handle: SymbolSourceHandle,
    },
    AddressInUse {
        address: Vram,
        existing_name: Arc<str>,
    },
    DuplicateName {
        name: Arc<str>,
        address: Vram,
        existing_address: Vram,
    },
}

impl fmt::Display for SymbolDatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolDatabaseError::EmptyName { address: Some(address) } => {
                write!(f, "Can't create a symbol without a name at address 0x{}", address)
            }
            SymbolDatabaseError::EmptyName { address: None } => {
                write!(f, "Can't register a symbol source without a name")
            }
            SymbolDatabaseError::UnknownSource { handle } => {
                write!(f, "Symbol source {:?} does not belong to this database", handle)
            }
            SymbolDatabaseError::AddressInUse {
                address,
                existing_name,
            } => write!(
                f,
                "A function symbol already exists at address 0x{}: '{}'",
                address, existing_name
            ),
            SymbolDatabaseError::DuplicateName {
                name,
                address,
                existing_address,
            } => write!(
                f,
                "Can't create function '{}' at address 0x{} because a function with the same name already exists at address 0x{}",
                name, address, existing_address
            ),
        }
    }
}
impl error::Error for SymbolDatabaseError {}
