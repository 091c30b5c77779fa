/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

pub mod display;
mod function_symbol;
mod label_symbol;
mod symbol_database;
mod symbol_database_error;
mod symbol_source;

pub use function_symbol::FunctionSymbol;
pub use label_symbol::LabelSymbol;
pub use symbol_database::SymbolDatabase;
pub use symbol_database_error::SymbolDatabaseError;
pub use symbol_source::{SymbolSource, SymbolSourceHandle};
