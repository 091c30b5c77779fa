/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod function_display;
mod sym_display_error;

pub use function_display::{FunctionDisplay, FunctionDisplaySettings};
pub use sym_display_error::SymDisplayError;
