/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod analyzed_function;
mod function_hash;
mod function_scanner;
mod jumpback;
mod opcode_info;
mod scan_state;
mod targets;

pub use analyzed_function::AnalyzedFunction;
pub use function_hash::{hash_function, FunctionHash, MAX_HASHED_FUNCTION_SIZE};
pub use function_scanner::{
    collect_call_targets, scan_for_functions, FunctionScanner, FUNCTION_SCANNER_SOURCE,
};
pub use jumpback::scan_ahead_for_jumpback;
pub use opcode_info::{describe_opcode, OpcodeInfo, SYSCALL_VECTOR};
pub use scan_state::ScanState;
pub use targets::{branch_target, branch_target_no_ra, jump_target, sure_branch_target};
