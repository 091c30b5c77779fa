/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod endian;
mod scanner_config;

pub use endian::Endian;
pub use scanner_config::ScannerConfig;
