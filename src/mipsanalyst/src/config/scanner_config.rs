/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::addresses::Size;

/// Tunables for the function boundary scanner.
///
/// The two lookahead bounds keep the jumpback search from wandering through heavily tail
/// recursive code. Tests may shrink them to get small deterministic fixtures.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ScannerConfig {
    max_ahead_scan: Size,
    max_func_size: Size,
    split_at_call_targets: bool,
}

impl ScannerConfig {
    /// How far past a jump target the jumpback lookahead scans.
    pub const DEFAULT_MAX_AHEAD_SCAN: Size = Size::new(0x1000);
    /// Jump targets further than this past the known end of a function are always tail calls.
    pub const DEFAULT_MAX_FUNC_SIZE: Size = Size::new(0x20000);

    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_ahead_scan: Self::DEFAULT_MAX_AHEAD_SCAN,
            max_func_size: Self::DEFAULT_MAX_FUNC_SIZE,
            split_at_call_targets: true,
        }
    }
}

impl ScannerConfig {
    #[must_use]
    pub const fn max_ahead_scan(&self) -> Size {
        self.max_ahead_scan
    }
    #[must_use]
    pub const fn with_max_ahead_scan(self, max_ahead_scan: Size) -> Self {
        Self {
            max_ahead_scan,
            ..self
        }
    }

    #[must_use]
    pub const fn max_func_size(&self) -> Size {
        self.max_func_size
    }
    #[must_use]
    pub const fn with_max_func_size(self, max_func_size: Size) -> Self {
        Self {
            max_func_size,
            ..self
        }
    }

    /// If `true`, every `jal` target inside the scanned range is treated as the start of a
    /// function, just like a pre-existing symbol would.
    #[must_use]
    pub const fn split_at_call_targets(&self) -> bool {
        self.split_at_call_targets
    }
    #[must_use]
    pub const fn with_split_at_call_targets(self, split_at_call_targets: bool) -> Self {
        Self {
            split_at_call_targets,
            ..self
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::new()
    }
}
