/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{collections::btree_set::BTreeSet, format, string::String, vec::Vec};

use crate::{
    addresses::{Size, Vram},
    config::ScannerConfig,
    memory::MemoryReader,
    opcodes::{classify, encode},
    symbols::{SymbolDatabase, SymbolDatabaseError},
};

use super::{
    function_hash::hash_function,
    jumpback::scan_ahead_for_jumpback,
    targets::{branch_target_no_ra, jump_target, region_jump, sure_branch_target},
    AnalyzedFunction, ScanState,
};

/// Provenance of every symbol created by the scanner.
pub const FUNCTION_SCANNER_SOURCE: &str = "Function Scanner";

const WORD: Size = Size::new(4);

/// `addr + bytes`, or `None` past the end of the address space.
fn checked_step(address: Vram, bytes: u32) -> Option<Vram> {
    address.inner().checked_add(bytes).map(Vram::new)
}

/// Targets of every `jal` in `[start, end]` that land inside that same range.
#[must_use]
pub fn collect_call_targets<R: MemoryReader>(reader: &R, start: Vram, end: Vram) -> BTreeSet<Vram> {
    (start.inner()..=end.inner())
        .step_by(4)
        .map(Vram::new)
        .filter_map(|address| {
            let word = reader.read32(address);
            if encode::is_jal(word) {
                Some(region_jump(address, word))
            } else {
                None
            }
        })
        .filter(|target| *target >= start && *target <= end)
        .collect()
}

/// Recovers function boundaries from raw code.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct FunctionScanner {
    config: ScannerConfig,
}

impl FunctionScanner {
    #[must_use]
    pub const fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }
}

impl FunctionScanner {
    /// Walks the words in `[start, end]` and splits them into functions.
    ///
    /// Functions already known to `database` are never entered: sized symbols are skipped over,
    /// and any function start (sized or not) stops the function that runs into it. Nothing is
    /// written to `database`.
    #[must_use]
    pub fn find_functions<R: MemoryReader>(
        &self,
        database: &SymbolDatabase,
        reader: &R,
        start: Vram,
        end: Vram,
    ) -> Vec<AnalyzedFunction> {
        let mut functions = Vec::new();

        if start > end {
            tracing::warn!("Empty scan range [0x{}, 0x{}]", start, end);
            return functions;
        }

        let call_targets = if self.config.split_at_call_targets() {
            collect_call_targets(reader, start, end)
        } else {
            BTreeSet::new()
        };
        let boundary_at = |address: Option<Vram>| {
            address.is_some_and(|x| {
                database.function_at(x).is_some()
                    || database.claimed_range_covering(x).is_some()
                    || call_targets.contains(&x)
            })
        };

        let mut state = ScanState::new(start);
        let mut address = start;

        while address <= end {
            if let Some(claimed) = database.claimed_range_covering(address) {
                tracing::trace!("Skipping known code at {}", claimed);
                state.restart_at(claimed.end());
                address = claimed.end();
                continue;
            }

            let word = reader.read32(address);
            let mut current = address;

            if let Some(target) = branch_target_no_ra(reader, address) {
                state.observe_branch(address, target, encode::is_branch_always(word));
            } else if encode::is_plain_jump(word) {
                if let Some(target) = jump_target(reader, address) {
                    current = self.observe_jump(reader, &mut state, address, target);
                }
            } else if classify(word).is_linked() {
                state.observe_call();
            }

            if word == encode::JR_RA {
                current = state.stop_or_look(address);
            }

            if state.is_looking() && !state.branches_past(current) {
                self.look_for_end(reader, &mut state, current);
            }

            let next_is_boundary = boundary_at(checked_step(current, 4));
            if next_is_boundary || boundary_at(checked_step(current, 8)) {
                state.force_end();
            }

            if state.should_end() {
                let function_end = if next_is_boundary {
                    current + WORD
                } else {
                    self.absorb_padding(reader, &boundary_at, current, end)
                };

                let function = state.finish(function_end);
                tracing::debug!(
                    "Found function at {} (leaf: {}, no return: {})",
                    function.vram_range(),
                    function.is_straight_leaf(),
                    function.suspected_no_return()
                );
                functions.push(function);

                if function_end <= address {
                    break;
                }
                address = function_end;
                continue;
            }

            match checked_step(current, 4) {
                Some(next) => address = next,
                None => break,
            }
        }

        if state.start() <= end {
            let function_end = Vram::new(end.inner().saturating_add(4));
            let function = state.finish(function_end);
            tracing::debug!("Found trailing function at {}", function.vram_range());
            functions.push(function);
        }

        functions
    }

    /// Handles a plain `j` at `address`. Returns the address the scan continues from.
    fn observe_jump<R: MemoryReader>(
        &self,
        reader: &R,
        state: &mut ScanState,
        address: Vram,
        target: Vram,
    ) -> Vram {
        if target < state.start() {
            // Tail call to some earlier function.
            return state.stop_or_look(address);
        }

        if target > address && state.furthest_branch().is_none_or(|x| target > x) {
            let known_end = state.known_end(address);
            let jumpback =
                scan_ahead_for_jumpback(reader, &self.config, target, state.start(), known_end);

            match jumpback {
                Some(jumpback) if jumpback > address && jumpback > known_end => {
                    state.extend_furthest_branch(jumpback);
                }
                _ => return state.stop_or_look(address),
            }
        }

        address
    }

    /// Called once a looking scan reaches the furthest branch.
    fn look_for_end<R: MemoryReader>(&self, reader: &R, state: &mut ScanState, address: Vram) {
        let sure_target = sure_branch_target(reader, address).or_else(|| {
            if encode::is_plain_jump(reader.read32(address)) {
                jump_target(reader, address)
            } else {
                None
            }
        });

        match sure_target {
            Some(target) if target < address => state.force_end(),
            Some(target) => {
                let known_end = state.known_end(address);
                let jumpback =
                    scan_ahead_for_jumpback(reader, &self.config, target, state.start(), known_end);

                if let Some(jumpback) = jumpback.filter(|x| *x > address && *x > known_end) {
                    state.extend_furthest_branch(jumpback);
                }
            }
            None => {}
        }
    }

    /// End of a function whose last control transfer is at `last`.
    ///
    /// The delay slot always belongs to the function, followed by as many zero words as needed to
    /// align the next function to 16 bytes. Padding never runs into a known symbol nor past the
    /// scanned range.
    fn absorb_padding<R: MemoryReader, B: Fn(Option<Vram>) -> bool>(
        &self,
        reader: &R,
        boundary_at: &B,
        mut last: Vram,
        end: Vram,
    ) -> Vram {
        loop {
            let Some(candidate) = checked_step(last, 8) else {
                return Vram::new(u32::MAX);
            };

            let is_padding = candidate.inner() % 16 != 0
                && candidate <= end
                && reader.is_valid_address(candidate)
                && !boundary_at(Some(candidate))
                && reader.read32(candidate) == encode::NOP;
            if !is_padding {
                return candidate;
            }
            last += WORD;
        }
    }
}

impl FunctionScanner {
    /// Creates or updates a symbol for each function in `functions`.
    ///
    /// Functions without a symbol are named after the non-junk label at their address, or
    /// `z_un_XXXXXXXX` if there's none or its name is already used by another function. Sizes are only filled in where unknown, the no-return flag
    /// is always overwritten, and hashes are only computed for the symbols created here.
    ///
    /// The first database error aborts the registration. Symbols created up to that point are
    /// kept.
    pub fn register_functions<R: MemoryReader>(
        &self,
        database: &mut SymbolDatabase,
        reader: &R,
        functions: &[AnalyzedFunction],
        generate_hashes: bool,
    ) -> Result<(), SymbolDatabaseError> {
        let source = database.symbol_source(FUNCTION_SCANNER_SOURCE)?;

        for function in functions {
            let start = function.start();

            let (symbol, created) = if database.function_at(start).is_some() {
                match database.function_at_mut(start) {
                    Some(symbol) => (symbol, false),
                    None => continue,
                }
            } else {
                let name = Self::name_for(database, start);
                (database.create_function(&name, start, source)?, true)
            };

            if symbol.size().is_empty() {
                symbol.set_size(function.size());
            }

            if created && generate_hashes {
                if let Some(hash) = hash_function(symbol, reader) {
                    symbol.set_original_hash(hash.get());
                }
            }

            symbol.set_no_return(function.suspected_no_return());
        }

        Ok(())
    }

    fn name_for(database: &SymbolDatabase, address: Vram) -> String {
        let usable = |name: &str| database.function_named(name).is_none();

        match database
            .label_at(address)
            .filter(|x| !x.is_junk() && usable(x.name()))
        {
            Some(label) => label.name().into(),
            None => format!("z_un_{:08x}", address.inner()),
        }
    }

    /// Finds the functions in `[start, end]` and registers them in `database`.
    ///
    /// Errors are logged, not returned.
    pub fn scan_for_functions<R: MemoryReader>(
        &self,
        database: &mut SymbolDatabase,
        reader: &R,
        start: Vram,
        end: Vram,
        generate_hashes: bool,
    ) {
        let functions = self.find_functions(database, reader, start, end);

        if let Err(e) = self.register_functions(database, reader, &functions, generate_hashes) {
            tracing::error!("Function scan aborted: {}", e);
        }
    }
}

/// Scans `[start, end]` with the default [`ScannerConfig`].
pub fn scan_for_functions<R: MemoryReader>(
    database: &mut SymbolDatabase,
    reader: &R,
    start: Vram,
    end: Vram,
    generate_hashes: bool,
) {
    FunctionScanner::default().scan_for_functions(database, reader, start, end, generate_hashes);
}

#[cfg(test)]
mod tests {
    use crate::{
        memory::MemoryImage,
        opcodes::encode::{make_j, make_jal, JR_RA, NOP},
    };

    use super::*;

    use pretty_assertions::assert_eq;

    const BASE: u32 = 0x00100000;

    fn at(offset: u32) -> Vram {
        Vram::new(BASE + offset)
    }

    fn image(words: &[u32]) -> MemoryImage {
        MemoryImage::from_words(Vram::new(BASE), words)
    }

    fn find(reader: &MemoryImage) -> Vec<AnalyzedFunction> {
        let database = SymbolDatabase::new();
        let last = reader.last_word().unwrap();

        FunctionScanner::default().find_functions(&database, reader, reader.vram(), last)
    }

    #[test]
    fn call_targets_stay_in_range() {
        let reader = image(&[make_jal(at(0x08)), NOP, make_jal(at(0x1000)), NOP]);

        let targets = collect_call_targets(&reader, at(0x00), at(0x0C));
        assert_eq!(targets.into_iter().collect::<Vec<_>>(), [at(0x08)]);
    }

    #[test]
    fn padding_aligns_next_function() {
        let reader = image(&[
            0x24020001, // addiu $v0, $zero, 1
            JR_RA,
            NOP,
            NOP, // padding
            0x24020002, // addiu $v0, $zero, 2
            JR_RA,
            NOP,
        ]);

        assert_eq!(
            find(&reader),
            [
                AnalyzedFunction::new(at(0x00), at(0x10), true, false),
                AnalyzedFunction::new(at(0x10), at(0x1C), true, false),
            ]
        );
    }

    #[test]
    fn return_inside_if_keeps_looking() {
        let reader = image(&[
            0x10800003, // 0x00: beqz $a0, .L10
            NOP,        // 0x04
            JR_RA,      // 0x08
            NOP,        // 0x0C
            0x24020001, // 0x10: .L10: addiu $v0, $zero, 1
            JR_RA,      // 0x14
            NOP,        // 0x18
        ]);

        assert_eq!(
            find(&reader),
            [AnalyzedFunction::new(at(0x00), at(0x1C), false, false)]
        );
    }

    #[test]
    fn tail_call_backwards_ends_function() {
        let reader = image(&[
            JR_RA,            // 0x00
            NOP,              // 0x04
            NOP,              // 0x08
            NOP,              // 0x0C
            0x24020001,       // 0x10: addiu $v0, $zero, 1
            make_j(at(0x00)), // 0x14
            NOP,              // 0x18
        ]);

        assert_eq!(
            find(&reader),
            [
                AnalyzedFunction::new(at(0x00), at(0x10), true, false),
                AnalyzedFunction::new(at(0x10), at(0x1C), true, false),
            ]
        );
    }

    #[test]
    fn unfinished_function_runs_to_the_end() {
        let reader = image(&[0x24020001, 0x24020002]);

        assert_eq!(
            find(&reader),
            [AnalyzedFunction::new(at(0x00), at(0x08), true, false)]
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        let reader = image(&[JR_RA, NOP]);
        let database = SymbolDatabase::new();

        assert!(FunctionScanner::default()
            .find_functions(&database, &reader, at(0x04), at(0x00))
            .is_empty());
    }

    #[test]
    fn known_functions_stop_the_scan() {
        let reader = image(&[0x24020001, 0x24020002, 0x24020003, JR_RA, NOP]);
        let mut database = SymbolDatabase::new();
        let source = database.symbol_source("test").unwrap();
        database.create_function("second", at(0x08), source).unwrap();

        let functions =
            FunctionScanner::default().find_functions(&database, &reader, at(0x00), at(0x10));
        assert_eq!(
            functions,
            [
                AnalyzedFunction::new(at(0x00), at(0x08), true, false),
                AnalyzedFunction::new(at(0x08), at(0x14), true, false),
            ]
        );
    }
}
