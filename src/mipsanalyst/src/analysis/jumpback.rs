/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::{
    addresses::Vram,
    config::ScannerConfig,
    memory::MemoryReader,
    opcodes::encode,
};

use super::targets::{branch_target_no_ra, jump_target};

/// Intra-function target of the instruction at `address`: non-linked branches and plain `j`s.
fn local_target<R: MemoryReader>(reader: &R, address: Vram) -> Option<Vram> {
    branch_target_no_ra(reader, address).or_else(|| {
        if encode::is_plain_jump(reader.read32(address)) {
            jump_target(reader, address)
        } else {
            None
        }
    })
}

fn word_addresses(start: Vram, end: Vram) -> impl Iterator<Item = Vram> {
    (start.inner()..end.inner())
        .step_by(4)
        .map(Vram::new)
}

/// Decides whether the code at `from` jumps back into `[known_start, known_end]`.
///
/// Used after seeing a forward jump, to tell an `else` arm apart from a tail call. Returns the
/// address of the instruction that jumps back, or `None` if the jump looks like a tail call.
///
/// The forward scan covers at most [`ScannerConfig::max_ahead_scan`] bytes and stops at the first
/// `jr $ra`. Code may also jump up to somewhere between `known_end` and `from`, from where another
/// jump could land back in the known range, so the closest of those upward jumps gets its own
/// backward scan.
#[must_use]
pub fn scan_ahead_for_jumpback<R: MemoryReader>(
    reader: &R,
    config: &ScannerConfig,
    from: Vram,
    known_start: Vram,
    known_end: Vram,
) -> Option<Vram> {
    let give_up_at = known_end.inner().saturating_add(config.max_func_size().inner());
    if from.inner() > give_up_at {
        tracing::trace!(
            "Jump to 0x{} is too far from 0x{} to come back",
            from,
            known_end
        );
        return None;
    }

    let mut closest_jumpback: Option<Vram> = None;
    let mut closest_jumpback_target = from;
    let mut furthest_jumpback: Option<Vram> = None;

    let ahead_end = Vram::new(from.inner().saturating_add(config.max_ahead_scan().inner()));
    for ahead in word_addresses(from, ahead_end) {
        if let Some(target) = local_target(reader, ahead) {
            if target >= known_start && target <= known_end {
                furthest_jumpback = Some(ahead);
            }
            if target < closest_jumpback_target && target < from && target > known_end {
                closest_jumpback = Some(ahead);
                closest_jumpback_target = target;
            }
        }

        if reader.read32(ahead) == encode::JR_RA {
            break;
        }
    }

    if furthest_jumpback.is_none() {
        if let Some(closest) = closest_jumpback {
            let lands_in_known_range = word_addresses(closest_jumpback_target, from)
                .filter_map(|behind| local_target(reader, behind))
                .any(|target| target >= known_start && target <= known_end);

            if lands_in_known_range {
                furthest_jumpback = Some(closest);
            }
        }
    }

    if let Some(jumpback) = furthest_jumpback {
        tracing::trace!(
            "0x{} jumps back into [0x{}, 0x{}]",
            jumpback,
            known_start,
            known_end
        );
    }
    furthest_jumpback
}

#[cfg(test)]
mod tests {
    use crate::{addresses::Size, memory::MemoryImage, opcodes::encode::make_j};

    use super::*;

    use pretty_assertions::assert_eq;

    const BASE: u32 = 0x00100000;

    fn image(words: &[u32]) -> MemoryImage {
        MemoryImage::from_words(Vram::new(BASE), words)
    }

    fn at(offset: u32) -> Vram {
        Vram::new(BASE + offset)
    }

    #[test]
    fn direct_jumpback() {
        let reader = image(&[
            0x00000000,        // 0x00: known code
            0x00000000,        // 0x04
            0x00000000,        // 0x08
            0x00000000,        // 0x0C
            0x00000000,        // 0x10: from
            make_j(at(0x04)),  // 0x14: back into the known range
            0x00000000,        // 0x18
        ]);

        assert_eq!(
            scan_ahead_for_jumpback(&reader, &ScannerConfig::new(), at(0x10), at(0x00), at(0x08)),
            Some(at(0x14))
        );
    }

    #[test]
    fn return_stops_the_scan() {
        let reader = image(&[
            0x00000000,       // 0x00
            0x00000000,       // 0x04
            encode::JR_RA,    // 0x08: from
            0x00000000,       // 0x0C
            make_j(at(0x00)), // 0x10: never reached
        ]);

        assert_eq!(
            scan_ahead_for_jumpback(&reader, &ScannerConfig::new(), at(0x08), at(0x00), at(0x04)),
            None
        );
    }

    #[test]
    fn jumpback_through_an_upward_jump() {
        let reader = image(&[
            0x00000000,       // 0x00: known code
            0x00000000,       // 0x04: known end
            0x00000000,       // 0x08
            make_j(at(0x00)), // 0x0C: lands in the known range
            0x00000000,       // 0x10
            0x00000000,       // 0x14: from
            make_j(at(0x0C)), // 0x18: upwards, but past the known end
            0x00000000,       // 0x1C
        ]);

        assert_eq!(
            scan_ahead_for_jumpback(&reader, &ScannerConfig::new(), at(0x14), at(0x00), at(0x04)),
            Some(at(0x18))
        );
    }

    #[test]
    fn far_targets_are_tail_calls() {
        let reader = image(&[0x00000000; 16]);
        let config = ScannerConfig::new().with_max_func_size(Size::new(0x10));

        assert_eq!(
            scan_ahead_for_jumpback(&reader, &config, at(0x38), at(0x00), at(0x04)),
            None
        );
    }

    #[test]
    fn lookahead_window_is_bounded() {
        let reader = image(&[
            0x00000000,       // 0x00: known
            0x00000000,       // 0x04: from
            0x00000000,       // 0x08
            make_j(at(0x00)), // 0x0C: outside the window
        ]);
        let config = ScannerConfig::new().with_max_ahead_scan(Size::new(0x08));

        assert_eq!(
            scan_ahead_for_jumpback(&reader, &config, at(0x04), at(0x00), at(0x00)),
            None
        );
    }
}
