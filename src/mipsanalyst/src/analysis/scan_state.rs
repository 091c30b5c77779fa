/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::addresses::{Size, Vram};

use super::AnalyzedFunction;

/// State of the function the boundary scanner is currently walking through.
///
/// Every transition the scanner makes goes through one of the methods here, so they can be
/// exercised without running a full scan.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ScanState {
    start: Vram,
    /// Highest target of any local branch seen so far.
    furthest_branch: Option<Vram>,
    /// A return or jump was seen while some branch still goes past it.
    looking: bool,
    end: bool,
    is_straight_leaf: bool,
    suspected_no_return: bool,
}

impl ScanState {
    #[must_use]
    pub const fn new(start: Vram) -> Self {
        Self {
            start,
            furthest_branch: None,
            looking: false,
            end: false,
            is_straight_leaf: true,
            suspected_no_return: false,
        }
    }

    #[must_use]
    pub const fn start(&self) -> Vram {
        self.start
    }
    #[must_use]
    pub const fn furthest_branch(&self) -> Option<Vram> {
        self.furthest_branch
    }
    #[must_use]
    pub const fn is_looking(&self) -> bool {
        self.looking
    }
    #[must_use]
    pub const fn should_end(&self) -> bool {
        self.end
    }
    #[must_use]
    pub const fn is_straight_leaf(&self) -> bool {
        self.is_straight_leaf
    }
    #[must_use]
    pub const fn suspected_no_return(&self) -> bool {
        self.suspected_no_return
    }

    /// Last address known to belong to the function, as seen from `address`.
    #[must_use]
    pub fn known_end(&self, address: Vram) -> Vram {
        self.furthest_branch.unwrap_or(address)
    }

    /// Whether some local branch lands past `address`.
    #[must_use]
    pub fn branches_past(&self, address: Vram) -> bool {
        self.furthest_branch.is_some_and(|x| x > address)
    }
}

impl ScanState {
    /// Records a local (non-linked) branch from `address` to `target`.
    ///
    /// A `beq $zero, $zero` that goes backwards while nothing else goes past it is an endless
    /// loop, and ends the function.
    pub fn observe_branch(&mut self, address: Vram, target: Vram, is_branch_always: bool) {
        self.is_straight_leaf = false;
        self.extend_furthest_branch(target);

        if is_branch_always && target <= address && !self.branches_past(address) {
            self.end = true;
            self.suspected_no_return = true;
        }
    }

    /// Records a call (`jal`, `jalr`, `bltzal`, ...).
    pub fn observe_call(&mut self) {
        self.is_straight_leaf = false;
    }

    /// Raises the furthest branch to `target` if it's further than the current one.
    pub fn extend_furthest_branch(&mut self, target: Vram) {
        if self.furthest_branch.is_none_or(|x| target > x) {
            self.furthest_branch = Some(target);
        }
    }

    /// The instruction at `address` leaves the function (`jr $ra`, tail call).
    ///
    /// If some branch still goes past it then the code after the delay slot is still part of the
    /// function, and the scanner starts looking for the real end. Otherwise the function ends
    /// here. Returns the address the scan continues from: the delay slot when looking, `address`
    /// itself otherwise.
    pub fn stop_or_look(&mut self, address: Vram) -> Vram {
        if self.branches_past(address) {
            self.looking = true;
            address + Size::new(4)
        } else {
            self.end = true;
            address
        }
    }

    /// Ends the function regardless of any branch going past the current address.
    pub fn force_end(&mut self) {
        self.end = true;
    }

    /// Drops the current function and starts a new one at `start`.
    pub fn restart_at(&mut self, start: Vram) {
        *self = Self::new(start);
    }

    /// Closes the current function at `end` and starts the next one right there.
    pub fn finish(&mut self, end: Vram) -> AnalyzedFunction {
        let function = AnalyzedFunction::new(
            self.start,
            end,
            self.is_straight_leaf,
            self.suspected_no_return,
        );
        self.restart_at(end);
        function
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn returns_end_straight_functions() {
        let mut state = ScanState::new(Vram::new(0x1000));

        assert_eq!(state.stop_or_look(Vram::new(0x1008)), Vram::new(0x1008));
        assert!(state.should_end());
        assert!(!state.is_looking());
        assert!(state.is_straight_leaf());
    }

    #[test]
    fn returns_before_forward_branches_look() {
        let mut state = ScanState::new(Vram::new(0x1000));

        state.observe_branch(Vram::new(0x1000), Vram::new(0x1020), false);
        assert_eq!(state.stop_or_look(Vram::new(0x1010)), Vram::new(0x1014));
        assert!(state.is_looking());
        assert!(!state.should_end());
        assert!(!state.is_straight_leaf());
        assert_eq!(state.known_end(Vram::new(0x1014)), Vram::new(0x1020));
    }

    #[test]
    fn furthest_branch_only_grows() {
        let mut state = ScanState::new(Vram::new(0x1000));

        state.observe_branch(Vram::new(0x1000), Vram::new(0x1040), false);
        state.observe_branch(Vram::new(0x1008), Vram::new(0x1010), false);
        assert_eq!(state.furthest_branch(), Some(Vram::new(0x1040)));

        state.extend_furthest_branch(Vram::new(0x1080));
        assert_eq!(state.furthest_branch(), Some(Vram::new(0x1080)));
    }

    #[test]
    fn endless_loops_do_not_return() {
        let mut state = ScanState::new(Vram::new(0x1000));

        state.observe_branch(Vram::new(0x1000), Vram::new(0x1000), true);
        assert!(state.should_end());
        assert!(state.suspected_no_return());
    }

    #[test]
    fn escapable_loops_return() {
        let mut state = ScanState::new(Vram::new(0x1000));

        state.observe_branch(Vram::new(0x1000), Vram::new(0x1020), false);
        state.observe_branch(Vram::new(0x1010), Vram::new(0x1004), true);
        assert!(!state.should_end());
        assert!(!state.suspected_no_return());
    }

    #[test]
    fn calls_are_not_leaves() {
        let mut state = ScanState::new(Vram::new(0x1000));

        state.observe_call();
        assert!(!state.is_straight_leaf());
        assert_eq!(state.furthest_branch(), None);
    }

    #[test]
    fn finishing_resets_everything() {
        let mut state = ScanState::new(Vram::new(0x1000));

        state.observe_branch(Vram::new(0x1000), Vram::new(0x1000), true);
        let function = state.finish(Vram::new(0x1008));

        assert_eq!(
            function,
            AnalyzedFunction::new(Vram::new(0x1000), Vram::new(0x1008), false, true)
        );
        assert_eq!(state, ScanState::new(Vram::new(0x1008)));
    }
}
