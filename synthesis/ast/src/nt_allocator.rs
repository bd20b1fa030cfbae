// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Espalier library.

// The Espalier library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Espalier library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Espalier library. If not, see <https://www.gnu.org/licenses/>.

use std::cell::RefCell;

/// A counter that produces sequentially increasing nonterminal names
/// `t1, t2, t3, ...`.
///
/// `t0` is permanently reserved for the start nonterminal, and names are
/// never recycled within a run. The allocator is threaded through the
/// pipeline as a value rather than kept in global state.
#[derive(Debug, Clone)]
pub struct NtAllocator {
    /// The inner counter.
    /// `RefCell` is used here to avoid `&mut` all over the pipeline.
    inner: RefCell<NtAllocatorInner>,
}

impl NtAllocator {
    /// Returns a new `NtAllocator` whose next name is `t<next>`.
    pub fn new(next: u32) -> Self {
        Self { inner: RefCell::new(NtAllocatorInner::new(next)) }
    }

    /// Returns the next fresh nonterminal name and increments the internal
    /// state.
    pub fn next_nt(&self) -> String {
        self.inner.borrow_mut().next_nt()
    }
}

impl Default for NtAllocator {
    fn default() -> Self {
        // t0 is the start nonterminal; fresh names begin at t1.
        Self::new(1)
    }
}

/// Contains the actual data for `NtAllocator`.
/// Modeled this way to afford an API using interior mutability.
#[derive(Debug, Clone)]
struct NtAllocatorInner {
    /// The next nonterminal number.
    next: u32,
}

impl NtAllocatorInner {
    fn new(next: u32) -> Self {
        Self { next }
    }

    fn next_nt(&mut self) -> String {
        let name = format!("t{}", self.next);
        self.next += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::START;

    #[test]
    fn names_are_monotonic_and_skip_start() {
        let allocator = NtAllocator::default();
        assert_eq!(allocator.next_nt(), "t1");
        assert_eq!(allocator.next_nt(), "t2");
        assert_ne!(allocator.next_nt(), START);
    }
}
