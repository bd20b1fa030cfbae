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

/// The verdict of a single oracle probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The candidate belongs to the target language.
    Accept,
    /// The candidate does not belong to the target language.
    Reject,
}

/// A membership oracle for the target language.
///
/// Implementations must behave as a pure predicate over the candidate
/// string for the duration of a run; the caching wrapper depends on that.
/// Uncertainty is resolved conservatively at the backend: a timeout counts
/// as [`Decision::Accept`], any other internal failure as
/// [`Decision::Reject`].
pub trait Oracle {
    /// Decides whether `candidate` belongs to the target language.
    fn decide(&mut self, candidate: &str) -> Decision;
}

/// Any `FnMut(&str) -> bool` predicate is an oracle. This stands in for
/// long-lived interpreter sessions in tests and simulations.
impl<F: FnMut(&str) -> bool> Oracle for F {
    fn decide(&mut self, candidate: &str) -> Decision {
        if self(candidate) { Decision::Accept } else { Decision::Reject }
    }
}
