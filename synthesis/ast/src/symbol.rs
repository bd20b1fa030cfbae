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

//! Symbol conventions shared across the pipeline.
//!
//! A grammar symbol is a plain string: either a nonterminal name (a key of
//! the grammar) or a terminal lexeme stored in its quoted form `"x"`.

/// The distinguished start nonterminal. Reserved by the allocator and never
/// inlined or removed.
pub const START: &str = "t0";

/// Wraps a lexeme in the quotes that mark a terminal symbol inside a rule
/// body.
pub fn quote_terminal(lexeme: &str) -> String {
    format!("\"{lexeme}\"")
}

/// Strips the wrapping quotes from a terminal symbol, if present.
///
/// Payloads of length >= 3 that begin and end with `"` are unwrapped; every
/// other payload is returned as-is. Applying this to a nonterminal name is a
/// no-op, so callers can fix up child payloads uniformly.
pub fn fixup_terminal(payload: &str) -> &str {
    if payload.len() >= 3 && payload.starts_with('"') && payload.ends_with('"') {
        &payload[1..payload.len() - 1]
    } else {
        payload
    }
}
