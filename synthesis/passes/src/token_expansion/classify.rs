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

/// The generalisable character class of a terminal lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminalClass {
    /// All decimal digits.
    Digit,
    /// All ASCII uppercase letters.
    Uppercase,
    /// All ASCII lowercase letters.
    Lowercase,
    /// ASCII letters of mixed case.
    Letter,
    /// All whitespace.
    Whitespace,
}

/// Finds the narrowest generalisable class covering every character of
/// `lexeme`, or `None` for empty or mixed lexemes.
pub fn classify_terminal(lexeme: &str) -> Option<TerminalClass> {
    if lexeme.is_empty() {
        return None;
    }
    if lexeme.chars().all(|c| c.is_ascii_digit()) {
        Some(TerminalClass::Digit)
    } else if lexeme.chars().all(char::is_whitespace) {
        Some(TerminalClass::Whitespace)
    } else if lexeme.chars().all(|c| c.is_ascii_alphabetic()) {
        if lexeme.chars().all(|c| c.is_ascii_uppercase()) {
            Some(TerminalClass::Uppercase)
        } else if lexeme.chars().all(|c| c.is_ascii_lowercase()) {
            Some(TerminalClass::Lowercase)
        } else {
            Some(TerminalClass::Letter)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_the_narrowest_match() {
        assert_eq!(classify_terminal("0451"), Some(TerminalClass::Digit));
        assert_eq!(classify_terminal("FOO"), Some(TerminalClass::Uppercase));
        assert_eq!(classify_terminal("foo"), Some(TerminalClass::Lowercase));
        assert_eq!(classify_terminal("Foo"), Some(TerminalClass::Letter));
        assert_eq!(classify_terminal(" \t\n"), Some(TerminalClass::Whitespace));
    }

    #[test]
    fn mixed_and_empty_lexemes_stay_unclassified() {
        assert_eq!(classify_terminal("a1"), None);
        assert_eq!(classify_terminal("+"), None);
        assert_eq!(classify_terminal(""), None);
    }
}
