//! Utility functions shared by the container and the code generator
//!
//! This module provides naming helpers used when deriving generated
//! function names from bean names, following Rust naming conventions.

/// Naming convention utilities for bean names and generated identifiers
pub mod naming {
    /// Converts a bean or type name to snake_case.
    ///
    /// # Examples
    ///
    /// ```
    /// use wyvern_core::utils::naming::to_snake_case;
    ///
    /// assert_eq!(to_snake_case("UserService"), "user_service");
    /// assert_eq!(to_snake_case("userService"), "user_service");
    /// assert_eq!(to_snake_case("lowercase"), "lowercase");
    /// ```
    pub fn to_snake_case(s: &str) -> String {
        let mut result = String::with_capacity(s.len() + s.len() / 2);
        for ch in s.chars() {
            if ch.is_uppercase() {
                if !result.is_empty() && !result.ends_with('_') {
                    result.push('_');
                }
                result.extend(ch.to_lowercase());
            } else {
                result.push(ch);
            }
        }
        result
    }

    /// Checks whether a string is a valid Rust identifier.
    ///
    /// Reserved words are *not* rejected here; use [`is_reserved_word`]
    /// for that check.
    pub fn is_valid_identifier(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|ch| ch.is_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }

    /// Rust keywords (strict and reserved) that cannot be used as
    /// generated identifiers.
    const RESERVED_WORDS: &[&str] = &[
        "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
        "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen",
        "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
        "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
        "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while",
        "yield",
    ];

    /// Checks whether a string is a Rust keyword.
    pub fn is_reserved_word(s: &str) -> bool {
        RESERVED_WORDS.contains(&s)
    }
}

#[cfg(test)]
mod tests {
    mod naming_tests {
        use super::super::naming::*;

        #[test]
        fn test_to_snake_case() {
            assert_eq!(to_snake_case("UserService"), "user_service");
            assert_eq!(to_snake_case("userService"), "user_service");
            assert_eq!(to_snake_case("DatabaseConnectionPool"), "database_connection_pool");
            assert_eq!(to_snake_case(""), "");
            assert_eq!(to_snake_case("lowercase"), "lowercase");
        }

        #[test]
        fn test_is_valid_identifier() {
            assert!(is_valid_identifier("userService"));
            assert!(is_valid_identifier("_private"));
            assert!(!is_valid_identifier("user-service"));
            assert!(!is_valid_identifier("1st"));
            assert!(!is_valid_identifier(""));
        }

        #[test]
        fn test_is_reserved_word() {
            assert!(is_reserved_word("fn"));
            assert!(is_reserved_word("match"));
            assert!(!is_reserved_word("userService"));
        }
    }
}
