//! Classification of raw test-function names
//!
//! Symbol providers report a testify suite method as a receiver-qualified
//! name, e.g. `(*MySuite).TestFoo` or `(MySuite).TestFoo`. The classifier
//! recognizes that shape and strips it down to the method name for display.
//!
//! Grammar for a suite-member name:
//!
//! ```text
//! member   := '(' receiver ')' '.' method
//! receiver := '*'? ident
//! method   := ident
//! ident    := one or more of [A-Za-z0-9_]
//! ```
//!
//! Anything that does not match is a plain test and maps to itself.

/// Outcome of classifying a raw function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Name shown in the tree: the method part for suite members, the raw
    /// name otherwise.
    pub display_name: String,
    /// Whether the raw name encodes a suite receiver.
    pub is_suite_member: bool,
}

/// Classify a raw test-function name.
///
/// Pure and total: unmatched input returns the identity mapping.
pub fn classify(raw: &str) -> Classification {
    match split_receiver(raw) {
        Some(method) => Classification {
            display_name: method.to_string(),
            is_suite_member: true,
        },
        None => Classification {
            display_name: raw.to_string(),
            is_suite_member: false,
        },
    }
}

/// Return the method part of a receiver-qualified name, or `None` when the
/// input does not match the suite-member grammar.
fn split_receiver(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix('(')?;
    let close = rest.find(')')?;
    let receiver = rest[..close].strip_prefix('*').unwrap_or(&rest[..close]);
    if !is_ident(receiver) {
        return None;
    }
    let method = rest[close + 1..].strip_prefix('.')?;
    if !is_ident(method) {
        return None;
    }
    Some(method)
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_identity() {
        let c = classify("TestFoo");
        assert_eq!(c.display_name, "TestFoo");
        assert!(!c.is_suite_member);
    }

    #[test]
    fn test_pointer_receiver() {
        let c = classify("(*MySuite).TestFoo");
        assert_eq!(c.display_name, "TestFoo");
        assert!(c.is_suite_member);
    }

    #[test]
    fn test_value_receiver() {
        let c = classify("(MySuite).TestFoo");
        assert_eq!(c.display_name, "TestFoo");
        assert!(c.is_suite_member);
    }

    #[test]
    fn test_empty_receiver_is_not_a_member() {
        let c = classify("().TestFoo");
        assert_eq!(c.display_name, "().TestFoo");
        assert!(!c.is_suite_member);
    }

    #[test]
    fn test_missing_method_is_not_a_member() {
        assert!(!classify("(MySuite).").is_suite_member);
        assert!(!classify("(MySuite)").is_suite_member);
        assert!(!classify("(MySuite)TestFoo").is_suite_member);
    }

    #[test]
    fn test_bare_star_is_not_a_member() {
        let c = classify("(*).TestFoo");
        assert!(!c.is_suite_member);
        assert_eq!(c.display_name, "(*).TestFoo");
    }

    #[test]
    fn test_method_with_trailing_garbage_is_not_a_member() {
        assert!(!classify("(S).Test Foo").is_suite_member);
        assert!(!classify("(S).Test.Foo").is_suite_member);
    }

    #[test]
    fn test_empty_input() {
        let c = classify("");
        assert_eq!(c.display_name, "");
        assert!(!c.is_suite_member);
    }

    #[test]
    fn test_underscores_and_digits() {
        let c = classify("(*suite_v2).Test_bar_3");
        assert_eq!(c.display_name, "Test_bar_3");
        assert!(c.is_suite_member);
    }
}
