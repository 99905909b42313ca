//! Confirmation-code generation. Compact random strings for guest-facing
//! booking lookup.

use uuid::Uuid;

/// Code generation seam. The ledger consumes this so tests can force
/// collisions; production wiring uses [`UuidCodes`].
pub trait ConfirmationCodes: Send + Sync {
    /// Produce a fresh candidate code. Uniqueness is probabilistic by
    /// construction; the ledger re-checks against the store before commit.
    fn generate(&self) -> String;
}

/// Version-4 random UUID rendered as text.
#[derive(Debug, Default)]
pub struct UuidCodes;

impl ConfirmationCodes for UuidCodes {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_distinct_uuid_codes() {
        let codes = UuidCodes;
        let a = codes.generate();
        let b = codes.generate();
        assert_ne!(a, b);
        // canonical hyphenated UUID text form
        assert_eq!(a.len(), 36);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
