//! # Credential Table
//!
//! Validation of stored records and PIN lookup.
//!
//! Every lookup compares the candidate against all entries with
//! `subtle::ConstantTimeEq`, so response time does not reveal how many
//! leading digits matched.

use super::entities::{AuthOutcome, Credential, CredentialRecord};
use super::errors::AuthError;
use shared_types::AuthorizationLevel;
use std::collections::HashSet;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// True when `pin` is exactly `length` ASCII digits.
pub fn is_well_formed_pin(pin: &str, length: usize) -> bool {
    pin.len() == length && pin.bytes().all(|b| b.is_ascii_digit())
}

/// Loaded credentials.
#[derive(Debug, Default)]
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl CredentialTable {
    /// Validate `records` and build a table.
    ///
    /// # Errors
    ///
    /// `AuthError::ConfigCorrupt` for a malformed PIN, a `None` level or a
    /// PIN listed twice.
    pub fn from_records(records: &[CredentialRecord], pin_length: usize) -> Result<Self, AuthError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut entries = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if !is_well_formed_pin(&record.pin, pin_length) {
                return Err(AuthError::ConfigCorrupt(format!(
                    "record {index}: PIN must be {pin_length} digits"
                )));
            }
            if record.level == AuthorizationLevel::None {
                return Err(AuthError::ConfigCorrupt(format!(
                    "record {index}: level None cannot be granted"
                )));
            }
            if !seen.insert(record.pin.as_str()) {
                return Err(AuthError::ConfigCorrupt(format!(
                    "record {index}: duplicate PIN"
                )));
            }
            entries.push(Credential {
                pin: Zeroizing::new(record.pin.clone()),
                level: record.level,
                label: record.label.clone(),
            });
        }

        Ok(Self { entries })
    }

    /// Number of credentials.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact match of the full PIN string.
    pub fn lookup(&self, pin: &str) -> AuthOutcome {
        let mut matched: Option<&Credential> = None;
        for entry in &self.entries {
            let equal: bool = entry.pin.as_bytes().ct_eq(pin.as_bytes()).into();
            if equal && matched.is_none() {
                matched = Some(entry);
            }
        }

        match matched {
            Some(entry) => AuthOutcome::Granted {
                level: entry.level,
                label: entry.label.clone(),
            },
            None => AuthOutcome::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records() -> Vec<CredentialRecord> {
        vec![
            CredentialRecord::new("1234", AuthorizationLevel::Level1, "Operator"),
            CredentialRecord::new("9999", AuthorizationLevel::Level2, "Administrator"),
        ]
    }

    #[test]
    fn test_lookup_exact() {
        let table = CredentialTable::from_records(&records(), 4).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup("9999"),
            AuthOutcome::Granted {
                level: AuthorizationLevel::Level2,
                label: "Administrator".into()
            }
        );
        assert_eq!(table.lookup("0000"), AuthOutcome::Rejected);
        assert_eq!(table.lookup("123"), AuthOutcome::Rejected);
        assert_eq!(table.lookup("12345"), AuthOutcome::Rejected);
    }

    #[test]
    fn test_malformed_records_are_corrupt() {
        let short = vec![CredentialRecord::new("12", AuthorizationLevel::Level1, "x")];
        assert!(matches!(
            CredentialTable::from_records(&short, 4),
            Err(AuthError::ConfigCorrupt(_))
        ));

        let letters = vec![CredentialRecord::new("12a4", AuthorizationLevel::Level1, "x")];
        assert!(CredentialTable::from_records(&letters, 4).is_err());

        let none = vec![CredentialRecord::new("1234", AuthorizationLevel::None, "x")];
        assert!(CredentialTable::from_records(&none, 4).is_err());

        let mut duplicate = records();
        duplicate.push(CredentialRecord::new("1234", AuthorizationLevel::Level3, "y"));
        assert!(CredentialTable::from_records(&duplicate, 4).is_err());
    }

    #[test]
    fn test_pin_shape() {
        assert!(is_well_formed_pin("0042", 4));
        assert!(!is_well_formed_pin("004", 4));
        assert!(!is_well_formed_pin("00 4", 4));
    }

    fn level() -> impl Strategy<Value = AuthorizationLevel> {
        prop_oneof![
            Just(AuthorizationLevel::Level1),
            Just(AuthorizationLevel::Level2),
            Just(AuthorizationLevel::Level3),
        ]
    }

    proptest! {
        #[test]
        fn prop_configured_pins_map_to_their_level(
            entries in proptest::collection::btree_map("[0-9]{4}", (level(), "[A-Za-z]{1,8}"), 1..8),
            probe in "[0-9]{4}",
        ) {
            let records: Vec<CredentialRecord> = entries
                .iter()
                .map(|(pin, (level, label))| CredentialRecord::new(pin, *level, label))
                .collect();
            let table = CredentialTable::from_records(&records, 4).unwrap();

            for (pin, (level, label)) in &entries {
                prop_assert_eq!(
                    table.lookup(pin),
                    AuthOutcome::Granted { level: *level, label: label.clone() }
                );
            }
            if !entries.contains_key(&probe) {
                prop_assert_eq!(table.lookup(&probe), AuthOutcome::Rejected);
            }
        }
    }
}
