use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::{CheckOutcome, DomainRecord};
use crate::extract::extract_domains;

/// Domain records keyed by lowercase domain name
///
/// Iteration is in ascending domain order. Records are only updated by key,
/// so results of concurrent checks can be applied in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainSet(BTreeMap<String, DomainRecord>);

impl DomainSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh set from the domains found in `text`
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_domains(extract_domains(text))
    }

    /// Build a set from already validated domains
    ///
    /// Domains are lowercased; duplicates collapse.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            domains
                .into_iter()
                .map(|d| {
                    let domain = d.as_ref().to_ascii_lowercase();
                    (domain.clone(), DomainRecord::new(domain))
                })
                .collect(),
        )
    }

    /// Discard every record and rebuild from `text`
    pub fn replace_from_text(&mut self, text: &str) {
        *self = Self::from_text(text);
    }

    /// Look up a record by domain (case-insensitive)
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&DomainRecord> {
        self.0.get(&domain.to_ascii_lowercase())
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over records in domain order
    pub fn iter(&self) -> impl Iterator<Item = &DomainRecord> {
        self.0.values()
    }

    /// Clone the records into a vector in domain order
    #[must_use]
    pub fn records(&self) -> Vec<DomainRecord> {
        self.0.values().cloned().collect()
    }

    /// Domain names in ascending order
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Domains with a check in flight
    #[must_use]
    pub fn pending(&self) -> Vec<&str> {
        self.0
            .values()
            .filter(|r| r.checking)
            .map(|r| r.domain.as_str())
            .collect()
    }

    /// Mark `domain` as being checked
    ///
    /// Returns false if the set has no record for `domain`.
    pub fn begin_check(&mut self, domain: &str) -> bool {
        self.0
            .get_mut(&domain.to_ascii_lowercase())
            .map(DomainRecord::begin_check)
            .is_some()
    }

    /// Apply a check outcome to the record for `domain`
    ///
    /// Returns false if the set has no record for `domain`, e.g. after a
    /// fresh extraction replaced the set while the check was in flight.
    pub fn apply(&mut self, domain: &str, outcome: &CheckOutcome) -> bool {
        self.0
            .get_mut(&domain.to_ascii_lowercase())
            .map(|record| record.apply(outcome))
            .is_some()
    }
}

impl<'a> IntoIterator for &'a DomainSet {
    type Item = &'a DomainRecord;
    type IntoIter = std::collections::btree_map::Values<'a, String, DomainRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

impl IntoIterator for DomainSet {
    type Item = DomainRecord;
    type IntoIter = std::collections::btree_map::IntoValues<String, DomainRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{Presence, RecordFlags};

    const FLAGS: RecordFlags = RecordFlags {
        dmarc: true,
        spf: false,
        rdns: false,
    };

    #[test]
    fn from_text_is_sorted_and_unchecked() {
        let set = DomainSet::from_text("zeta.io Alpha.com alpha.com mid.net");
        assert_eq!(set.domains(), vec!["alpha.com", "mid.net", "zeta.io"]);
        assert!(set.iter().all(|r| !r.is_checked() && !r.checking));
    }

    #[test]
    fn keyed_updates() {
        let mut set = DomainSet::from_text("a.com b.com");
        assert!(set.begin_check("B.com"));
        assert_eq!(set.pending(), vec!["b.com"]);

        assert!(set.apply("b.com", &CheckOutcome::Flags(FLAGS)));
        assert!(set.pending().is_empty());
        assert_eq!(set.get("b.com").unwrap().dmarc, Presence::Present);
        assert_eq!(set.get("a.com").unwrap().dmarc, Presence::Unknown);
    }

    #[test]
    fn updates_for_unknown_domains_are_ignored() {
        let mut set = DomainSet::from_text("a.com");
        assert!(!set.begin_check("gone.com"));
        assert!(!set.apply("gone.com", &CheckOutcome::Flags(FLAGS)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut set = DomainSet::from_text("a.com");
        set.apply("a.com", &CheckOutcome::Flags(FLAGS));
        let once = set.clone();
        set.apply("a.com", &CheckOutcome::Flags(FLAGS));
        assert_eq!(set, once);
    }

    #[test]
    fn failure_isolated_to_one_domain() {
        let mut set = DomainSet::from_text("a.com b.com");
        set.apply("a.com", &CheckOutcome::Flags(FLAGS));
        set.apply(
            "b.com",
            &CheckOutcome::Failed {
                error: "boom".into(),
            },
        );
        assert!(set.get("a.com").unwrap().error.is_none());
        assert!(set.get("a.com").unwrap().is_checked());
        assert_eq!(set.get("b.com").unwrap().error.as_deref(), Some("boom"));
    }

    #[test]
    fn replace_discards_old_records() {
        let mut set = DomainSet::from_text("a.com");
        set.apply("a.com", &CheckOutcome::Flags(FLAGS));
        set.replace_from_text("a.com c.org");
        assert_eq!(set.domains(), vec!["a.com", "c.org"]);
        assert!(!set.get("a.com").unwrap().is_checked());
    }

    #[test]
    fn serializes_as_map() {
        let set = DomainSet::from_domains(["Example.com"]);
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.get("example.com").is_some());
    }
}
