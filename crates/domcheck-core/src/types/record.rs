use serde::{Deserialize, Serialize};

use super::doh::DohResponse;

/// Literal marker identifying an SPF policy inside a TXT record
pub const SPF_MARKER: &str = "v=spf1";

/// Tri-state presence flag
///
/// `Unknown` means "not checked yet" and is distinct from a check that found
/// nothing. Serialises as `null` / `true` / `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence {
    /// Not checked, or the last check failed
    #[default]
    Unknown,
    /// Record found
    Present,
    /// Record not found
    Absent,
}

impl Presence {
    /// Returns the flag as an optional boolean
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Present => Some(true),
            Self::Absent => Some(false),
        }
    }

    /// Returns true once the flag carries a checked value
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<bool> for Presence {
    fn from(found: bool) -> Self {
        if found {
            Self::Present
        } else {
            Self::Absent
        }
    }
}

impl From<Option<bool>> for Presence {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Present => write!(f, "found"),
            Self::Absent => write!(f, "not found"),
        }
    }
}

impl Serialize for Presence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Presence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Self::from)
    }
}

/// Flags derived from one successful check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFlags {
    /// `_dmarc.<domain>` has a TXT record
    pub dmarc: bool,
    /// `<domain>` has a TXT record containing `v=spf1`
    pub spf: bool,
    /// `<domain>` answers a PTR query
    pub rdns: bool,
}

impl RecordFlags {
    /// Derive flags from the three resolver responses.
    ///
    /// The PTR query targets the hostname itself rather than an
    /// `in-addr.arpa` name; any answer counts as configured.
    #[must_use]
    pub fn from_responses(dmarc: &DohResponse, spf: &DohResponse, ptr: &DohResponse) -> Self {
        Self {
            dmarc: dmarc.has_answers(),
            spf: spf.any_data_contains(SPF_MARKER),
            rdns: ptr.has_answers(),
        }
    }
}

/// Partial update produced by checking one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "outcome")]
pub enum CheckOutcome {
    /// All three lookups completed
    Flags(RecordFlags),
    /// At least one lookup failed; no flags are kept
    Failed {
        /// Human-readable error marker
        error: String,
    },
}

impl CheckOutcome {
    /// Returns true if the check failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Per-domain check state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Lowercase domain name
    pub domain: String,

    /// DMARC policy published
    #[serde(default)]
    pub dmarc: Presence,

    /// SPF record published
    #[serde(default)]
    pub spf: Presence,

    /// Reverse DNS answered
    #[serde(default)]
    pub rdns: Presence,

    /// A check is in flight
    #[serde(default)]
    pub checking: bool,

    /// Error marker from the last failed check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainRecord {
    /// Create an unchecked record
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            dmarc: Presence::Unknown,
            spf: Presence::Unknown,
            rdns: Presence::Unknown,
            checking: false,
            error: None,
        }
    }

    /// Mark the record as being checked
    pub fn begin_check(&mut self) {
        self.checking = true;
    }

    /// Merge the result of a check into the record
    pub fn apply(&mut self, outcome: &CheckOutcome) {
        self.checking = false;
        match outcome {
            CheckOutcome::Flags(flags) => {
                self.dmarc = flags.dmarc.into();
                self.spf = flags.spf.into();
                self.rdns = flags.rdns.into();
                self.error = None;
            }
            CheckOutcome::Failed { error } => {
                self.dmarc = Presence::Unknown;
                self.spf = Presence::Unknown;
                self.rdns = Presence::Unknown;
                self.error = Some(error.clone());
            }
        }
    }

    /// Returns true once every flag carries a checked value
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.dmarc.is_known() && self.spf.is_known() && self.rdns.is_known()
    }
}
