use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::DomcheckError;

/// DNS record types queried over DNS-over-HTTPS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Text record (DMARC policies, SPF)
    Txt,
    /// Pointer record (reverse DNS)
    Ptr,
}

impl RecordType {
    /// Name used in the `type` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "TXT",
            Self::Ptr => "PTR",
        }
    }

    /// Numeric RR type code as reported in answers
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Txt => 16,
            Self::Ptr => 12,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DomcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TXT" | "16" => Ok(Self::Txt),
            "PTR" | "12" => Ok(Self::Ptr),
            _ => Err(DomcheckError::Config(format!(
                "unsupported record type: {s} (expected TXT or PTR)"
            ))),
        }
    }
}

/// JSON body returned by a DNS-over-HTTPS resolver
///
/// Follows the `application/dns-json` format served by Google and Cloudflare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohResponse {
    /// DNS response code (0 = NOERROR, 3 = NXDOMAIN)
    #[serde(rename = "Status", default)]
    pub status: u32,

    /// Response was truncated
    #[serde(rename = "TC", default)]
    pub tc: bool,

    /// Recursion desired
    #[serde(rename = "RD", default)]
    pub rd: bool,

    /// Recursion available
    #[serde(rename = "RA", default)]
    pub ra: bool,

    /// Answer was DNSSEC validated
    #[serde(rename = "AD", default)]
    pub ad: bool,

    /// DNSSEC validation disabled by the client
    #[serde(rename = "CD", default)]
    pub cd: bool,

    /// Echo of the question section
    #[serde(rename = "Question", default, deserialize_with = "null_as_empty")]
    pub question: Vec<DohQuestion>,

    /// Answer section; absent or null when no records exist
    #[serde(rename = "Answer", default, deserialize_with = "null_as_empty")]
    pub answer: Vec<DohAnswer>,

    /// Free-form diagnostic from the resolver
    #[serde(rename = "Comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DohResponse {
    /// Returns true if the answer section carries at least one record
    #[must_use]
    pub fn has_answers(&self) -> bool {
        !self.answer.is_empty()
    }

    /// Returns true if any answer's data contains `marker` (case-sensitive)
    #[must_use]
    pub fn any_data_contains(&self, marker: &str) -> bool {
        self.answer.iter().any(|a| a.data.contains(marker))
    }

    /// Iterate over the raw data of every answer
    pub fn data(&self) -> impl Iterator<Item = &str> {
        self.answer.iter().map(|a| a.data.as_str())
    }
}

/// Some resolvers send `null` instead of omitting an empty section
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Question echoed back by the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohQuestion {
    /// Queried name
    #[serde(default)]
    pub name: String,

    /// Numeric RR type
    #[serde(rename = "type", default)]
    pub record_type: u16,
}

/// Single answer record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohAnswer {
    /// Owner name
    #[serde(default)]
    pub name: String,

    /// Numeric RR type
    #[serde(rename = "type", default)]
    pub record_type: u16,

    /// Time to live in seconds
    #[serde(rename = "TTL", default)]
    pub ttl: u32,

    /// Record data in presentation form
    pub data: String,
}
