use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decoded value of a requested secret.
///
/// `secret` is the only supported field name. Bodies from the retired API
/// revision that used `value` fail to decode.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SecretValue {
    /// Plain-text secret.
    pub secret: String,
}

/// A timestamp as delivered by the vault listing.
///
/// Newer deployments send RFC 3339 date-times, older ones send plain date
/// strings such as `2025-07-01`. The literal text is kept when it does not
/// parse.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Timestamp {
    /// An RFC 3339 date-time.
    DateTime(DateTime<Utc>),
    /// Any other string, as received.
    Raw(String),
}

impl Timestamp {
    /// The structured date-time, if the wire value was RFC 3339.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Timestamp::DateTime(dt) => Some(dt),
            Timestamp::Raw(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Timestamp::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Metadata for one stored secret. The value itself is never listed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretEntry {
    /// Identifier, unique within the vault.
    pub key: String,
    /// Incremented on every update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// How many times the secret has been read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times_pulled: Option<u64>,
    /// When the secret was created.
    pub date_added: Timestamp,
    /// When the secret was last changed.
    pub last_modified: Timestamp,
}

/// Body sent by create, update and delete requests.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WritePayload {
    /// Secret identifier.
    #[serde(rename = "secretID")]
    pub secret_id: String,
    /// Secret value; empty for deletes.
    #[serde(rename = "secretValue")]
    pub secret_value: String,
}

impl WritePayload {
    pub(crate) fn new(secret_id: &str, secret_value: &str) -> Self {
        Self {
            secret_id: secret_id.to_string(),
            secret_value: secret_value.to_string(),
        }
    }
}

/// Body returned by a successful create.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OperationResponse {
    /// Server message.
    pub message: String,
}
