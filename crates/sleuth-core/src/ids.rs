//! ID prefix constants, the `ServiceId` newtype, and prefixed ID generation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for investigation IDs (`"inv-a3f8b2c1"`).
pub const PREFIX_INVESTIGATION: &str = "inv";
/// Prefix for stored incident IDs (`"inc-a3f8b2c1"`).
pub const PREFIX_INCIDENT: &str = "inc";

/// Identifier of a service as declared in the service catalog.
///
/// Wraps the catalog's `name` field. Comparisons are exact and
/// case-sensitive; fuzzy matching against free-form text lives in
/// `sleuth-catalog`, and everything downstream of a resolve deals in
/// `ServiceId` only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ServiceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a prefixed ID, e.g. `"inv-a3f8b2c1"`.
///
/// Four random bytes rendered as 8-char lowercase hex, prepended with the
/// prefix. Falls back to a nanosecond timestamp when the OS entropy source
/// is unavailable, so ID generation itself never fails.
#[must_use]
pub fn new_id(prefix: &str) -> String {
    let mut bytes = [0u8; 4];
    if getrandom::fill(&mut bytes).is_ok() {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("{prefix}-{hex}")
    } else {
        format!("{prefix}-{:08x}", chrono::Utc::now().timestamp_subsec_nanos())
    }
}
