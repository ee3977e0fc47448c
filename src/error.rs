//! Error taxonomy for the DiffServ core.
//!
//! Only configuration ingestion raises a hard error (`ConfigError`). Header
//! parsing failures are recovered locally as "no match" and never surface
//! (see [`crate::header`]); queue overflow, no-match classification and
//! scheduling underflow are modeled as `bool`/`Option`, not errors.

/// Failure to decode a [`crate::header::HeaderView`] from raw bytes.
///
/// Always recovered internally by [`crate::filter_element::FilterElement::matches`]
/// as "this element does not match" — it is never returned to a caller of
/// the public queue-discipline API (`enqueue`/`dequeue`/`remove`/`peek`).
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum HeaderParseError {
    /// The declared link-layer framing could not be stripped (buffer too short).
    #[error("framing header missing or buffer too short")]
    FramingMissing,

    /// The IPv4 fixed header did not fit in the remaining bytes.
    #[error("IPv4 header missing or truncated")]
    IpHeaderMissing,

    /// `proto` indicated TCP/UDP but the 4-byte L4 port prefix did not fit.
    #[error("L4 header missing or truncated")]
    L4HeaderMissing,
}

/// Misconfiguration detected while building a scheduler from a
/// [`crate::config::SchedulerConfig`]. Fatal to the scheduler's construction;
/// never raised once a scheduler exists.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    /// An SPQ queue config omitted the required `priority` field.
    #[error("queue {index} is missing a priority level (required for SPQ)")]
    MissingPriority { index: usize },

    /// A DRR queue config omitted the required `weight` field.
    #[error("queue {index} is missing a weight (required for DRR)")]
    MissingWeight { index: usize },

    /// The configuration's queue list was empty.
    #[error("scheduler configuration must declare at least one queue")]
    NoQueues,

    /// The configuration could not be deserialized.
    #[error("invalid configuration: {0}")]
    Deserialize(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Deserialize(err.to_string())
    }
}
