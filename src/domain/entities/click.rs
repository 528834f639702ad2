//! Click record for a resolution served to a client.

/// Input data for recording a click.
///
/// The timestamp is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub key: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}
