//! Click event model for asynchronous click logging.

use crate::domain::entities::NewClick;

/// An in-memory click, passed from HTTP handlers to the background worker.
///
/// Decouples the redirect response from the database write. Client metadata
/// is optional so missing headers never fail a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub key: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     "f684a3c4".to_string(),
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     None,
    /// );
    /// ```
    pub fn new(
        key: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            key,
            ip,
            user_agent: user_agent.map(str::to_string),
            referer: referer.map(str::to_string),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            key: event.key,
            user_agent: event.user_agent,
            referer: event.referer,
            ip: event.ip,
        }
    }
}
