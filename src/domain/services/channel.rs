//! Client channel used to push interstitial targets.

use async_trait::async_trait;

/// The peer has gone away; nothing can be written to the channel anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("client channel is closed")]
pub struct ChannelClosed;

/// A message-oriented, single-writer channel to a connected client.
///
/// Supplied by the delivery layer for each interstitial session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientChannel: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> String;

    /// Returns false once either side has closed the channel.
    fn is_open(&self) -> bool;

    /// Sends a single text message.
    async fn send(&self, text: String) -> Result<(), ChannelClosed>;

    /// Closes the channel from the server side.
    async fn close(&self);
}
