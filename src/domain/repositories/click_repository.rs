//! Repository trait for click logging.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for clicks recorded after successful resolutions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, click: NewClick) -> Result<(), AppError>;

    /// Counts recorded clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
