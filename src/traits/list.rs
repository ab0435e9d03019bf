//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::InfrakitClient;
use crate::error::Result;

/// List entities with optional filtering.
///
/// The Infrakit list endpoints answer with a plain JSON array in server
/// order; implementations preserve that order.
///
/// # Example
///
/// ```ignore
/// use infrakit::{Alert, Credentials, InfrakitClient, List};
///
/// let client = InfrakitClient::new(Credentials::from_env()?)?;
/// let alerts = Alert::list(&client, &()).await?;
/// ```
#[async_trait]
pub trait List: Sized {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded into the entity type.
    async fn list(client: &InfrakitClient, query: &Self::Query) -> Result<Vec<Self>>;
}
