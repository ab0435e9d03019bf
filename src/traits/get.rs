//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::InfrakitClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (typically a UUID).
///
/// # Example
///
/// ```ignore
/// use infrakit::{Credentials, Folder, Get, InfrakitClient};
///
/// let client = InfrakitClient::new(Credentials::from_env()?)?;
/// let folder = Folder::get(&client, "0c9e94f0-…".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., String UUID).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &InfrakitClient, id: Self::Id) -> Result<Self>;
}
