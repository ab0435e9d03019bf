//! Create trait for registering new entities.

use async_trait::async_trait;

use crate::client::InfrakitClient;
use crate::error::Result;

/// Create a new entity from a params struct.
///
/// Params structs only serialize the fields the caller actually set:
/// an omitted optional field is absent from the outbound payload, never
/// sent as an explicit null.
///
/// The server's answer to a creation is not always the entity itself
/// (project creation returns a status/uuid/id triple), so the response
/// shape is an associated type.
#[async_trait]
pub trait Create: Sized {
    /// Parameters accepted by the creation endpoint.
    type Params: Send + Sync;
    /// What the server echoes back on success.
    type Output;

    /// Create the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports
    /// `status: false`.
    async fn create(client: &InfrakitClient, params: Self::Params) -> Result<Self::Output>;
}
