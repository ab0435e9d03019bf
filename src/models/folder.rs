//! Folder model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{self, InfrakitClient};
use crate::error::Result;
use crate::traits::{Create, Get};

/// A folder in a project's document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Folder UUID.
    pub uuid: String,

    /// Folder name.
    pub name: String,

    /// UUID of the parent folder; absent at the project root.
    #[serde(default)]
    pub parent_uuid: Option<String>,

    /// Child folders, populated when the listing depth allows.
    #[serde(default)]
    pub folders: Vec<Folder>,
}

/// Parameters for creating a folder.
///
/// The folder endpoint takes its payload in the query string, not as a JSON
/// body. Serialization still follows the omit-if-absent contract: an unset
/// `parent_uuid` does not appear in the query at all.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderCreateParams {
    /// Folder name.
    pub name: String,

    /// UUID of the parent folder; omit to create at the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_uuid: Option<String>,
}

#[async_trait]
impl Get for Folder {
    type Id = String; // Folder UUID

    #[tracing::instrument(skip(client))]
    async fn get(client: &InfrakitClient, id: String) -> Result<Self> {
        let path = format!("folder/{}", urlencoding::encode(&id));
        let value = client.get(&path).await?;
        client::from_value(value)
    }
}

#[async_trait]
impl Create for Folder {
    type Params = FolderCreateParams;
    type Output = Folder;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &InfrakitClient, params: Self::Params) -> Result<Self::Output> {
        // Query-string payload, by server contract.
        let value = client.post_with_query("folder", &params).await?;
        client::from_value(value)
    }
}
