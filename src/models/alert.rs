//! Alert model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{self, InfrakitClient};
use crate::error::Result;
use crate::traits::{Create, List};

/// An alert raised on the tenant's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Numeric alert id.
    pub id: i64,
    /// Alert message text.
    pub message: String,
}

/// Parameters for posting a new alert.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCreateParams {
    /// Alert message text.
    pub message: String,

    /// UUID of the project the alert concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<String>,
}

#[async_trait]
impl List for Alert {
    // The alerts endpoint takes no filters.
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &InfrakitClient, _query: &Self::Query) -> Result<Vec<Self>> {
        let value = client.get("alerts").await?;
        client::from_value(value)
    }
}

#[async_trait]
impl Create for Alert {
    type Params = AlertCreateParams;
    type Output = Alert;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &InfrakitClient, params: Self::Params) -> Result<Self::Output> {
        let value = client.post("alert", &params).await?;
        client::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_deserialize_preserves_order() {
        let json = r#"[{"id": 1, "message": "Test alert"}, {"id": 2, "message": "Second"}]"#;
        let alerts: Vec<Alert> = serde_json::from_str(json).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].id, 1);
        assert_eq!(alerts[0].message, "Test alert");
        assert_eq!(alerts[1].id, 2);
    }

    #[test]
    fn test_create_params_omit_unset_project() {
        let params = AlertCreateParams {
            message: "New alert".to_string(),
            project_uuid: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"message": "New alert"}));
    }
}
