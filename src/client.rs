//! Infrakit API client.
//!
//! Low-level HTTP dispatcher that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth;
use crate::credentials::Credentials;
use crate::error::{InfrakitError, Result};

const USER_AGENT: &str = concat!("infrakit/", env!("CARGO_PKG_VERSION"));

/// Header carrying the tenant's customer id on the multi-tenant deployment.
const CUSTOMER_ID_HEADER: &str = "X-Customer-Id";

/// Low-level Infrakit API client.
///
/// Handles token acquisition and HTTP dispatch. Entity-specific operations
/// are implemented via the `Get`, `List` and `Create` traits on model types.
///
/// Every request fetches a fresh bearer token before dispatch; no token is
/// cached between calls. Two concurrent calls through the same client each
/// perform their own token exchange.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and credentials.
///
/// # Example
///
/// ```no_run
/// use infrakit::{Credentials, InfrakitClient};
///
/// # fn example() -> infrakit::Result<()> {
/// // Create from environment variables
/// let client = InfrakitClient::new(Credentials::from_env()?)?;
///
/// // Or configure explicitly
/// let creds = Credentials::password("user", "pass", infrakit::Mode::Beta)?;
/// let client = InfrakitClient::new(creds)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InfrakitClient {
    http: Client,
    credentials: Arc<Credentials>,
    base_url: Arc<Url>,
    auth_url: Arc<Url>,
}

impl std::fmt::Debug for InfrakitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfrakitClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl InfrakitClient {
    /// Create a client for the deployment selected by the credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let base_url = credentials.base_url();
        let auth_url = credentials.auth_url();
        Self::with_urls(credentials, &base_url, &auth_url)
    }

    /// Create a client with explicit base and auth URLs.
    ///
    /// Intended for non-standard deployments and tests; `auth_url` is the
    /// token endpoint for password credentials or the OIDC discovery
    /// document for client credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is invalid.
    pub fn with_urls(credentials: Credentials, base_url: &str, auth_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so Url::join keeps the last segment
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;
        let auth_url = Url::parse(auth_url)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(InfrakitError::HttpError)?;

        Ok(Self {
            http,
            credentials: Arc::new(credentials),
            base_url: Arc::new(base_url),
            auth_url: Arc::new(auth_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credentials this client dispatches with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether this client holds the same credentials as `other`.
    ///
    /// Records keep a back-reference to the credentials that fetched them;
    /// follow-up calls use this to refuse cross-tenant mixing.
    pub(crate) fn holds(&self, other: &Credentials) -> bool {
        *self.credentials == *other
    }

    pub(crate) fn credentials_arc(&self) -> Arc<Credentials> {
        Arc::clone(&self.credentials)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Value> {
        let url = self.base_url.join(path)?;
        self.dispatch(Method::GET, url, None, None::<&()>).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value> {
        let url = self.base_url.join(path)?;
        self.dispatch(Method::GET, url, None, Some(query)).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.base_url.join(path)?;
        let payload = serde_json::to_value(body).map_err(InfrakitError::ParseError)?;
        self.dispatch(Method::POST, url, Some(payload), None::<&()>)
            .await
    }

    /// Make a body-less POST request whose payload rides in the query
    /// string (the folder-creation endpoint expects this shape).
    #[tracing::instrument(skip(self, query))]
    pub async fn post_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value> {
        let url = self.base_url.join(path)?;
        self.dispatch(Method::POST, url, None, Some(query)).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.base_url.join(path)?;
        let payload = serde_json::to_value(body).map_err(InfrakitError::ParseError)?;
        self.dispatch(Method::PUT, url, Some(payload), None::<&()>)
            .await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.base_url.join(path)?;
        self.dispatch(Method::DELETE, url, None, None::<&()>).await
    }

    /// Make a GET request and hand back the raw response for streaming
    /// consumption. Status is checked here; the body is not read.
    #[tracing::instrument(skip(self))]
    pub async fn get_stream(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let token = auth::fetch_token(&self.http, &self.credentials, &self.auth_url).await?;

        let mut request = self
            .http
            .get(url.clone())
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(customer_id) = self.credentials.customer_id() {
            request = request.header(CUSTOMER_ID_HEADER, customer_id);
        }

        let response = request.send().await.map_err(InfrakitError::HttpError)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(&Method::GET, &url, None, status, &body));
        }
        Ok(response)
    }

    /// Fetch a token, attach headers, issue the call and normalize the
    /// response into JSON or a typed failure.
    async fn dispatch<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        payload: Option<Value>,
        query: Option<&Q>,
    ) -> Result<Value> {
        let token = auth::fetch_token(&self.http, &self.credentials, &self.auth_url).await?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(customer_id) = self.credentials.customer_id() {
            request = request.header(CUSTOMER_ID_HEADER, customer_id);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(payload) = &payload {
            // .json sets Content-Type: application/json
            request = request.json(payload);
        }

        let response = request.send().await.map_err(InfrakitError::HttpError)?;
        let status = response.status();
        let body = response.text().await.map_err(InfrakitError::HttpError)?;

        if !status.is_success() {
            return Err(api_error(&method, &url, payload.as_ref(), status, &body));
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|source| InfrakitError::MalformedResponse {
                body: body.clone(),
                source,
            })?;

        // Some endpoints answer 200 with an explicit failure marker.
        if value.get("status").and_then(Value::as_bool) == Some(false) {
            return Err(api_error(&method, &url, payload.as_ref(), status, &body));
        }

        Ok(value)
    }
}

/// Deserialize a dispatcher result into a typed record.
pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    let body = value.to_string();
    serde_json::from_value(value)
        .map_err(|source| InfrakitError::MalformedResponse { body, source })
}

/// Build an [`InfrakitError::Api`] whose message carries the full request
/// and response context: method, URL, payload when present, and the raw
/// response text.
fn api_error(
    method: &Method,
    url: &Url,
    payload: Option<&Value>,
    status: StatusCode,
    body: &str,
) -> InfrakitError {
    let mut message = format!("HTTP {status}");
    message.push_str(&format!("\nRequest URL: {url}"));
    message.push_str(&format!("\nRequest Method: {method}"));
    if let Some(payload) = payload {
        message.push_str(&format!("\nRequest Payload: {payload}"));
    }
    message.push_str(&format!("\nAPI Response Text: {body}"));

    InfrakitError::Api {
        message,
        status_code: Some(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;

    fn password_client() -> InfrakitClient {
        let creds = Credentials::password("user", "pass", Mode::Production).unwrap();
        InfrakitClient::new(creds).unwrap()
    }

    #[test]
    fn test_client_debug_hides_secrets() {
        let client = password_client();
        let debug = format!("{client:?}");
        assert!(debug.contains("InfrakitClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("pass"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let creds = Credentials::password("user", "pass", Mode::Production).unwrap();
        let client1 = InfrakitClient::with_urls(
            creds.clone(),
            "https://app.infrakit.com/kuura/v1",
            "https://iam.infrakit.com/auth/token",
        )
        .unwrap();
        let client2 = InfrakitClient::with_urls(
            creds,
            "https://app.infrakit.com/kuura/v1/",
            "https://iam.infrakit.com/auth/token",
        )
        .unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_base_url_follows_mode() {
        let client = password_client();
        assert_eq!(
            client.base_url().as_str(),
            "https://app.infrakit.com/kuura/v1/"
        );
    }

    #[test]
    fn test_api_error_carries_all_context() {
        let url = Url::parse("https://app.infrakit.com/kuura/v1/project").unwrap();
        let payload = serde_json::json!({"name": "Test"});
        let err = api_error(
            &Method::POST,
            &url,
            Some(&payload),
            StatusCode::INTERNAL_SERVER_ERROR,
            "boom",
        );

        let text = err.to_string();
        assert!(text.contains("Request URL: https://app.infrakit.com/kuura/v1/project"));
        assert!(text.contains("Request Method: POST"));
        assert!(text.contains(r#"Request Payload: {"name":"Test"}"#));
        assert!(text.contains("API Response Text: boom"));
    }

    #[test]
    fn test_holds_compares_credential_values() {
        let client = password_client();
        let same = Credentials::password("user", "pass", Mode::Production).unwrap();
        let other = Credentials::password("user", "pass", Mode::Beta).unwrap();
        assert!(client.holds(&same));
        assert!(!client.holds(&other));
    }
}
