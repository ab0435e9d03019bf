//! Token acquisition for both OAuth2 flows.
//!
//! Every call performs the full network round trip: there is no token cache,
//! no refresh scheduling and no expiry tracking. The dispatcher fetches a
//! fresh bearer token for every outbound request, so callers must not assume
//! token reuse across calls.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::credentials::Credentials;
use crate::error::{InfrakitError, Result};

/// Password-grant token response. The field name is fixed by the server.
#[derive(Deserialize)]
struct PasswordTokenResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Client-credentials token response, standard OAuth2 shape.
#[derive(Deserialize)]
struct OauthTokenResponse {
    access_token: String,
}

/// Minimal subset of the OIDC discovery document. Only `token_endpoint` is
/// read; everything else is ignored.
#[derive(Deserialize)]
struct DiscoveryDocument {
    token_endpoint: String,
}

/// Exchange credentials for a fresh bearer token.
///
/// `auth_url` is the token endpoint for the password variant, or the OIDC
/// discovery document URL for the client-credentials variant.
///
/// # Errors
///
/// Returns [`InfrakitError::Authentication`] when any auth step answers with
/// a status other than 200, or [`InfrakitError::MalformedResponse`] when a
/// 200 body cannot be parsed.
#[tracing::instrument(skip(http, credentials))]
pub(crate) async fn fetch_token(
    http: &Client,
    credentials: &Credentials,
    auth_url: &Url,
) -> Result<String> {
    match credentials {
        Credentials::Password {
            username, password, ..
        } => password_grant(http, auth_url, username, password).await,
        Credentials::ClientCredentials {
            client_id,
            client_secret,
            ..
        } => client_credentials_grant(http, auth_url, client_id, client_secret).await,
    }
}

/// POST `grant_type=password` directly to the fixed token endpoint.
async fn password_grant(
    http: &Client,
    token_url: &Url,
    username: &str,
    password: &str,
) -> Result<String> {
    let response = http
        .post(token_url.clone())
        .form(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ])
        .send()
        .await
        .map_err(InfrakitError::HttpError)?;

    let body = require_ok(response).await?;
    let token: PasswordTokenResponse = parse_json(&body)?;
    Ok(token.access_token)
}

/// Resolve the tenant's token endpoint via OIDC discovery, then POST a
/// client-credentials grant to it with HTTP basic auth.
async fn client_credentials_grant(
    http: &Client,
    discovery_url: &Url,
    client_id: &str,
    client_secret: &str,
) -> Result<String> {
    let response = http
        .get(discovery_url.clone())
        .send()
        .await
        .map_err(InfrakitError::HttpError)?;

    let body = require_ok(response).await?;
    let discovery: DiscoveryDocument = parse_json(&body)?;
    let token_endpoint = Url::parse(&discovery.token_endpoint)?;

    let response = http
        .post(token_endpoint)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(InfrakitError::HttpError)?;

    let body = require_ok(response).await?;
    let token: OauthTokenResponse = parse_json(&body)?;
    Ok(token.access_token)
}

/// Success is exactly HTTP 200; anything else fails with the status code and
/// the raw response text.
async fn require_ok(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(InfrakitError::HttpError)?;

    if status != StatusCode::OK {
        return Err(InfrakitError::Authentication {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn parse_json<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| InfrakitError::MalformedResponse {
        body: body.to_string(),
        source,
    })
}
