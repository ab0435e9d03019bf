//! Infrakit API client library.
//!
//! A Rust library for interacting with the Infrakit construction-surveying
//! REST API, using a trait-based architecture where each operation
//! (Get, List, Create) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use infrakit::{Alert, Credentials, InfrakitClient, List, Project};
//!
//! #[tokio::main]
//! async fn main() -> infrakit::Result<()> {
//!     // Create client from environment variables
//!     let client = InfrakitClient::new(Credentials::from_env()?)?;
//!
//!     // List all projects
//!     let projects = Project::list(&client, &Default::default()).await?;
//!     println!("Found {} projects", projects.len());
//!
//!     // Walk a project's folder tree
//!     if let Some(project) = projects.first() {
//!         let folders = project.folders(&client, 1).await?;
//!         println!("{} has {} top-level folders", project.name, folders.len());
//!     }
//!
//!     // List alerts
//!     let alerts = Alert::list(&client, &()).await?;
//!     println!("Found {} alerts", alerts.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three core traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch collections of entities
//! - [`Create`] - Register a new entity
//!
//! Each entity type (like [`Project`] or [`Folder`]) implements the traits
//! supported by its API endpoints. Export downloads are the exception: they
//! answer with newline-delimited JSON and are consumed through
//! [`ExportStream`] instead of a one-shot call.
//!
//! # Authentication
//!
//! Two credential shapes are supported, selected at construction time:
//!
//! - **Password grant** (single tenant): `USERNAME`, `PASSWORD` and an
//!   optional `MODE` (`production`/`beta`/`test`) pick one of the fixed
//!   `*.infrakit.com` origins.
//! - **Client credentials** (multi tenant): `CUSTOMER_ID`, `CLIENT_ID`,
//!   `CLIENT_SECRET` and an optional `SUBDOMAIN` resolve a per-tenant
//!   origin and realm via OIDC discovery.
//!
//! A fresh bearer token is fetched for every request; nothing is cached.

mod auth;
mod client;
mod credentials;
mod error;
mod export;
mod mode;
mod models;
mod traits;

// Re-export core types
pub use client::InfrakitClient;
pub use credentials::Credentials;
pub use error::{InfrakitError, Result};
pub use export::ExportStream;
pub use mode::Mode;

// Re-export traits
pub use traits::{Create, Get, List};

// Re-export models
pub use models::{
    // Alert types
    Alert,
    AlertCreateParams,
    // Project types
    CoordinateSystem,
    HeightSystem,
    Organization,
    Project,
    ProjectCreateParams,
    ProjectCreationResponse,
    ProjectListQuery,
    // Folder types
    Folder,
    FolderCreateParams,
    // Document types
    Document,
    DocumentCreateParams,
    GeographicPoint,
};
