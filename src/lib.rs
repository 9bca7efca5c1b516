//! Hubnote library crate: one-way export of GitHub issues and pull requests
//! into a Notion database.
//!
//! The library fetches entities over the GitHub GraphQL API (plus the REST
//! diff media type), converts their markdown bundles into Notion blocks, and
//! creates one page per entity in a destination database. Clients are
//! constructed explicitly from configuration and passed into the export
//! pipeline, so tests can substitute gateways freely.

pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod github;
pub mod notion;

pub use config::{HubnoteConfig, OperationMode};
pub use error::ExportError;
pub use export::Exporter;
pub use github::{
    OctocrabSourceGateway, PersonalAccessToken, RepositoryLocator, SourceGateway,
    collect_pull_requests,
};
pub use notion::{DestinationGateway, NotionClient, NotionDatabaseId, NotionToken};
