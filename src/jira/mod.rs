//! Remote catalog: JIRA wire types, capability traits, and the REST client

pub mod client;
pub mod traits;
pub mod types;

pub use client::RestClient;
pub use traits::{CatalogReads, CatalogWrites};
pub use types::{Component, Mapping, Project, Version};
