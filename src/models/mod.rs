//! Request and response models
//!
//! Plain serde types for every Cloudant payload. Objects with an open
//! schema (`Document`, `DesignDocument`, `ReplicationDocument`,
//! `GeoJsonFeature`, `IndexField`) keep unknown keys through
//! [`AdditionalProperties`].

mod changes;
mod database_details;
mod databases;
mod design_documents;
mod documents;
mod geospatial;
mod open;
mod partitions;
mod queries;
mod replication;
mod searches;
mod security;
mod server;
mod views;

pub use changes::*;
pub use database_details::*;
pub use databases::*;
pub use design_documents::*;
pub use documents::*;
pub use geospatial::*;
pub use open::AdditionalProperties;
pub use partitions::*;
pub use queries::*;
pub use replication::*;
pub use searches::*;
pub use security::*;
pub use server::*;
pub use views::*;
