//! Release catalog layer
//!
//! Fetches the list of published Go releases once per process and answers
//! questions about it: does a version exist, is it stable, which releases
//! share its major prefix.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Catalog   │◀────│  Validate   │
//! │  (fetch)    │     │ (fetch once)│     │ (membership)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Sources   │     │ Candidates  │
//! │(go.dev,snap)│     │  (ordering) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Fetch-once catalog holding the version map
//! - [`candidates`]: Release classification and latest-first ordering
//! - [`error`]: Error types for catalog and validation operations
//! - [`source`]: Source trait and payload decoding
//! - [`sources`]: Concrete sources (go.dev, embedded snapshot)
//! - [`validate`]: Syntax gate, membership and stability checks

pub mod candidates;
pub mod catalog;
pub mod error;
pub mod source;
pub mod sources;
pub mod validate;

pub use candidates::{ReleaseKind, find_candidates};
pub use catalog::VersionCatalog;
pub use error::{CatalogError, VersionError};
pub use source::{CatalogSource, VersionMap};
pub use validate::{major_version, stable_version, valid_version};
