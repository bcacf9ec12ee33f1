//! In-memory RDF datasets for application code: typed accessors over quads, navigation
//! through linked objects and named graphs, change tracking with Solid N3 patch output,
//! and origin tracking for datasets derived from fetched documents.
//!
//! ```ignore
//! use semantizer::{Config, Semantizer, TypedAccessors};
//!
//! let semantizer = Semantizer::new(Config::default())?;
//! let catalog = semantizer.load("https://example.org/catalog")?;
//! for offer in catalog.get_linked_object_all(HAS_OFFER, None, None) {
//!     let price = offer.get_object_decimal(OFFER, HAS_PRICE, None)?;
//! }
//! ```

pub mod accessors;
pub mod changelog;
pub mod config;
pub mod consts;
pub mod dataset;
pub mod errors;
pub mod ids;
pub mod loader;
pub mod navigator;
pub mod origin;
pub mod patch;
pub mod semantizer;
pub mod store;
pub mod util;

pub use accessors::{TypedAccessors, XsdValue};
pub use changelog::{ChangeLog, Changelog};
pub use config::Config;
pub use dataset::{LoggedDataset, SemanticDataset};
pub use errors::{Result, SemantizerError};
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use loader::{FileLoader, HttpLoader, Loader, QuadStreamLoader, SchemeLoader, StaticLoader};
pub use origin::{NodeRef, Origin, Resource};
pub use semantizer::Semantizer;
pub use store::{MemoryStore, QuadPattern, QuadStore};
