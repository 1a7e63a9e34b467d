//! Core module - storage, lookup resolution and filter queries

pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod lookup;
pub mod record;
pub mod store;
pub mod workspace;

pub use config::Config;
pub use error::DirectoryError;
pub use filter::{build_query, FilterColumn, FilterSpec, Predicate, SelectQuery};
pub use lookup::{LookupEntry, LookupTable};
pub use record::{DirectoryRecord, DirectoryRow, RecordFields};
pub use store::{Directory, DirectoryStats};
pub use workspace::{Workspace, WorkspaceError};
