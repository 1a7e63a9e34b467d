//! Command implementations

pub mod completions;
pub mod init;
pub mod list;
pub mod lookup;
pub mod record;
pub mod status;
pub mod utils;
