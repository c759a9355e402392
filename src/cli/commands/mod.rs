//! CLI command implementations

pub mod init;
pub mod profile;
pub mod schema;
pub mod validate;
