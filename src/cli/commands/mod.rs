//! One module per CLI command.

pub mod completions;
pub mod delete;
pub mod encrypt;
pub mod get;
pub mod hash;
pub mod keygen;
pub mod list;
pub mod password;
pub mod purge;
pub mod set;
pub mod status;
pub mod version;
