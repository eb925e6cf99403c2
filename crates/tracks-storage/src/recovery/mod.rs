//! Recovery from corrupt storage.

pub mod database_files;

pub use database_files::remove_database_files;
