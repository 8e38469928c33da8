pub mod config;
pub mod files;
pub mod ingest;
pub mod init;
pub mod log;
pub mod summary;
