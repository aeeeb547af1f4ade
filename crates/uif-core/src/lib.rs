pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod dedup;
pub mod error;
pub mod fetcher;
pub mod filename;
pub mod http;
pub mod storage;
pub mod validate;
