pub mod downloader;
pub mod http;
pub mod probe;
pub mod segment;
pub mod store;
