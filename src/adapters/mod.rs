pub mod blob_store;
pub mod summarizer;
pub mod transport;
