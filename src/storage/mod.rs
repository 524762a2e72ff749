pub mod content_hash;
pub mod document_store;
pub mod snapshot;
