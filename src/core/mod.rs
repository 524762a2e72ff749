pub mod types;
pub mod config;
pub mod error;
pub mod index;
pub mod shared;
pub mod stats;
