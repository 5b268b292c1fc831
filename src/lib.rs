// Library crate exposing modules for the binary and integration tests

pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod repository;
pub mod util;

pub use error::{Result, StatError};
