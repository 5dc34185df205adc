pub mod dataset;
pub mod error;
pub mod import;
pub mod models;
