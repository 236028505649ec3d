pub mod error;
pub mod list_model;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
