pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;
pub mod telemetry;
pub mod web;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::repository::PostRepository;
