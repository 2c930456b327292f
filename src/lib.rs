pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
