pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;

pub use app::App;
pub use catalog::Catalog;
pub use config::Config;
pub use error::{AgroDoseError, Result};
pub use logic::DosageEngine;
