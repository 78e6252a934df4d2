//! Meal logging and macro tracking against a university dining menu.
//!
//! The domain pieces (`nutrition`, `meals`, `goals`, `menu`) only talk to
//! the outside world through [`storage::KeyValueStore`] and
//! [`menu::MenuSource`]; `app` exposes them over HTTP.

pub mod app;
pub mod config;
pub mod error;
pub mod goals;
pub mod meals;
pub mod menu;
pub mod nutrition;
pub mod state;
pub mod storage;

pub use error::{AppError, AppResult};
