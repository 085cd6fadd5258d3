//! cashii keeps a personal ledger of one-time and recurring transactions and turns it into
//! running-balance statements for any date window.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod render;
pub mod storage;
mod utils;

#[cfg(test)]
mod test;

pub use config::{default_ledger_path, Config};
pub use error::Error;
pub use error::Result;
