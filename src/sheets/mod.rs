//! Spreadsheet collaborator integration

mod auth;
mod client;

pub use auth::{ServiceAccountKey, SheetsAuth};
pub use client::{ExchangeLogger, SheetsLogger};
