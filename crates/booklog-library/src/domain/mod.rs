//! Domain model: book records, the aggregate ledger and derived views.

pub mod book;
pub mod commands;
pub mod ledger;
pub mod views;
