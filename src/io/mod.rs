// src/io/mod.rs

pub mod ledger;
pub mod reporting;
pub mod settings;
pub mod synthetic;
