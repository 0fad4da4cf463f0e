// src/simulation/mod.rs

pub mod config;
pub mod engine;
pub mod feasibility;
pub mod metrics;
