// src/services/mod.rs
pub mod calculations;
pub mod calculator;
pub mod comparison;
pub mod rate_tables;
