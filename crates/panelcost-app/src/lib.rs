//! Application service layer - config, rate catalog, estimates, export

pub mod app;
pub mod catalog;
pub mod config;
pub mod export;
pub mod repository;
