pub mod catalog;
pub mod config;
pub mod context;
pub mod data;
pub mod prompts;
pub mod spinner;
pub mod stats;
pub mod tables;
pub mod watched;
pub mod watchlist;
