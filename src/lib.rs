pub mod cli;
pub mod config;
pub mod finder;
pub mod finder_tui;
pub mod models;
