pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod form;
pub mod ui;
