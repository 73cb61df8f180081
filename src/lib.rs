pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod i18n;
pub mod logging;
pub mod playground;
pub mod render;
pub mod ui;
pub mod web;
