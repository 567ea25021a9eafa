pub mod action;
pub mod app;
pub mod config;
pub mod controller;
pub mod event;
pub mod format;
#[cfg(feature = "perf-tracing")]
pub mod perf;
pub mod system;
pub mod terminal;
pub mod ui;
pub mod view;
