pub mod config;
pub mod confirm;
pub mod controllers;
pub mod form;
pub mod model;
pub mod route;
pub mod source;
pub mod telemetry;
pub mod terminal;
pub mod text_safe;
pub mod toggle;
pub mod ui;
pub mod view;

mod app;

pub use app::*;
