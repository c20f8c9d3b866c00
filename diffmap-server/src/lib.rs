//! HTTP surface for Diffmap: a small JSON API plus an embedded single-page
//! UI. Routes are built in [`rest::create_app`].

pub mod config;
pub mod rest;
pub mod web_ui;

pub use config::{SecurityConfig, ServerConfig};
pub use rest::create_app;
