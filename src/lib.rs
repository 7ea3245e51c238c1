//! Seasons - a multi-view simulation of Earth's seasonal motion around the Sun

pub mod core;
pub mod math;
pub mod astro;
pub mod state;
pub mod scheduler;
pub mod services;
pub mod i18n;
pub mod config;
pub mod scene;
pub mod view;
pub mod manager;
pub mod app;
pub mod remote;

pub use app::SeasonsApp;
pub use config::SeasonsConfig;
