pub mod app;
pub mod core;
pub mod render;
pub mod service;
pub mod toast;
