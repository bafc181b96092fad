pub mod app;
pub mod logging;
