pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod minute;
pub mod sections;
pub mod state;
pub mod synthetic;
pub mod ui;
pub mod view;
