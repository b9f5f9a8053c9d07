pub mod config;
pub mod logging;

pub mod agent;
pub mod control;
pub mod download;
pub mod indicator;
pub mod links;
pub mod panel;
pub mod store;
pub mod url_model;
