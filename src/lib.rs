pub mod alerts;
pub mod app_context;
pub mod config;
pub mod jobs;
pub mod measurement;
pub mod monitor;
pub mod notify;
pub mod series;
pub mod source;
