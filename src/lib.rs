pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod data_models;
pub mod error;
pub mod input;
pub mod rank;
pub mod render;
pub mod views;
