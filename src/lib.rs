pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod web;


pub use config::Config;
pub use services::slug::{encode_title, encode_title_opt};
