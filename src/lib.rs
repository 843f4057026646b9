pub mod config;
pub mod cors;
pub mod db;
pub mod error;
pub mod game;
pub mod http;
pub mod metrics;
pub mod oracle;
