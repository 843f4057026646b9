pub mod coordinator;
pub mod logic;
pub mod rules;
pub mod scoring;
pub mod types;
