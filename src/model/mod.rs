pub mod config;
pub mod gene;
pub mod probe;
pub mod structures;
