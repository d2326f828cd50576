pub mod cli;
pub mod data;
pub mod parallel;
pub mod server;
pub mod sim;
pub mod sweep;
