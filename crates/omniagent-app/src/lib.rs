//! omniagent: terminal and HTTP front ends for the Quality, FLKH and Omni agents

pub mod app;
pub mod cli;
pub mod web;

pub use app::{setup_from_cli, AppConfig};
pub use cli::{Cli, Commands};
