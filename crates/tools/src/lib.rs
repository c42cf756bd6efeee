//! hamcode tools library

pub mod common;
pub mod config;
pub mod input;
pub mod report;
pub mod sim;

pub use common::GlobalConfig;
pub use config::{SimArgs, SimConfig, SimMode};
pub use input::InputSource;
pub use sim::{SimReport, Simulator};
