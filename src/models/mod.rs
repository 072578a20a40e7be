//! Harvest API model types.

mod client;
mod cost_rate;
mod expense;
mod report;
mod role;
mod task;

pub use client::*;
pub use cost_rate::*;
pub use expense::*;
pub use report::*;
pub use role::*;
pub use task::*;
