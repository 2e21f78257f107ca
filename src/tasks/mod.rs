//! Tasks Module
//!
//! Background housekeeping tasks.

mod sweep;

pub use sweep::spawn_sweep_task;
