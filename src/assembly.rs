//! Element-level and global assembly of the heat-conduction system.
pub mod global;
pub mod local;
pub mod trace;
