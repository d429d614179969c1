//! Storage layer
//!
//! Reads budget snapshots from JSON or YAML files and writes JSON with
//! atomic renames.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json_required, read_yaml_required, write_json_atomic};
pub use snapshot::{load_snapshot, save_snapshot, BudgetSnapshot, SnapshotFormat};
