//! Display formatting for terminal output

pub mod account;
pub mod progress;

pub use account::format_account_table;
pub use progress::{format_bar, format_progress_line, format_ready_banner};
