//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod list;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use list::run_list;
