//! CLI command handlers. Each command is in its own file.

mod collection;
mod completions;
mod update;

pub use collection::{run_pull, run_push};
pub use completions::run_completions;
pub use update::run_update;

#[cfg(test)]
pub(crate) use update::format_record;
