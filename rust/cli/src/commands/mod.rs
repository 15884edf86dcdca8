//! Command handler modules for the `hilo` CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) and stdin passed in as parameters
//! - Errors propagated via the `CliError` enum

mod cfg;
mod deal;
mod play;
mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use stats::handle_stats_command;
