//! Command handler modules.
//!
//! Each command lives in its own file as `handle_COMMAND_command`, takes its
//! output streams as `&mut dyn Write` and propagates failures as
//! [`CliError`](crate::error::CliError).

mod cfg;
mod play;
mod sim;
mod table;
mod weights;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use weights::handle_weights_command;
