//! CLI domain: parse, route, help, output, and presentation only.
//! No domain logic; a single route table dispatches to the API client,
//! view assembly and export.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, is_mutation};
pub use output::{exit_code, map_error, render_notification};
pub use parse::{
    ActivityCommands, Cli, Commands, ConfigCommands, PatternCommands, PracticeCommands,
    ProcessCommands, RoleCommands, RoundCommands, ThinkletCommands,
};
pub use route::RunContext;
