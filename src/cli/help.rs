//! CLI command-name contract for logging and routing.

use crate::cli::parse::{
    ActivityCommands, Commands, ConfigCommands, PatternCommands, PracticeCommands,
    ProcessCommands, RoleCommands, RoundCommands, ThinkletCommands,
};

/// Command name string for log records (e.g. "process.export", "role.list").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Process { command } => format!("process.{}", process_command_name(command)),
        Commands::Round { command } => format!("round.{}", round_command_name(command)),
        Commands::Activity { command } => format!("activity.{}", activity_command_name(command)),
        Commands::Practice { command } => format!(
            "practice.{}",
            match command {
                PracticeCommands::List(_) => "list",
                PracticeCommands::Show(_) => "show",
                PracticeCommands::Create(_) => "create",
                PracticeCommands::Update { .. } => "update",
                PracticeCommands::Delete(_) => "delete",
            }
        ),
        Commands::Thinklet { command } => format!(
            "thinklet.{}",
            match command {
                ThinkletCommands::List(_) => "list",
                ThinkletCommands::Show(_) => "show",
                ThinkletCommands::Create(_) => "create",
                ThinkletCommands::Update { .. } => "update",
                ThinkletCommands::Delete(_) => "delete",
            }
        ),
        Commands::Pattern { command } => format!(
            "pattern.{}",
            match command {
                PatternCommands::List(_) => "list",
                PatternCommands::Show(_) => "show",
                PatternCommands::Create(_) => "create",
                PatternCommands::Update { .. } => "update",
                PatternCommands::Delete(_) => "delete",
            }
        ),
        Commands::Role { command } => format!(
            "role.{}",
            match command {
                RoleCommands::List(_) => "list",
                RoleCommands::Show(_) => "show",
                RoleCommands::Create(_) => "create",
                RoleCommands::Update { .. } => "update",
                RoleCommands::Delete(_) => "delete",
            }
        ),
        Commands::Config { command } => match command {
            ConfigCommands::Show => "config.show".to_string(),
            ConfigCommands::Validate => "config.validate".to_string(),
        },
    }
}

pub fn process_command_name(command: &ProcessCommands) -> &'static str {
    match command {
        ProcessCommands::List(_) => "list",
        ProcessCommands::Show(_) => "show",
        ProcessCommands::Create(_) => "create",
        ProcessCommands::Update { .. } => "update",
        ProcessCommands::Delete(_) => "delete",
        ProcessCommands::Export { .. } => "export",
    }
}

pub fn round_command_name(command: &RoundCommands) -> &'static str {
    match command {
        RoundCommands::List { .. } => "list",
        RoundCommands::Show(_) => "show",
        RoundCommands::Create(_) => "create",
        RoundCommands::Update { .. } => "update",
        RoundCommands::Delete(_) => "delete",
    }
}

pub fn activity_command_name(command: &ActivityCommands) -> &'static str {
    match command {
        ActivityCommands::List { .. } => "list",
        ActivityCommands::Show(_) => "show",
        ActivityCommands::Create(_) => "create",
        ActivityCommands::Update { .. } => "update",
        ActivityCommands::Delete(_) => "delete",
        ActivityCommands::Roles(_) => "roles",
        ActivityCommands::Assign { .. } => "assign",
        ActivityCommands::Unassign { .. } => "unassign",
    }
}

/// True for commands that change remote state.
pub fn is_mutation(command: &Commands) -> bool {
    let name = command_name(command);
    let action = name.rsplit('.').next().unwrap_or_default();
    matches!(
        action,
        "create" | "update" | "delete" | "assign" | "unassign"
    )
}
