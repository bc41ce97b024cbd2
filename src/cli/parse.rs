//! CLI parse: clap types for colab. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// colab - administer collaborative processes
#[derive(Parser)]
#[command(name = "colab")]
#[command(version)]
#[command(about = "Administer collaborative processes, rounds and activities, and export them to PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (searched for config/config.toml)
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces the global and workspace files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the process API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (with --log-output file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collaborative processes
    Process {
        #[command(subcommand)]
        command: ProcessCommands,
    },
    /// Rounds of a process
    Round {
        #[command(subcommand)]
        command: RoundCommands,
    },
    /// Activities and their role assignments
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Practice catalog
    Practice {
        #[command(subcommand)]
        command: PracticeCommands,
    },
    /// Thinklet catalog
    Thinklet {
        #[command(subcommand)]
        command: ThinkletCommands,
    },
    /// Pattern catalog
    Pattern {
        #[command(subcommand)]
        command: PatternCommands,
    },
    /// Role catalog
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },
    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Options shared by every list command.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Keep records whose name or description contains this text (accents and case ignored)
    #[arg(long)]
    pub search: Option<String>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Options shared by every show command.
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Record id
    pub id: i64,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Record id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProcessFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub version: Option<String>,
    /// Image file to upload
    #[arg(long, conflicts_with = "image_url")]
    pub image: Option<PathBuf>,
    /// Image URL to reference instead of uploading a file
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Subcommand)]
pub enum ProcessCommands {
    /// List processes
    List(ListArgs),
    /// Show a process with its rounds and activities
    Show(ShowArgs),
    /// Create a process
    Create(ProcessFields),
    /// Update a process; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProcessFields,
    },
    /// Delete a process
    Delete(DeleteArgs),
    /// Export the process view to a paginated A4 PDF
    Export {
        id: i64,
        /// Output directory (default: export.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
        /// File base name, `.pdf` is appended; may include subdirectories
        /// of the output directory (default: process-<id>-<name>)
        #[arg(long)]
        name: Option<String>,
        /// Oversampling factor, 2 or 3 (default: export.scale)
        #[arg(long)]
        scale: Option<u32>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RoundFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Owning process id
    #[arg(long)]
    pub process: Option<i64>,
    /// Stage: plan, apply, review, analyze (or the API value)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Subcommand)]
pub enum RoundCommands {
    /// List rounds
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only rounds of this process
        #[arg(long)]
        process: Option<i64>,
    },
    /// Show a round and its stage sub-activities
    Show(ShowArgs),
    /// Create a round
    Create(RoundFields),
    /// Update a round; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: RoundFields,
    },
    /// Delete a round
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ActivityFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Owning process id
    #[arg(long)]
    pub process: Option<i64>,
    /// Parent round id
    #[arg(long)]
    pub round: Option<i64>,
    /// Detach from the parent round
    #[arg(long, conflicts_with = "round")]
    pub no_round: bool,
    /// Practice id
    #[arg(long)]
    pub practice: Option<i64>,
    /// Thinklet id
    #[arg(long)]
    pub thinklet: Option<i64>,
    /// Whether the activity repeats (true or false)
    #[arg(long)]
    pub iterative: Option<bool>,
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// List activities
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only activities of this process
        #[arg(long)]
        process: Option<i64>,
        /// Only activities of this round
        #[arg(long)]
        round: Option<i64>,
    },
    /// Show an activity
    Show(ShowArgs),
    /// Create an activity
    Create(ActivityFields),
    /// Update an activity; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: ActivityFields,
    },
    /// Delete an activity
    Delete(DeleteArgs),
    /// List roles assigned to an activity
    Roles(ShowArgs),
    /// Assign a role to an activity
    Assign {
        activity: i64,
        role: i64,
    },
    /// Remove a role from an activity
    Unassign {
        activity: i64,
        role: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PracticeFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Practice type
    #[arg(long = "type")]
    pub practice_type: Option<String>,
}

#[derive(Subcommand)]
pub enum PracticeCommands {
    /// List practices
    List(ListArgs),
    /// Show a practice
    Show(ShowArgs),
    /// Create a practice
    Create(PracticeFields),
    /// Update a practice; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: PracticeFields,
    },
    /// Delete a practice
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ThinkletFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Pattern id
    #[arg(long)]
    pub pattern: Option<i64>,
}

#[derive(Subcommand)]
pub enum ThinkletCommands {
    /// List thinklets
    List(ListArgs),
    /// Show a thinklet
    Show(ShowArgs),
    /// Create a thinklet
    Create(ThinkletFields),
    /// Update a thinklet; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: ThinkletFields,
    },
    /// Delete a thinklet
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PatternFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum PatternCommands {
    /// List patterns
    List(ListArgs),
    /// Show a pattern
    Show(ShowArgs),
    /// Create a pattern
    Create(PatternFields),
    /// Update a pattern; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: PatternFields,
    },
    /// Delete a pattern
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RoleFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub skills: Option<String>,
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List roles
    List(ListArgs),
    /// Show a role
    Show(ShowArgs),
    /// Create a role
    Create(RoleFields),
    /// Update a role; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: RoleFields,
    },
    /// Delete a role
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the effective configuration
    Validate,
}
