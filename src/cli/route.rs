//! CLI route: single route table and run context. Dispatches to the API
//! client, the view assemblers and presentation.

use crate::api::{ApiClient, ProcessSource, Resource};
use crate::cli::help::{command_name, is_mutation};
use crate::cli::output::{color_enabled, render_notification};
use crate::cli::parse::{
    ActivityCommands, ActivityFields, Commands, ConfigCommands, DeleteArgs, ListArgs,
    PatternCommands, PatternFields, PracticeCommands, PracticeFields, ProcessCommands,
    ProcessFields, RoleCommands, RoleFields, RoundCommands, RoundFields, ShowArgs,
    ThinkletCommands, ThinkletFields,
};
use crate::cli::presentation::{
    format_assigned_roles_json, format_assigned_roles_text, format_config_toml,
    format_config_validation, format_export_summary, format_list_json, format_list_text,
    format_process_view_json, format_process_view_text, format_record_text,
    format_round_detail_json, format_round_detail_text, orphan_notifications, to_json, Tabular,
};
use crate::config::{ColabConfig, ConfigLoader, ExportConfig};
use crate::error::ApiError;
use crate::export::export_process;
use crate::model::{
    Activity, ActivityDraft, ImageSource, Pattern, PatternDraft, Practice, PracticeDraft,
    Process, ProcessDraft, Role, RoleDraft, Round, RoundDraft, RoundStatus, Thinklet,
    ThinkletDraft,
};
use crate::state::{ListView, Notification, ViewState};
use crate::views::ProcessView;
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// Runtime context for CLI execution: effective configuration, API client,
/// and the async runtime the client runs on.
pub struct RunContext {
    config: ColabConfig,
    client: ApiClient,
    runtime: Runtime,
    color: bool,
    assume_yes: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Result<Self, ApiError> {
        let mut config = if let Some(ref path) = config_path {
            ConfigLoader::load_from_file(path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Some(url) = api_url {
            config.api.base_url = url;
        }
        Self::from_config(config)
    }

    /// Build from an already resolved configuration.
    pub fn from_config(config: ColabConfig) -> Result<Self, ApiError> {
        config.api.validate().map_err(ApiError::ConfigError)?;
        let client = ApiClient::new(&config.api)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create async runtime: {}", e)))?;
        Ok(Self {
            color: color_enabled(config.logging.color),
            config,
            client,
            runtime,
            assume_yes: false,
        })
    }

    /// Answer yes to every confirmation prompt.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn config(&self) -> &ColabConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn notice(&self, notification: Notification) -> String {
        render_notification(&notification, self.color)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        let started = Instant::now();
        let result = self.execute_inner(command);
        match &result {
            Ok(_) => info!(
                command = %name,
                mutation = is_mutation(command),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Command completed"
            ),
            Err(e) => warn!(command = %name, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Process { command } => self.handle_process_command(command),
            Commands::Round { command } => self.handle_round_command(command),
            Commands::Activity { command } => self.handle_activity_command(command),
            Commands::Practice { command } => match command {
                PracticeCommands::List(args) => self.list::<Practice>(args, |_| true),
                PracticeCommands::Show(args) => self.show::<Practice>(args),
                PracticeCommands::Create(fields) => {
                    let mut draft = PracticeDraft::default();
                    apply_practice_fields(&mut draft, fields);
                    self.create::<Practice>(&draft)
                }
                PracticeCommands::Update { id, fields } => {
                    self.update::<Practice>(*id, |draft| apply_practice_fields(draft, fields))
                }
                PracticeCommands::Delete(args) => self.delete::<Practice>(args),
            },
            Commands::Thinklet { command } => match command {
                ThinkletCommands::List(args) => self.list::<Thinklet>(args, |_| true),
                ThinkletCommands::Show(args) => self.show::<Thinklet>(args),
                ThinkletCommands::Create(fields) => {
                    let mut draft = ThinkletDraft::default();
                    apply_thinklet_fields(&mut draft, fields);
                    self.create::<Thinklet>(&draft)
                }
                ThinkletCommands::Update { id, fields } => {
                    self.update::<Thinklet>(*id, |draft| apply_thinklet_fields(draft, fields))
                }
                ThinkletCommands::Delete(args) => self.delete::<Thinklet>(args),
            },
            Commands::Pattern { command } => match command {
                PatternCommands::List(args) => self.list::<Pattern>(args, |_| true),
                PatternCommands::Show(args) => self.show::<Pattern>(args),
                PatternCommands::Create(fields) => {
                    let mut draft = PatternDraft::default();
                    apply_pattern_fields(&mut draft, fields);
                    self.create::<Pattern>(&draft)
                }
                PatternCommands::Update { id, fields } => {
                    self.update::<Pattern>(*id, |draft| apply_pattern_fields(draft, fields))
                }
                PatternCommands::Delete(args) => self.delete::<Pattern>(args),
            },
            Commands::Role { command } => match command {
                RoleCommands::List(args) => self.list::<Role>(args, |_| true),
                RoleCommands::Show(args) => self.show::<Role>(args),
                RoleCommands::Create(fields) => {
                    let mut draft = RoleDraft::default();
                    apply_role_fields(&mut draft, fields);
                    self.create::<Role>(&draft)
                }
                RoleCommands::Update { id, fields } => {
                    self.update::<Role>(*id, |draft| apply_role_fields(draft, fields))
                }
                RoleCommands::Delete(args) => self.delete::<Role>(args),
            },
            Commands::Config { command } => match command {
                ConfigCommands::Show => format_config_toml(&self.config),
                ConfigCommands::Validate => {
                    let result = self.config.validate();
                    let report = format_config_validation(&result);
                    match result {
                        Ok(()) => Ok(report),
                        Err(_) => Err(ApiError::ConfigError(report)),
                    }
                }
            },
        }
    }

    fn handle_process_command(&self, command: &ProcessCommands) -> Result<String, ApiError> {
        match command {
            ProcessCommands::List(args) => self.list::<Process>(args, |_| true),
            ProcessCommands::Show(args) => self.handle_process_show(args),
            ProcessCommands::Create(fields) => {
                let mut draft = ProcessDraft::default();
                apply_process_fields(&mut draft, fields);
                self.create::<Process>(&draft)
            }
            ProcessCommands::Update { id, fields } => {
                self.update::<Process>(*id, |draft| apply_process_fields(draft, fields))
            }
            ProcessCommands::Delete(args) => self.delete::<Process>(args),
            ProcessCommands::Export {
                id,
                output,
                name,
                scale,
            } => {
                let config = ExportConfig {
                    scale: scale.unwrap_or(self.config.export.scale),
                    ..self.config.export.clone()
                };
                let outcome = self.block_on(export_process(
                    &self.client,
                    self.client.base_url(),
                    *id,
                    &config,
                    output.as_deref(),
                    name.as_deref(),
                ));
                let mut state = ViewState::default();
                let summary = state.apply(outcome, None)?;
                let mut out = self.notice(Notification::success(format_export_summary(summary)));
                if summary.orphans > 0 {
                    out.push('\n');
                    let message = if summary.orphans == 1 {
                        "1 activity references a missing round and was left out".to_string()
                    } else {
                        format!(
                            "{} activities reference a missing round and were left out",
                            summary.orphans
                        )
                    };
                    out.push_str(&self.notice(Notification::warning(message)));
                }
                Ok(out)
            }
        }
    }

    fn handle_process_show(&self, args: &ShowArgs) -> Result<String, ApiError> {
        let outcome = self
            .block_on(self.client.full_process(args.id))
            .map(|full| ProcessView::assemble(&full));
        let mut state = ViewState::default();
        let view = state.apply(outcome, None)?;

        if args.format == "json" {
            return format_process_view_json(view);
        }
        let mut out = format_process_view_text(view, self.client.base_url(), self.color);
        for warning in orphan_notifications(view) {
            out.push('\n');
            out.push_str(&self.notice(warning));
        }
        Ok(out)
    }

    fn handle_round_command(&self, command: &RoundCommands) -> Result<String, ApiError> {
        match command {
            RoundCommands::List { list, process } => {
                let process = *process;
                self.list::<Round>(list, move |round| {
                    process.map_or(true, |id| round.process_id == Some(id))
                })
            }
            RoundCommands::Show(args) => {
                let mut state = ViewState::default();
                let round = state.apply(self.block_on(self.client.get::<Round>(args.id)), None)?;
                if args.format == "json" {
                    format_round_detail_json(round)
                } else {
                    Ok(format_round_detail_text(round, self.color))
                }
            }
            RoundCommands::Create(fields) => {
                let mut draft = RoundDraft::default();
                apply_round_fields(&mut draft, fields)?;
                self.create::<Round>(&draft)
            }
            RoundCommands::Update { id, fields } => {
                let existing = self.block_on(self.client.get::<Round>(*id))?;
                let mut draft = RoundDraft::from(&existing);
                apply_round_fields(&mut draft, fields)?;
                self.save_update::<Round>(*id, &draft)
            }
            RoundCommands::Delete(args) => self.delete::<Round>(args),
        }
    }

    fn handle_activity_command(&self, command: &ActivityCommands) -> Result<String, ApiError> {
        match command {
            ActivityCommands::List {
                list,
                process,
                round,
            } => {
                let (process, round) = (*process, *round);
                self.list::<Activity>(list, move |activity| {
                    process.map_or(true, |id| activity.process_id == Some(id))
                        && round.map_or(true, |id| activity.parent_round_id == Some(id))
                })
            }
            ActivityCommands::Show(args) => self.show::<Activity>(args),
            ActivityCommands::Create(fields) => {
                let mut draft = ActivityDraft {
                    iterative: true,
                    ..ActivityDraft::default()
                };
                apply_activity_fields(&mut draft, fields);
                self.create::<Activity>(&draft)
            }
            ActivityCommands::Update { id, fields } => {
                self.update::<Activity>(*id, |draft| apply_activity_fields(draft, fields))
            }
            ActivityCommands::Delete(args) => self.delete::<Activity>(args),
            ActivityCommands::Roles(args) => {
                let mut state = ViewState::default();
                let roles = state.apply(self.block_on(self.client.assigned_roles(args.id)), None)?;
                if args.format == "json" {
                    format_assigned_roles_json(args.id, roles)
                } else {
                    Ok(format_assigned_roles_text(args.id, roles, self.color))
                }
            }
            ActivityCommands::Assign { activity, role } => {
                let outcome = self
                    .block_on(self.client.assign_role(*role, *activity))
                    .map(|_| {
                        Notification::success(format!(
                            "Role {} assigned to activity {}",
                            role, activity
                        ))
                    });
                self.confirm_mutation(outcome)
            }
            ActivityCommands::Unassign {
                activity,
                role,
                force,
            } => {
                let prompt = format!("Remove role {} from activity {}?", role, activity);
                if !self.confirm(&prompt, *force)? {
                    return Ok(self.notice(Notification::info("Unassignment cancelled")));
                }
                let outcome = self
                    .block_on(self.client.unassign_role(*role, *activity))
                    .map(|_| {
                        Notification::success(format!(
                            "Role {} removed from activity {}",
                            role, activity
                        ))
                    });
                self.confirm_mutation(outcome)
            }
        }
    }

    fn list<R>(&self, args: &ListArgs, keep: impl Fn(&R) -> bool) -> Result<String, ApiError>
    where
        R: Resource + Tabular + Serialize,
    {
        let outcome = self
            .block_on(self.client.list::<R>())
            .map(|records| records.into_iter().filter(|r| keep(r)).collect());
        let mut view: ListView<R> = ListView::with_query(args.search.clone());
        view.apply(outcome)?;

        if args.format == "json" {
            return format_list_json(&view);
        }
        let mut out = format_list_text(&view, self.color);
        if let Some(notification) = view.notification.clone() {
            out.push_str(&self.notice(notification));
        }
        Ok(out.trim_end().to_string())
    }

    fn show<R>(&self, args: &ShowArgs) -> Result<String, ApiError>
    where
        R: Resource + Tabular + Serialize,
    {
        let mut state = ViewState::default();
        let record = state.apply(self.block_on(self.client.get::<R>(args.id)), None)?;
        if args.format == "json" {
            to_json(record)
        } else {
            Ok(format_record_text(record, self.color))
        }
    }

    fn create<R>(&self, draft: &R::Draft) -> Result<String, ApiError>
    where
        R: Resource + Tabular,
    {
        let outcome = self
            .block_on(self.client.create::<R>(draft))
            .map(|created| {
                Notification::success(match &created {
                    Some(record) => {
                        format!("Created {} {} ({})", R::KIND, record.id(), record.name())
                    }
                    None => format!("Created {}", R::KIND),
                })
            });
        self.confirm_mutation(outcome)
    }

    /// Fetch the record, overlay the given fields, and save it.
    fn update<R>(&self, id: i64, overlay: impl FnOnce(&mut R::Draft)) -> Result<String, ApiError>
    where
        R: Resource + Tabular,
        for<'a> R::Draft: From<&'a R>,
    {
        let existing = self.block_on(self.client.get::<R>(id))?;
        let mut draft = R::Draft::from(&existing);
        overlay(&mut draft);
        self.save_update::<R>(id, &draft)
    }

    fn save_update<R>(&self, id: i64, draft: &R::Draft) -> Result<String, ApiError>
    where
        R: Resource + Tabular,
    {
        let outcome = self
            .block_on(self.client.update::<R>(id, draft))
            .map(|_| Notification::success(format!("Updated {} {}", R::KIND, id)));
        self.confirm_mutation(outcome)
    }

    fn delete<R>(&self, args: &DeleteArgs) -> Result<String, ApiError>
    where
        R: Resource + Tabular,
    {
        let prompt = format!("Delete {} {}?", R::KIND, args.id);
        if !self.confirm(&prompt, args.force)? {
            return Ok(self.notice(Notification::info("Deletion cancelled")));
        }
        let outcome = self
            .block_on(self.client.delete::<R>(args.id))
            .map(|_| Notification::success(format!("Deleted {} {}", R::KIND, args.id)));
        self.confirm_mutation(outcome)
    }

    /// Record a mutation outcome and render its confirmation.
    fn confirm_mutation(&self, outcome: Result<Notification, ApiError>) -> Result<String, ApiError> {
        let mut state: ViewState<()> = ViewState::default();
        let confirmation = state.apply_mutation(outcome)?;
        Ok(self.notice(confirmation.clone()))
    }

    fn confirm(&self, prompt: &str, force: bool) -> Result<bool, ApiError> {
        if force || self.assume_yes {
            return Ok(true);
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| ApiError::InvalidInput(format!("Failed to get user input: {}", e)))
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn apply_process_fields(draft: &mut ProcessDraft, fields: &ProcessFields) {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
    set(&mut draft.version, &fields.version);
    if let Some(path) = &fields.image {
        draft.image = Some(ImageSource::File(path.clone()));
    } else if let Some(url) = &fields.image_url {
        draft.image = Some(ImageSource::Url(url.clone()));
    }
}

fn apply_round_fields(draft: &mut RoundDraft, fields: &RoundFields) -> Result<(), ApiError> {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
    if fields.process.is_some() {
        draft.process_id = fields.process;
    }
    if let Some(status) = &fields.status {
        draft.status = status
            .parse::<RoundStatus>()
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    }
    Ok(())
}

fn apply_activity_fields(draft: &mut ActivityDraft, fields: &ActivityFields) {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
    set(&mut draft.iterative, &fields.iterative);
    if fields.process.is_some() {
        draft.process_id = fields.process;
    }
    if fields.practice.is_some() {
        draft.practice_id = fields.practice;
    }
    if fields.thinklet.is_some() {
        draft.thinklet_id = fields.thinklet;
    }
    if fields.no_round {
        draft.parent_round_id = None;
    } else if fields.round.is_some() {
        draft.parent_round_id = fields.round;
    }
}

fn apply_practice_fields(draft: &mut PracticeDraft, fields: &PracticeFields) {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
    set(&mut draft.practice_type, &fields.practice_type);
}

fn apply_thinklet_fields(draft: &mut ThinkletDraft, fields: &ThinkletFields) {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
    if fields.pattern.is_some() {
        draft.pattern_id = fields.pattern;
    }
}

fn apply_pattern_fields(draft: &mut PatternDraft, fields: &PatternFields) {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
}

fn apply_role_fields(draft: &mut RoleDraft, fields: &RoleFields) {
    set(&mut draft.name, &fields.name);
    set(&mut draft.description, &fields.description);
    set(&mut draft.skills, &fields.skills);
}
