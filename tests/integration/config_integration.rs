//! Integration tests for layered configuration loading

use crate::integration::test_utils::with_isolated_env;
use clap::Parser;
use colab::cli::{Cli, RunContext};
use colab::config::{global_config_path, ColabConfig, ConfigIssue, ConfigLoader};
use colab::error::ApiError;
use std::fs;
use tempfile::TempDir;

fn write_global(contents: &str) {
    let path = global_config_path().unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn write_workspace(root: &std::path::Path, file: &str, contents: &str) {
    let dir = root.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), contents).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.export.scale, 3);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_global_file_lives_under_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let path = global_config_path().unwrap();
        assert_eq!(path, temp.path().join("xdg").join("colab").join("config.toml"));
    });
}

#[test]
fn test_precedence_global_workspace_environment() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_global(
            r#"
[api]
base_url = "http://global:1"
request_timeout_secs = 30

[export]
scale = 2
"#,
        );
        write_workspace(
            &workspace,
            "config.toml",
            r#"
[api]
base_url = "http://workspace:2"
"#,
        );
        write_workspace(
            &workspace,
            "development.toml",
            r#"
[export]
margin_mm = 15.0
"#,
        );

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.api.base_url, "http://workspace:2");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.export.scale, 2);
        assert_eq!(config.export.margin_mm, 15.0);

        std::env::set_var("COLAB_API__BASE_URL", "http://env:3");
        std::env::set_var("COLAB_EXPORT__SCALE", "3");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.api.base_url, "http://env:3");
        assert_eq!(config.export.scale, 3);
    });
}

#[test]
fn test_colab_env_selects_workspace_file() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_workspace(&workspace, "development.toml", "[export]\nmargin_mm = 15.0\n");
        write_workspace(&workspace, "production.toml", "[export]\nmargin_mm = 5.0\n");

        std::env::set_var("COLAB_ENV", "production");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.export.margin_mm, 5.0);
    });
}

#[test]
fn test_explicit_file_skips_global_and_workspace_files() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_global("[export]\nscale = 2\n");
        write_workspace(&workspace, "config.toml", "[api]\nbase_url = \"http://workspace:2\"\n");
        let explicit = temp.path().join("explicit.toml");
        fs::write(&explicit, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.export.scale, 3);
        assert_eq!(config.api.base_url, "http://localhost:8080");
    });
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_workspace(&workspace, "config.toml", "[export]\nscale = \"three\"\n");
        assert!(ConfigLoader::load(&workspace).is_err());
    });
}

#[test]
fn test_validation_collects_issues_from_every_section() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_workspace(
            &workspace,
            "config.toml",
            r#"
[api]
base_url = "ftp://nowhere"

[export]
scale = 4
"#,
        );
        let config = ConfigLoader::load(&workspace).unwrap();
        let issues = config.validate().unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], ConfigIssue::Api(_)));
        assert!(matches!(issues[1], ConfigIssue::Export(_)));
    });
}

#[test]
fn test_config_commands_through_run_context() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_workspace(&workspace, "config.toml", "[export]\nscale = 5\n");

        let ctx = RunContext::new(workspace.clone(), None, Some("http://cli:4".to_string()))
            .unwrap();
        assert_eq!(ctx.config().api.base_url, "http://cli:4");

        let show = Cli::try_parse_from(["colab", "config", "show"]).unwrap();
        let out = ctx.execute(&show.command).unwrap();
        let parsed: ColabConfig = toml::from_str(&out).unwrap();
        assert_eq!(parsed.api.base_url, "http://cli:4");
        assert_eq!(parsed.export.scale, 5);

        let validate = Cli::try_parse_from(["colab", "config", "validate"]).unwrap();
        let err = ctx.execute(&validate.command).unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(ref msg) if msg.contains("scale")));
    });
}

#[test]
fn test_invalid_api_url_rejected_at_startup() {
    let temp = TempDir::new().unwrap();
    with_isolated_env(&temp, || {
        let workspace = temp.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();
        let err = RunContext::new(workspace, None, Some("localhost:8080".to_string()))
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::ConfigError(_)));
    });
}
