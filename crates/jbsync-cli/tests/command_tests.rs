// Rust guideline compliant 2026-02-06

//! Integration tests for the command implementations.

use jbsync_cli::commands;
use jbsync_cli::Context;
use jbsync_core::{Config, OutputFormat};
use mockito::{Matcher, Server, ServerGuard};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EXPORT: &str = r#"{
    "issues": [
        {
            "id": "10001",
            "key": "PROJ-1",
            "fields": {
                "summary": "Authentication",
                "issuetype": {"name": "Epic"},
                "status": {"name": "In Progress", "statusCategory": {"key": "indeterminate"}},
                "priority": {"name": "High"}
            }
        },
        {
            "id": "10002",
            "key": "PROJ-2",
            "fields": {
                "summary": "Implement login",
                "issuetype": {"name": "Story"},
                "status": {"name": "To Do", "statusCategory": {"key": "new"}},
                "priority": {"name": "Medium"},
                "parent": {"key": "PROJ-1", "fields": {"summary": "Authentication", "issuetype": {"name": "Epic"}}},
                "issuelinks": [
                    {
                        "type": {"name": "Blocks", "inward": "is blocked by", "outward": "blocks"},
                        "inwardIssue": {"key": "PROJ-3", "fields": {"summary": "Design schema", "issuetype": {"name": "Task"}}}
                    }
                ]
            }
        },
        {
            "id": "10003",
            "key": "PROJ-3",
            "fields": {
                "summary": "Design schema",
                "issuetype": {"name": "Task"},
                "status": {"name": "Done", "statusCategory": {"key": "done"}}
            }
        }
    ]
}"#;

fn context(dir: &Path, format: OutputFormat) -> Context {
    let mut config = Config::default();
    config.output.format = format;
    Context::new(config, &dir.join("config.toml"), dir)
}

fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("export.json");
    fs::write(&path, EXPORT).unwrap();
    path
}

fn read_jsonl(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_convert_jsonl() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Jsonl);
    let export = write_export(temp_dir.path());

    let report = commands::convert::convert_file(&ctx, &export).unwrap();
    assert_eq!(report.written.issues, 2);
    assert_eq!(report.written.epics, 1);

    let issues = read_jsonl(&temp_dir.path().join(".beads/issues.jsonl"));
    let login = issues.iter().find(|i| i["id"] == "proj-2").unwrap();
    assert_eq!(login["epic"], "proj-1");
    assert_eq!(login["dependsOn"][0], "proj-3");

    let epics = read_jsonl(&temp_dir.path().join(".beads/epics.jsonl"));
    assert_eq!(epics.len(), 1);
    assert_eq!(epics[0]["id"], "proj-1");
}

#[test]
fn test_convert_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Yaml);
    let export = write_export(temp_dir.path());

    commands::convert::convert_file(&ctx, &export).unwrap();
    assert!(temp_dir.path().join(".beads/issues/proj-2.yaml").exists());
    assert!(temp_dir.path().join(".beads/issues/proj-3.yaml").exists());
    assert!(temp_dir.path().join(".beads/epics/proj-1.yaml").exists());
}

#[test]
fn test_convert_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Jsonl);

    let err = commands::convert::convert_file(&ctx, &temp_dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(!temp_dir.path().join(".beads").exists());
}

#[test]
fn test_convert_malformed_file_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Jsonl);
    let path = temp_dir.path().join("export.json");
    fs::write(&path, "not json").unwrap();

    assert!(commands::convert::convert_file(&ctx, &path).is_err());
    assert!(!temp_dir.path().join(".beads/issues.jsonl").exists());
}

#[test]
fn test_annotate_after_convert() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Jsonl);
    let export = write_export(temp_dir.path());
    commands::convert::convert_file(&ctx, &export).unwrap();

    let id = commands::annotate::annotate(&ctx, "PROJ-2", "github.com/acme/api").unwrap();
    assert_eq!(id, "proj-2");

    let issues = read_jsonl(&temp_dir.path().join(".beads/issues.jsonl"));
    let login = issues.iter().find(|i| i["id"] == "proj-2").unwrap();
    assert_eq!(login["metadata"]["repositories"], "github.com/acme/api");

    assert!(commands::annotate::annotate(&ctx, "proj-2", "github.com/acme/api").is_err());
    assert!(commands::annotate::annotate(&ctx, "proj-404", "github.com/acme/api").is_err());
    assert!(commands::annotate::annotate(&ctx, "proj-2", "   ").is_err());
}

#[test]
fn test_fetch_requires_credentials() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Jsonl);

    let err = commands::fetch::fetch(&ctx, "PROJ-1").unwrap_err();
    assert!(format!("{:#}", err).contains("configure"));
}

fn jira_context(server: &ServerGuard, dir: &Path) -> Context {
    let mut ctx = context(dir, OutputFormat::Jsonl);
    ctx.config.jira.base_url = server.url();
    ctx.config.jira.username = "user".to_string();
    ctx.config.jira.api_token = "token".to_string();
    ctx
}

fn issue_body(key: &str, type_name: &str, extra: serde_json::Value) -> String {
    let mut fields = serde_json::json!({
        "summary": format!("Summary {}", key),
        "issuetype": {"name": type_name},
        "status": {"name": "To Do", "statusCategory": {"key": "new"}},
        "priority": {"name": "Medium"}
    });
    if let (Some(fields), Some(extra)) = (fields.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            fields.insert(k.clone(), v.clone());
        }
    }
    serde_json::json!({"id": "1", "key": key, "fields": fields}).to_string()
}

#[test]
fn test_fetch_walks_links_over_http() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/2/issue/PROJ-2")
        .with_status(200)
        .with_body(issue_body(
            "PROJ-2",
            "Story",
            serde_json::json!({
                "issuelinks": [{
                    "type": {"name": "Blocks", "inward": "is blocked by", "outward": "blocks"},
                    "inwardIssue": {"key": "PROJ-3", "fields": {"summary": "S", "issuetype": {"name": "Task"}}}
                }]
            }),
        ))
        .create();
    server
        .mock("GET", "/rest/api/2/issue/PROJ-3")
        .with_status(200)
        .with_body(issue_body("PROJ-3", "Task", serde_json::json!({})))
        .create();

    let temp_dir = TempDir::new().unwrap();
    let ctx = jira_context(&server, temp_dir.path());

    let report = commands::fetch::fetch(&ctx, "PROJ-2").unwrap();
    assert_eq!(report.fetched, 2);
    assert_eq!(report.written.issues, 2);

    let issues = read_jsonl(&temp_dir.path().join(".beads/issues.jsonl"));
    assert_eq!(issues.len(), 2);
}

#[test]
fn test_fetch_by_label_over_http() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::UrlEncoded("jql".into(), r#"labels = "sprint-23""#.into()))
        .with_status(200)
        .with_body(r#"{"startAt":0,"maxResults":100,"total":1,"issues":[{"key":"PROJ-7"}]}"#)
        .create();
    server
        .mock("GET", "/rest/api/2/issue/PROJ-7")
        .with_status(200)
        .with_body(issue_body("PROJ-7", "Bug", serde_json::json!({"labels": ["sprint-23"]})))
        .create();

    let temp_dir = TempDir::new().unwrap();
    let ctx = jira_context(&server, temp_dir.path());

    let report = commands::fetch::fetch_by_label(&ctx, "sprint-23").unwrap();
    assert_eq!(report.fetched, 1);
    assert!(report.fetch_advisories.is_empty());
}

#[test]
fn test_fetch_by_query_with_no_matches_fails() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/2/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"startAt":0,"maxResults":100,"total":0,"issues":[]}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let ctx = jira_context(&server, temp_dir.path());

    assert!(commands::fetch::fetch_by_query(&ctx, "project = NONE").is_err());
    assert!(!temp_dir.path().join(".beads").exists());
}

#[test]
fn test_whoami_over_http() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/2/myself")
        .with_status(200)
        .with_body(r#"{"accountId":"u1","displayName":"Jo Doe","emailAddress":"jo@example.com","active":true}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let ctx = jira_context(&server, temp_dir.path());

    let (user, base_url) = commands::whoami::whoami(&ctx).unwrap();
    assert_eq!(user.display_name, "Jo Doe");
    assert_eq!(base_url, server.url());
}

#[test]
fn test_configure_repairs_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[jira]\nbase_url = \"https://old.example.com\"\ntimeout_secs = 0\n",
    )
    .unwrap();

    let output_dir = Some(temp_dir.path().to_path_buf());
    assert!(Context::load(Some(config_path.clone()), output_dir.clone(), None).is_err());

    let ctx = Context::load_unchecked(Some(config_path.clone()), output_dir).unwrap();
    let mut input = std::io::Cursor::new("\njo@example.com\nsecret\n");
    let mut output = Vec::new();
    let saved = commands::configure::configure_with(&ctx, &mut input, &mut output).unwrap();
    assert_eq!(saved, config_path);

    let config = Config::from_file(&config_path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.jira.base_url, "https://old.example.com");
    assert_eq!(config.jira.timeout_secs, Config::default().jira.timeout_secs);
    assert_eq!(config.jira.api_token, "secret");
}

#[test]
fn test_needs_setup_only_without_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), OutputFormat::Jsonl);
    assert!(ctx.needs_setup());

    let mut config = Config::default();
    config.jira.base_url = "https://jira.example.com".to_string();
    config.jira.username = "jo@example.com".to_string();
    config.jira.api_token = "secret".to_string();
    config.save(&ctx.config_path).unwrap();

    let ctx = Context::new(config, &ctx.config_path, temp_dir.path());
    assert!(!ctx.needs_setup());
}
