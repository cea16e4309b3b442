use std::path::PathBuf;

use daybook_core::config::ClientConfig;
use daybook_core::gateway::MemoryGateway;
use daybook_core::models::{Goal, TodoItem};
use daybook_core::{BlockKind, DashboardSession};
use pretty_assertions::assert_eq;

use crate::cli::{GlobalArgs, GoalsCommands, TodosCommands};
use crate::commands::config::{format_config_lines, run_config_init};
use crate::commands::entry::{parse_block_spec, run_entry, BlockSpec};
use crate::commands::goals::run_goals;
use crate::commands::position_to_index;
use crate::commands::todos::{format_todo_lines, run_todos};
use crate::config_file::{apply_flags, load_from_path};
use crate::error::CliError;

fn session(gateway: &MemoryGateway) -> DashboardSession<MemoryGateway> {
    DashboardSession::new(gateway.clone(), ClientConfig::default())
}

#[test]
fn parse_block_spec_reads_text_blocks_verbatim() {
    assert_eq!(
        parse_block_spec("text:hello: world").unwrap(),
        BlockSpec::Text("hello: world".to_string())
    );
    assert_eq!(
        parse_block_spec("TEXT:").unwrap(),
        BlockSpec::Text(String::new())
    );
}

#[test]
fn parse_block_spec_splits_caption_from_path() {
    assert_eq!(
        parse_block_spec("image:photos/sunset.png#Golden hour").unwrap(),
        BlockSpec::Media {
            kind: Some(BlockKind::Image),
            path: PathBuf::from("photos/sunset.png"),
            caption: Some("Golden hour".to_string()),
        }
    );
    assert_eq!(
        parse_block_spec("file:notes.pdf").unwrap(),
        BlockSpec::Media {
            kind: None,
            path: PathBuf::from("notes.pdf"),
            caption: None,
        }
    );
}

#[test]
fn parse_block_spec_rejects_bad_input() {
    assert!(matches!(
        parse_block_spec("no prefix here"),
        Err(CliError::InvalidBlock { .. })
    ));
    assert!(matches!(
        parse_block_spec("sketch:drawing.svg"),
        Err(CliError::InvalidBlock { .. })
    ));
    assert!(matches!(
        parse_block_spec("image:  #caption only"),
        Err(CliError::InvalidBlock { .. })
    ));
}

#[test]
fn position_to_index_is_one_based() {
    assert_eq!(position_to_index(1).unwrap(), 0);
    assert!(matches!(position_to_index(0), Err(CliError::InvalidIndex)));
}

#[test]
fn format_todo_lines_marks_completed_items() {
    let lines = format_todo_lines(&[
        TodoItem {
            text: "stretch".to_string(),
            completed: true,
        },
        TodoItem::new("call mum"),
    ]);
    assert_eq!(lines, vec!["1. [x] stretch", "2. [ ] call mum"]);
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn config_init_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybook").join("config.json");

    let saved = run_config_init(
        &path,
        "https://journal.example.com/",
        Some("token-123".to_string()),
        true,
    )
    .unwrap();
    assert_eq!(
        saved.api_base_url.as_deref(),
        Some("https://journal.example.com")
    );

    let loaded = load_from_path(&path).unwrap();
    assert_eq!(loaded, saved);

    let updated = run_config_init(&path, "http://localhost:5000", None, false).unwrap();
    assert_eq!(updated.access_token.as_deref(), Some("token-123"));
    assert!(!updated.include_media);

    let lines = format_config_lines(&updated);
    assert!(lines.contains(&"access_token: [REDACTED]".to_string()));
}

#[test]
fn invalid_config_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"api_base_url": 42}"#).unwrap();

    let error = load_from_path(&path).unwrap_err();
    assert!(error.to_string().contains("config.json"));
}

#[test]
fn flags_override_config_values() {
    let global = GlobalArgs {
        api_url: Some("http://localhost:5000/".to_string()),
        token: Some("flag-token".to_string()),
        include_media: true,
        config: None,
    };
    let config = apply_flags(ClientConfig::default(), &global).unwrap();
    assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:5000"));
    assert_eq!(config.access_token.as_deref(), Some("flag-token"));
    assert!(config.include_media);
}

#[tokio::test]
async fn todos_add_saves_whole_list() {
    let gateway = MemoryGateway::new()
        .with_todos(vec![TodoItem::new("stretch")])
        .await;
    let mut session = session(&gateway);

    run_todos(
        &mut session,
        TodosCommands::Add {
            text: vec!["water".to_string(), "plants".to_string()],
        },
    )
    .await
    .unwrap();
    run_todos(&mut session, TodosCommands::Done { index: 1 })
        .await
        .unwrap();

    assert_eq!(
        gateway.todos().await,
        vec![
            TodoItem {
                text: "stretch".to_string(),
                completed: true,
            },
            TodoItem::new("water plants"),
        ]
    );
}

#[tokio::test]
async fn blank_todo_is_rejected() {
    let gateway = MemoryGateway::new();
    let mut session = session(&gateway);

    let error = run_todos(
        &mut session,
        TodosCommands::Add {
            text: vec!["  ".to_string()],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(error, CliError::EmptyTodo));
}

#[tokio::test]
async fn offline_backend_leaves_todos_untouched() {
    let gateway = MemoryGateway::new()
        .with_todos(vec![TodoItem::new("stretch")])
        .await;
    gateway.set_offline(true).await;
    let mut session = session(&gateway);

    let error = run_todos(&mut session, TodosCommands::Remove { index: 1 })
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(daybook_core::Error::NetworkFailure(_))
    ));

    gateway.set_offline(false).await;
    assert_eq!(gateway.todos().await, vec![TodoItem::new("stretch")]);
}

#[tokio::test]
async fn goals_add_sets_title_and_description() {
    let gateway = MemoryGateway::new();
    let mut session = session(&gateway);

    run_goals(
        &mut session,
        GoalsCommands::Add {
            title: "Run 10k".to_string(),
            description: "by June".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(gateway.goals().await, vec![Goal::new("Run 10k", "by June")]);
}

#[tokio::test]
async fn entry_combines_text_and_captioned_media() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("sunset.png");
    std::fs::write(&image, [0x89, 0x50, 0x4e, 0x47]).unwrap();

    let gateway = MemoryGateway::new();
    let mut session = session(&gateway);
    run_entry(
        &mut session,
        "Beach day",
        &[
            "text:Long walk by the water".to_string(),
            format!("image:{}#Golden hour", image.display()),
        ],
    )
    .await
    .unwrap();

    let entries = gateway.entries().await;
    assert_eq!(entries.len(), 1);
    let blocks = &entries[0].blocks;
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind, BlockKind::Text);
    assert_eq!(blocks[0].text, "Long walk by the water");
    assert_eq!(blocks[1].kind, BlockKind::Image);
    assert_eq!(blocks[1].caption, "Golden hour");
}

#[tokio::test]
async fn entry_without_text_drops_initial_empty_block() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("sunset.png");
    std::fs::write(&image, [0x89, 0x50, 0x4e, 0x47]).unwrap();

    let gateway = MemoryGateway::new();
    let mut session = session(&gateway);
    run_entry(
        &mut session,
        "",
        &[format!("file:{}", image.display())],
    )
    .await
    .unwrap();

    let entries = gateway.entries().await;
    assert_eq!(entries[0].blocks.len(), 1);
    assert_eq!(entries[0].blocks[0].kind, BlockKind::Image);
}

#[tokio::test]
async fn entry_rejects_mismatched_media_kind() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("sunset.png");
    std::fs::write(&image, [0x89, 0x50, 0x4e, 0x47]).unwrap();

    let gateway = MemoryGateway::new();
    let mut session = session(&gateway);
    let error = run_entry(
        &mut session,
        "Clip",
        &[format!("video:{}", image.display())],
    )
    .await
    .unwrap_err();

    assert!(matches!(error, CliError::InvalidBlock { .. }));
    assert!(gateway.entries().await.is_empty());
}

#[tokio::test]
async fn blank_entry_is_not_submitted() {
    let gateway = MemoryGateway::new();
    let mut session = session(&gateway);

    let error = run_entry(&mut session, "  ", &["text:".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(daybook_core::Error::InvalidInput(_))
    ));
    assert!(gateway.entries().await.is_empty());
}
