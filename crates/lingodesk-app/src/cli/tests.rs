use std::sync::Arc;

use clap::Parser;
use serde_json::json;

use lingodesk_core::mock::{InMemoryGateway, Operation};
use lingodesk_core::GatewayError;

use super::*;

fn vocab_gateway() -> Arc<InMemoryGateway> {
    Arc::new(InMemoryGateway::with_records(
        ResourceKind::Vocabularies,
        vec![
            json!({"id": 1, "word": "cat", "meaningVi": "con mèo", "categoryId": 10}),
            json!({"id": 2, "word": "dog", "meaningVi": "con chó", "categoryId": 11}),
            json!({"id": 3, "word": "cow", "meaningVi": "con bò", "categoryId": 10}),
        ],
    ))
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn parses_list_with_kind_alias() {
    let cli = Cli::parse_from(["lingodesk", "list", "--kind", "vocab", "--page", "2", "--category", "10"]);
    assert_eq!(
        cli.command,
        Some(CliCommand::List {
            kind: ResourceKind::Vocabularies,
            page: 2,
            filter: None,
            category: Some(ResourceId(10)),
        })
    );
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from(["lingodesk", "delete", "-k", "articles", "--id", "4", "--token", "t0k"]);
    assert_eq!(cli.token.as_deref(), Some("t0k"));
    assert_eq!(cli.command, Some(CliCommand::Delete { kind: ResourceKind::Articles, id: ResourceId(4), yes: false }));
}

#[test]
fn no_subcommand_means_tui() {
    let cli = Cli::parse_from(["lingodesk", "--base-url", "http://api.test/admin"]);
    assert!(cli.command.is_none());
    assert_eq!(cli.base_url.as_deref(), Some("http://api.test/admin"));
}

#[test]
fn rejects_unknown_kind() {
    assert!(Cli::try_parse_from(["lingodesk", "list", "--kind", "lessons"]).is_err());
}

#[test]
fn table_pads_columns() {
    let headers = vec!["ID".to_string(), "WORD".to_string()];
    let rows = vec![vec!["1".to_string(), "elephant".to_string()], vec!["12".to_string(), "ox".to_string()]];
    assert_eq!(format_table(&headers, &rows), "ID  WORD\n1   elephant\n12  ox\n");
}

#[tokio::test]
async fn list_prints_filtered_rows_and_footer() {
    let gateway = vocab_gateway();
    let mut controller = ResourceListController::new(gateway.clone(), 10);
    let mut out = Vec::new();
    list(&mut controller, 1, Some("co"), &mut out).await.unwrap();

    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("ID  WORD"));
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("cow"));
    assert_eq!(lines[2], "page 1/1 · 3 total");
}

#[tokio::test]
async fn list_respects_category() {
    let gateway = vocab_gateway();
    let mut controller = ResourceListController::new(gateway.clone(), 10).with_category(Some(ResourceId(10)));
    let mut out = Vec::new();
    list(&mut controller, 1, None, &mut out).await.unwrap();

    let text = output(out);
    assert!(text.contains("cat"));
    assert!(text.contains("cow"));
    assert!(!text.contains("dog"));
}

#[tokio::test]
async fn list_failure_is_an_error() {
    let gateway = vocab_gateway();
    gateway.fail_next(Operation::List, GatewayError::Api { status: 401, message: "Unauthorized".into() });
    let mut controller = ResourceListController::new(gateway.clone(), 10);
    let mut out = Vec::new();

    let err = list(&mut controller, 1, None, &mut out).await.unwrap_err();
    assert_eq!(err.to_string(), "Not authorized; check the API token");
    assert!(out.is_empty());
}

#[tokio::test]
async fn delete_refuses_without_yes() {
    let gateway = vocab_gateway();
    let mut controller = ResourceListController::new(gateway.clone(), 10);
    let mut out = Vec::new();

    let err = delete(&mut controller, ResourceId(2), false, &mut out).await.unwrap_err();
    assert!(err.to_string().starts_with("Delete vocabulary entry #2?"));
    assert!(err.to_string().contains("--yes"));
    assert_eq!(gateway.calls(Operation::Remove), 0);
}

#[tokio::test]
async fn delete_with_yes_removes() {
    let gateway = vocab_gateway();
    let mut controller = ResourceListController::new(gateway.clone(), 10);
    let mut out = Vec::new();

    delete(&mut controller, ResourceId(2), true, &mut out).await.unwrap();
    assert_eq!(output(out), "Deleted vocabulary entry #2\n");
    assert_eq!(gateway.ids(), vec![ResourceId(1), ResourceId(3)]);

    let err = delete(&mut controller, ResourceId(2), true, &mut Vec::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "Resource #2 not found");
}
