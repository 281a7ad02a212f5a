use std::sync::Arc;

use serde_json::json;

use lingodesk_core::mock::InMemoryGateway;
use lingodesk_core::{ResourceId, ResourceKind, ResourceListController};

use super::ResourceListPane;

async fn loaded_pane() -> ResourceListPane {
    let gateway = InMemoryGateway::with_records(
        ResourceKind::Vocabularies,
        vec![
            json!({"id": 1, "word": "cat", "meaningVi": "con mèo"}),
            json!({"id": 2, "word": "dog", "meaningVi": "con chó"}),
            json!({"id": 3, "word": "catalog", "meaningVi": "danh mục"}),
        ],
    );
    let mut controller = ResourceListController::new(Arc::new(gateway), 10);
    controller.refresh(1).await;
    let mut pane = ResourceListPane::new(controller);
    pane.clamp_selection();
    pane
}

#[tokio::test]
async fn selection_starts_on_first_row_and_wraps() {
    let mut pane = loaded_pane().await;
    assert_eq!(pane.selected, Some(0));
    pane.select_prev();
    assert_eq!(pane.selected, Some(2));
    pane.select_next();
    assert_eq!(pane.selected, Some(0));
}

#[tokio::test]
async fn filter_narrows_rows_and_selection_follows() {
    let mut pane = loaded_pane().await;
    pane.selected = Some(2);
    pane.controller_mut().set_filter("CAT");
    pane.clamp_selection();

    let rows = pane.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], "cat");
    assert_eq!(pane.selected, Some(1));
    assert_eq!(pane.selected_record().map(|r| r.id), Some(ResourceId(3)));

    pane.controller_mut().set_filter("zzz");
    pane.clamp_selection();
    assert_eq!(pane.selected, None);
    assert!(pane.selected_record().is_none());
}

#[tokio::test]
async fn title_shows_category_label_when_filtered() {
    let mut pane = loaded_pane().await;
    assert_eq!(pane.title(), "Vocabulary");

    let _ticket = pane.controller_mut().set_category(Some(ResourceId(7)));
    assert_eq!(pane.title(), "Vocabulary · category #7");
    pane.set_category_label(Some("Animals".into()));
    assert_eq!(pane.title(), "Vocabulary · Animals");
}

#[tokio::test]
async fn typing_edits_the_active_field() {
    let mut pane = loaded_pane().await;
    pane.controller_mut().start_edit(ResourceId(1)).unwrap();
    pane.reset_form();
    assert_eq!(pane.form_title(), "Edit vocabulary entry #1");

    pane.form_input('s').unwrap();
    pane.form_next_field();
    pane.form_backspace().unwrap();

    let fields = pane.form_fields();
    assert_eq!(fields[0], ("Word".to_string(), "cats".to_string()));
    assert_eq!(fields[1].1, "");
    assert_eq!(pane.controller().edit_buffer().and_then(|b| b.get("word")), Some("cats"));
}

#[tokio::test]
async fn field_cursor_wraps_both_ways() {
    let mut pane = loaded_pane().await;
    pane.controller_mut().start_create();
    pane.reset_form();
    let len = pane.form_fields().len();

    pane.form_prev_field();
    assert_eq!(pane.form.active, len - 1);
    pane.form_next_field();
    assert_eq!(pane.form.active, 0);
    assert_eq!(pane.form_title(), "New vocabulary entry");
}

#[tokio::test]
async fn typing_without_a_session_is_rejected() {
    let mut pane = loaded_pane().await;
    assert!(pane.form_input('x').is_err());
    assert!(pane.form_fields().is_empty());
}
