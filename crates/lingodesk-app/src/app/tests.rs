use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use serde_json::json;

use lingodesk_core::mock::{InMemoryGateway, Operation};
use lingodesk_core::{GatewayError, ResourceId};
use lingodesk_tui::widgets::toast::ToastLevel;

use super::*;
use crate::command::{Command, InputMode};

struct Harness {
    app: App,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    gateways: Vec<Arc<InMemoryGateway>>,
}

fn seeded(kind: ResourceKind) -> InMemoryGateway {
    match kind {
        ResourceKind::Vocabularies => InMemoryGateway::with_records(
            kind,
            vec![
                json!({"id": 1, "word": "cat", "meaningVi": "con mèo", "categoryId": 10}),
                json!({"id": 2, "word": "dog", "meaningVi": "con chó", "categoryId": 11}),
                json!({"id": 3, "word": "cow", "meaningVi": "con bò", "categoryId": 10}),
            ],
        ),
        ResourceKind::VocabularyCategories => InMemoryGateway::with_records(
            kind,
            vec![json!({"id": 10, "name": "Animals"}), json!({"id": 11, "name": "Pets"})],
        ),
        other => InMemoryGateway::new(other),
    }
}

impl Harness {
    fn new(config: AppConfig) -> Self {
        let gateways: Vec<Arc<InMemoryGateway>> = ResourceKind::ALL.into_iter().map(|k| Arc::new(seeded(k))).collect();
        let dyn_gateways = gateways.iter().map(|g| g.clone() as Arc<dyn ResourceGateway>).collect();
        let dispatcher = KeybindingDispatcher::from_config(&config.keybindings);
        let server = ServerInfo { base_url: "http://localhost:8080/api/v1/admin".into(), authenticated: true };
        let mut app = App::new(&config, dyn_gateways, dispatcher, Theme::default(), server).unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        app.app_tx = tx;
        Self { app, rx, gateways }
    }

    async fn loaded() -> Self {
        let mut h = Self::new(AppConfig::default());
        h.app.refresh_tab(h.app.active_tab);
        h.next_event().await;
        h
    }

    async fn next_event(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("timed out waiting for a request to finish")
            .expect("event channel closed");
        self.app.handle_event(event);
    }

    fn press(&mut self, c: char) {
        self.app.handle_event(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }

    fn gateway(&self, kind: ResourceKind) -> &InMemoryGateway {
        self.gateways.iter().find(|g| g.kind() == kind).unwrap()
    }

    fn words(&self) -> Vec<String> {
        self.app.active().rows().into_iter().map(|row| row[1].clone()).collect()
    }

    fn last_toast(&self) -> (ToastLevel, String) {
        let toast = self.app.toasts.last().expect("a toast");
        (toast.level.clone(), toast.text.clone())
    }
}

#[tokio::test]
async fn opens_on_default_view_and_loads_first_page() {
    let h = Harness::loaded().await;
    assert_eq!(h.app.active().kind(), ResourceKind::Vocabularies);
    assert_eq!(h.words(), vec!["cat", "dog", "cow"]);
    assert_eq!(h.app.active().selected, Some(0));
}

#[tokio::test]
async fn unknown_default_view_falls_back_to_first_tab() {
    let mut config = AppConfig::default();
    config.general.default_view = "grammar-categories".into();
    assert_eq!(Harness::new(config).app.active().kind(), ResourceKind::GrammarCategories);

    let mut config = AppConfig::default();
    config.general.default_view = "lessons".into();
    assert_eq!(Harness::new(config).app.active_tab, 0);
}

#[tokio::test]
async fn tabs_load_on_first_visit_only() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::NextTab);
    assert_eq!(h.app.active().kind(), ResourceKind::VocabularyCategories);
    h.next_event().await;
    assert_eq!(h.app.active().controller().items().len(), 2);

    h.app.handle_command(Command::GoToTab(1));
    assert_eq!(h.app.active().kind(), ResourceKind::Vocabularies);
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::List), 1);

    h.app.handle_command(Command::PrevTab);
    assert_eq!(h.app.active().kind(), ResourceKind::Videos);
}

#[tokio::test]
async fn opening_a_category_filters_vocabulary() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::GoToTab(2));
    h.next_event().await;

    h.app.handle_command(Command::Open);
    assert_eq!(h.app.active().kind(), ResourceKind::Vocabularies);
    assert_eq!(h.app.active().title(), "Vocabulary · Animals");
    h.next_event().await;
    assert_eq!(h.words(), vec!["cat", "cow"]);

    h.app.handle_command(Command::ClearCategory);
    h.next_event().await;
    assert_eq!(h.words().len(), 3);
    assert_eq!(h.app.active().title(), "Vocabulary");
}

#[tokio::test]
async fn delete_goes_through_confirmation() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::Delete);
    assert_eq!(h.app.dispatcher.mode(), InputMode::ConfirmDialog);
    let message = h.app.pending_confirmation.as_ref().map(|c| c.message.clone()).unwrap();
    assert_eq!(message, "Delete vocabulary entry \"cat\" (#1)?");
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::Remove), 0);

    h.app.handle_command(Command::ConfirmAction);
    assert_eq!(h.app.dispatcher.mode(), InputMode::Normal);
    h.next_event().await;
    assert_eq!(h.last_toast(), (ToastLevel::Success, "Deleted vocabulary entry #1".to_string()));
    h.next_event().await;
    assert_eq!(h.words(), vec!["dog", "cow"]);
    assert_eq!(h.gateway(ResourceKind::Vocabularies).ids(), vec![ResourceId(2), ResourceId(3)]);
}

#[tokio::test]
async fn denied_delete_sends_nothing() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::Delete);
    h.app.handle_command(Command::DenyAction);
    assert_eq!(h.app.dispatcher.mode(), InputMode::Normal);
    assert!(h.app.pending_confirmation.is_none());
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::Remove), 0);
}

#[tokio::test]
async fn remove_waits_for_confirm_action() {
    let mut h = Harness::loaded().await;
    h.press('d');
    for c in ['d', 'r', 'j', 'q', 'x'] {
        h.press(c);
    }
    tokio::task::yield_now().await;
    assert!(h.app.running);
    assert_eq!(h.app.dispatcher.mode(), InputMode::ConfirmDialog);
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::Remove), 0);
    assert!(h.rx.try_recv().is_err());

    h.press('y');
    h.next_event().await;
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::Remove), 1);
}

#[tokio::test]
async fn deleting_a_vanished_row_reports_and_keeps_list() {
    let mut h = Harness::loaded().await;
    h.gateway(ResourceKind::Vocabularies).fail_next(Operation::Remove, GatewayError::NotFound { id: ResourceId(1) });
    h.app.handle_command(Command::Delete);
    h.app.handle_command(Command::ConfirmAction);
    h.next_event().await;

    assert_eq!(h.last_toast(), (ToastLevel::Error, "Resource #1 not found".to_string()));
    assert_eq!(h.words(), vec!["cat", "dog", "cow"]);
    assert_eq!(h.app.active().controller().last_error(), Some("Resource #1 not found"));
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::List), 1);
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test]
async fn edit_form_saves_and_reloads() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::Edit);
    assert_eq!(h.app.dispatcher.mode(), InputMode::EditForm);

    h.app.handle_command(Command::FormInput('s'));
    h.app.handle_command(Command::FormSave);
    assert!(h.app.active().form.saving);

    h.next_event().await;
    assert_eq!(h.app.dispatcher.mode(), InputMode::Normal);
    assert_eq!(h.last_toast(), (ToastLevel::Success, "Saved vocabulary entry \"cats\"".to_string()));
    h.next_event().await;
    assert_eq!(h.words()[0], "cats");
}

#[tokio::test]
async fn failed_save_keeps_form_open() {
    let mut h = Harness::loaded().await;
    h.gateway(ResourceKind::Vocabularies)
        .fail_next(Operation::Update, GatewayError::Api { status: 500, message: "boom".into() });
    h.app.handle_command(Command::Edit);
    h.app.handle_command(Command::FormSave);
    h.next_event().await;

    assert_eq!(h.app.dispatcher.mode(), InputMode::EditForm);
    assert!(!h.app.active().form.saving);
    assert_eq!(h.app.active().form.error.as_deref(), Some("API error 500: boom"));
    assert!(h.app.active().controller().edit_buffer().is_some());

    h.app.handle_command(Command::FormCancel);
    assert_eq!(h.app.dispatcher.mode(), InputMode::Normal);
    assert!(h.app.active().controller().edit_buffer().is_none());
}

#[tokio::test]
async fn create_in_category_lands_in_that_category() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::GoToTab(2));
    h.next_event().await;
    h.app.handle_command(Command::Open);
    h.next_event().await;

    h.app.handle_command(Command::Create);
    assert_eq!(h.app.active().form_title(), "New vocabulary entry in Animals");
    for c in "hen".chars() {
        h.app.handle_command(Command::FormInput(c));
    }
    h.app.handle_command(Command::FormSave);
    h.next_event().await;
    h.next_event().await;

    assert_eq!(h.words(), vec!["cat", "cow", "hen"]);
    let created = h.gateway(ResourceKind::Vocabularies).get(ResourceId(4)).unwrap();
    assert_eq!(created.category_id(), Some(ResourceId(10)));
}

#[tokio::test]
async fn filter_input_narrows_current_page() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::EnterMode(InputMode::FilterInput));
    h.app.handle_command(Command::FilterInput('d'));
    assert_eq!(h.words(), vec!["dog"]);
    h.app.handle_command(Command::ExitMode);
    assert_eq!(h.app.active().controller().filter(), "d");

    h.app.handle_command(Command::EnterMode(InputMode::FilterInput));
    h.app.handle_command(Command::FilterCancel);
    assert_eq!(h.words().len(), 3);
    assert_eq!(h.gateway(ResourceKind::Vocabularies).calls(Operation::List), 1);
}

#[tokio::test]
async fn failed_refresh_keeps_rows_and_toasts() {
    let mut h = Harness::loaded().await;
    h.gateway(ResourceKind::Vocabularies).fail_next(Operation::List, GatewayError::Network("connection refused".into()));
    h.app.handle_command(Command::Refresh);
    h.next_event().await;

    assert_eq!(h.words().len(), 3);
    assert_eq!(h.last_toast(), (ToastLevel::Error, "Cannot reach the server: connection refused".to_string()));
}

#[tokio::test]
async fn paging_past_the_end_only_toasts() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::NextPage);
    assert_eq!(h.last_toast(), (ToastLevel::Info, "Already on the last page".to_string()));
    h.app.handle_command(Command::PrevPage);
    assert_eq!(h.last_toast(), (ToastLevel::Info, "Already on the first page".to_string()));
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test]
async fn app_logs_toggle_and_quit() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::ToggleAppLogs);
    assert_eq!(h.app.dispatcher.mode(), InputMode::AppLogs);
    h.app.handle_command(Command::ToggleAppLogs);
    assert_eq!(h.app.dispatcher.mode(), InputMode::Normal);

    h.app.handle_command(Command::Quit);
    assert!(!h.app.running);
}

#[tokio::test]
async fn draws_list_status_and_dialog() {
    let mut h = Harness::loaded().await;
    h.app.handle_command(Command::Delete);

    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    terminal.draw(|frame| h.app.draw(frame)).unwrap();
    let content: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();

    assert!(content.contains("Vocabulary"));
    assert!(content.contains("con mèo"));
    assert!(content.contains("CONFIRM"));
    assert!(content.contains("(#1)?"));
}
