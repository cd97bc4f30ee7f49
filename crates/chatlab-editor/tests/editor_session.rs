//! End-to-end editing sessions against doubles

use std::sync::Arc;

use async_trait::async_trait;
use chatlab_editor::{ConfigEditor, EditorError, GenerationError, LoadOutcome, WelcomeGenerator};
use chatlab_model::{ConfigField, WidgetConfig};
use chatlab_preview::{PreviewChannel, PreviewMessage, PreviewSurface, TargetOrigin};
use chatlab_store::{MemoryConfigStore, StoreWrite};
use chatlab_test_utils::{seeded_store, FailingStore, FlakyStore, RecordingSink};
use pretty_assertions::assert_eq;

const EDITOR_ORIGIN: &str = "https://dashboard.example";

struct StaticWelcome(&'static str);

#[async_trait]
impl WelcomeGenerator for StaticWelcome {
    async fn generate(&self, _config: &WidgetConfig) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

struct BrokenWelcome;

#[async_trait]
impl WelcomeGenerator for BrokenWelcome {
    async fn generate(&self, _config: &WidgetConfig) -> Result<String, GenerationError> {
        Err(GenerationError::new("model unavailable"))
    }
}

fn session(store: Arc<dyn chatlab_store::ConfigStore>) -> (ConfigEditor, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let editor = ConfigEditor::new(store, PreviewChannel::new(sink.clone()));
    (editor, sink)
}

#[tokio::test]
async fn bot_name_edit_reaches_preview_with_other_fields_unchanged() {
    let (mut editor, sink) = session(Arc::new(seeded_store("w1")));
    editor.load("w1").await.unwrap();
    let loaded = editor.draft().clone();

    editor.set_field(ConfigField::BotName, "Nova 2").unwrap();

    let mut surface = PreviewSurface::new();
    for delivery in sink.deliveries() {
        surface.accept(EDITOR_ORIGIN, &delivery);
    }
    let rendered = surface.render_state().unwrap();
    assert_eq!(rendered.bot_name, "Nova 2");
    assert_eq!(rendered.changed_fields(&loaded), vec![ConfigField::BotName]);
}

#[tokio::test]
async fn every_edit_emits_a_complete_snapshot() {
    let (mut editor, sink) = session(Arc::new(MemoryConfigStore::new()));
    editor.load("w1").await.unwrap();
    sink.clear();

    editor.set_field(ConfigField::PrimaryColor, "#").unwrap();
    editor.set_field(ConfigField::PrimaryColor, "#1").unwrap();
    editor.set_field(ConfigField::PrimaryColor, "#123456").unwrap();

    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 3);
    for delivery in &deliveries {
        assert_eq!(delivery.target, TargetOrigin::Any);
        let json = delivery.message.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "CONFIG_UPDATE");
        assert_eq!(value["config"].as_object().map(|o| o.len()), Some(12));
    }
}

#[tokio::test]
async fn scoped_channel_targets_preview_origin() {
    let sink = Arc::new(RecordingSink::new());
    let channel = PreviewChannel::new(sink.clone()).with_target_origin("https://preview.example");
    let mut editor = ConfigEditor::new(Arc::new(MemoryConfigStore::new()), channel);

    editor.set_field(ConfigField::ChatBg, "#000000").unwrap();

    assert_eq!(
        sink.last().unwrap().target,
        TargetOrigin::Origin("https://preview.example".to_string())
    );
}

#[tokio::test]
async fn save_sends_only_style_fields() {
    let store = Arc::new(seeded_store("w1"));
    let (mut editor, _sink) = session(store.clone());
    editor.load("w1").await.unwrap();
    editor.set_field(ConfigField::FontSize, "16px").unwrap();

    editor.save().await.unwrap();

    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    let StoreWrite::Style { widget_id, config } = &writes[0] else {
        panic!("expected style write, got {:?}", writes[0]);
    };
    assert_eq!(widget_id, "w1");
    assert_eq!(config.font_size, "16px");
    assert_eq!(
        store.get("w1").unwrap().whitelisted_domains,
        vec!["https://example.com".to_string()]
    );
}

#[tokio::test]
async fn failed_save_keeps_draft_dirty_and_unchanged() {
    let store = Arc::new(FlakyStore::new(1));
    let (mut editor, _sink) = session(store.clone());
    editor.load("w1").await.unwrap();
    editor.set_field(ConfigField::BotName, "Retry Me").unwrap();
    let draft = editor.draft().clone();

    let err = editor.save().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(editor.draft(), &draft);
    assert!(editor.is_dirty());
    assert_eq!(store.inner().write_count(), 0);

    editor.save().await.unwrap();
    assert!(!editor.is_dirty());
    assert_eq!(store.inner().get("w1").unwrap().config().bot_name, "Retry Me");
}

#[tokio::test]
async fn unreachable_store_on_load_falls_back_to_defaults() {
    let (mut editor, sink) = session(Arc::new(FailingStore::network()));

    let err = editor.load("w1").await.unwrap_err();

    assert!(matches!(err, EditorError::Store(_)));
    assert!(err.is_retryable());
    assert_eq!(editor.widget_id(), "w1");
    assert_eq!(editor.draft(), &WidgetConfig::default());
    assert_eq!(sink.last_config(), Some(WidgetConfig::default()));

    editor.set_field(ConfigField::BotName, "Offline").unwrap();
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn failed_reload_keeps_unsaved_edits() {
    let (mut editor, sink) = session(Arc::new(FailingStore::network()));
    editor.set_field(ConfigField::BotName, "Unsaved").unwrap();
    let draft = editor.draft().clone();
    sink.clear();

    editor.load("w1").await.unwrap_err();

    assert_eq!(editor.draft(), &draft);
    assert_eq!(editor.draft().bot_name, "Unsaved");
    assert!(editor.is_dirty());
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.last_config(), Some(draft));
}

#[tokio::test]
async fn missing_widget_loads_defaults() {
    let (mut editor, _sink) = session(Arc::new(MemoryConfigStore::new()));
    assert_eq!(editor.load("nope").await.unwrap(), LoadOutcome::NotFound);
    assert_eq!(editor.draft(), &WidgetConfig::default());
}

#[tokio::test]
async fn generated_welcome_changes_only_welcome_message() {
    let (editor, sink) = session(Arc::new(seeded_store("w1")));
    let mut editor = editor.with_generator(Arc::new(StaticWelcome("Welcome aboard!")));
    editor.load("w1").await.unwrap();
    let before = editor.draft().clone();

    let text = editor.generate_welcome_message().await.unwrap();

    assert_eq!(text, "Welcome aboard!");
    assert_eq!(editor.draft().changed_fields(&before), vec![ConfigField::WelcomeMessage]);
    assert_eq!(
        sink.last().map(|d| d.message),
        Some(PreviewMessage::config_update(editor.draft()))
    );
}

#[tokio::test]
async fn generator_failure_leaves_draft_untouched() {
    let (editor, sink) = session(Arc::new(MemoryConfigStore::new()));
    let mut editor = editor.with_generator(Arc::new(BrokenWelcome));
    let published = sink.len();

    let err = editor.generate_welcome_message().await.unwrap_err();

    assert!(matches!(err, EditorError::Generation(_)));
    assert_eq!(err.notice(), "Could not generate a welcome message");
    assert_eq!(editor.draft(), &WidgetConfig::default());
    assert_eq!(sink.len(), published);
}
