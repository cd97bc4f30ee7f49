//! Subcommand handlers
//!
//! Handlers write to a caller-supplied writer so they can be exercised
//! without a terminal.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chatlab_domains::{display_host, DomainRegistry};
use chatlab_editor::{ConfigEditor, EditorError, TemplateWelcome};
use chatlab_model::embed::embed_snippet;
use chatlab_preview::{ChannelSink, Delivery, PreviewChannel};
use chatlab_store::ConfigStore;
use tokio::sync::mpsc::UnboundedReceiver;

/// Everything a handler needs
pub(crate) struct Session {
    pub(crate) store: Arc<dyn ConfigStore>,
    pub(crate) widget_id: String,
    pub(crate) api_base: String,
    pub(crate) target_origin: Option<String>,
}

/// Domain list action
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DomainsAction {
    List,
    Add(String),
    Edit(usize, String),
    Remove(usize),
}

impl Session {
    fn editor(&self) -> (ConfigEditor, UnboundedReceiver<Delivery>) {
        let (sink, rx) = ChannelSink::open();
        let mut channel = PreviewChannel::new(Arc::new(sink));
        if let Some(origin) = &self.target_origin {
            channel = channel.with_target_origin(origin.clone());
        }
        let editor = ConfigEditor::new(Arc::clone(&self.store), channel)
            .with_generator(Arc::new(TemplateWelcome));
        (editor, rx)
    }

    /// Load the session widget, returning whether the stored state is known
    async fn load(&self, editor: &mut ConfigEditor) -> bool {
        match editor.load(&self.widget_id).await {
            Ok(_) => true,
            Err(e) => {
                eprintln!("warning: {}; showing defaults", e.notice());
                false
            }
        }
    }

    /// Print the loaded draft as JSON
    pub(crate) async fn show(&self, out: &mut dyn Write) -> Result<()> {
        let (mut editor, _rx) = self.editor();
        self.load(&mut editor).await;
        let json = serde_json::to_string_pretty(editor.draft())?;
        writeln!(out, "{json}")?;
        Ok(())
    }

    /// Apply `field value` pairs, printing each resulting preview message
    ///
    /// The field `welcomeMessage` with value `@generate` uses the generator.
    pub(crate) async fn set(&self, pairs: &[String], save: bool, out: &mut dyn Write) -> Result<()> {
        if pairs.is_empty() || pairs.len() % 2 != 0 {
            bail!("expected <field> <value> pairs, got {} arguments", pairs.len());
        }

        let (mut editor, mut rx) = self.editor();
        let loaded = self.load(&mut editor).await;
        if save && !loaded {
            bail!(
                "refusing to save {}: stored configuration could not be loaded",
                self.widget_id
            );
        }
        while rx.try_recv().is_ok() {}

        for pair in pairs.chunks(2) {
            let (name, value) = (&pair[0], &pair[1]);
            if name == "welcomeMessage" && value == "@generate" {
                editor.generate_welcome_message().await.map_err(notice)?;
            } else {
                editor
                    .set_field_named(name, value)
                    .map_err(notice)
                    .with_context(|| format!("rejected {name}={value}"))?;
            }
            while let Ok(delivery) = rx.try_recv() {
                writeln!(out, "{}", delivery.message.to_json()?)?;
            }
        }

        if save {
            editor.save().await.map_err(notice)?;
            writeln!(out, "saved {}", editor.widget_id())?;
        }
        Ok(())
    }

    /// Run a domain list action
    pub(crate) async fn domains(&self, action: DomainsAction, out: &mut dyn Write) -> Result<()> {
        let mut registry = DomainRegistry::load(self.widget_id.clone(), Arc::clone(&self.store))
            .await
            .context("failed to load authorized domains")?;

        match action {
            DomainsAction::List => {
                if registry.is_empty() {
                    writeln!(out, "no authorized domains")?;
                }
                for (index, origin) in registry.domains().iter().enumerate() {
                    writeln!(out, "{index}\t{origin}\t{}", display_host(origin))?;
                }
            }
            DomainsAction::Add(raw) => {
                if registry.add(&raw).await? {
                    let added = registry.domains().last().map_or("", String::as_str);
                    writeln!(out, "added {added}")?;
                } else {
                    writeln!(out, "unchanged")?;
                }
            }
            DomainsAction::Edit(index, raw) => {
                let previous = registry.edit(index, &raw).await?;
                writeln!(out, "replaced {previous} with {}", registry.domains()[index])?;
            }
            DomainsAction::Remove(index) => {
                let removed = registry.remove(index).await?;
                writeln!(out, "removed {removed}")?;
            }
        }
        Ok(())
    }

    /// Print the embed snippet
    pub(crate) fn snippet(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", embed_snippet(&self.api_base, &self.widget_id))?;
        Ok(())
    }
}

fn notice(error: EditorError) -> anyhow::Error {
    let message = error.notice();
    anyhow::Error::new(error).context(message)
}
