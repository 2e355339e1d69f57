// Microagents GUI - Main Entry Point
// Native Rust GUI for inspecting the microagents of a conversation

use std::sync::Arc;

use eframe::egui;
use microagents_gui::client::HttpMicroagentSource;
use microagents_gui::config::Config;
use microagents_gui::i18n::Catalog;
use microagents_gui::query::{MicroagentSource, MicroagentsQuery};
use microagents_gui::state::AppState;
use microagents_gui::ui::{render_app_layout, MicroagentsModal, ModalProps};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Fetches run here; the UI thread only polls their results
    let runtime = tokio::runtime::Runtime::new()?;
    let source: Arc<dyn MicroagentSource> = Arc::new(HttpMicroagentSource::new(&config.api)?);

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Microagents")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Microagents",
        options,
        Box::new(move |cc| {
            let query = MicroagentsQuery::new(source, handle)
                .with_repaint(cc.egui_ctx.clone())
                .with_timings(config.stale_time(), config.cache_time());
            Box::new(MicroagentsApp::new(&config, query))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))?;

    info!("Window closed");
    Ok(())
}

/// Main application struct
/// Owns host state, the microagent query and the modal while it is open
struct MicroagentsApp {
    /// Conversation, agent state and UI flags
    state: AppState,
    /// Outlives the modal so cached microagents survive close/reopen
    query: MicroagentsQuery,
    /// Present only while the modal is open
    modal: Option<MicroagentsModal>,
    /// Modal strings
    catalog: Catalog,
}

impl MicroagentsApp {
    /// Create a new application instance
    fn new(config: &Config, query: MicroagentsQuery) -> Self {
        Self {
            state: AppState::new(config.ui.conversation_id.clone(), config.ui.agent_state),
            query,
            modal: None,
            catalog: Catalog::new(config.ui.locale),
        }
    }

    /// Open or close the modal to match the UI flag
    fn sync_modal(&mut self) {
        match (self.state.ui_state.microagents_open, self.modal.is_some()) {
            (true, false) => {
                self.query.mount();
                self.modal = Some(MicroagentsModal::new());
            }
            (false, true) => {
                self.modal = None;
                self.query.unmount();
            }
            _ => {}
        }
    }

    fn show_modal(&mut self, ctx: &egui::Context) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        let props = ModalProps {
            conversation_id: self.state.conversation_id.as_deref(),
            agent_state: self.state.agent_state,
        };
        let response = modal.show(ctx, &props, &mut self.query, &self.catalog);
        if response.close_requested {
            self.state.close_microagents();
        }
    }
}

impl eframe::App for MicroagentsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        render_app_layout(ctx, &mut self.state);
        self.sync_modal();
        self.show_modal(ctx);
        self.sync_modal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use microagents_gui::error::FetchError;
    use microagents_gui::state::{AgentState, Microagent};

    struct NoMicroagents;

    #[async_trait]
    impl MicroagentSource for NoMicroagents {
        async fn list_microagents(
            &self,
            _conversation_id: &str,
        ) -> Result<Vec<Microagent>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn test_app() -> MicroagentsApp {
        let query = MicroagentsQuery::new(Arc::new(NoMicroagents), tokio::runtime::Handle::current());
        MicroagentsApp::new(&Config::default(), query)
    }

    #[tokio::test]
    async fn test_app_creation() {
        let app = test_app();
        assert!(app.modal.is_none());
        assert!(app.state.conversation_id.is_none());
        assert_eq!(app.state.agent_state, AgentState::Loading);
    }

    #[tokio::test]
    async fn test_modal_follows_ui_flag() {
        let mut app = test_app();

        app.state.open_microagents();
        app.sync_modal();
        assert!(app.modal.is_some());

        app.modal.as_mut().unwrap().toggle("a");
        app.state.close_microagents();
        app.sync_modal();
        assert!(app.modal.is_none());

        // Reopening starts with every row collapsed
        app.state.open_microagents();
        app.sync_modal();
        assert!(!app.modal.as_ref().unwrap().expansion().is_expanded("a"));
    }
}
