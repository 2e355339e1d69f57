// Main application layout
// Menu bar plus a conversation panel that opens the microagents modal

use eframe::egui;
use crate::state::{AgentState, AppState};
use crate::ui::components::agent_state_badge;

/// Render the host window
/// Includes the menu bar and the conversation panel
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState) {
    render_menu_bar(ctx, state);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        render_conversation_panel(ui, state);
    });
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    ctx.style_mut(|style| {
                        style.visuals.dark_mode = dark_mode;
                    });
                }
                ui.separator();
                if ui.button("Microagents...").clicked() {
                    state.open_microagents();
                    ui.close_menu();
                }
            });

            // Agent state is normally pushed by the runtime; the menu lets it
            // be set by hand
            ui.menu_button("Agent", |ui| {
                for agent_state in AgentState::ALL {
                    let selected = state.agent_state == agent_state;
                    if ui.radio(selected, agent_state.as_str()).clicked() {
                        if state.set_agent_state(agent_state) {
                            tracing::info!(agent_state = %agent_state, "Agent state changed");
                        }
                        ui.close_menu();
                    }
                }
            });
        });
    });
}

/// Render the conversation panel
fn render_conversation_panel(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical(|ui| {
        ui.heading("Conversation");
        ui.add_space(8.0);
        ui.separator();
        ui.add_space(12.0);

        ui.group(|ui| {
            ui.vertical(|ui| {
                ui.add_space(12.0);

                // Conversation id
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new("ID:").strong());
                    ui.add_space(12.0);
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut state.ui_state.conversation_input)
                            .hint_text("conversation id")
                            .font(egui::TextStyle::Monospace),
                    );
                    let submitted =
                        edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (submitted || ui.button("Open").clicked()) && apply_conversation_input(state) {
                        tracing::info!(
                            conversation_id = ?state.conversation_id,
                            "Conversation changed"
                        );
                    }
                });

                ui.add_space(12.0);

                // Agent state
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new("Agent:").strong());
                    ui.add_space(12.0);
                    agent_state_badge(ui, state.agent_state);
                });

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.spacing_mut().button_padding = egui::vec2(12.0, 8.0);
                    if ui
                        .button(egui::RichText::new("Show microagents").strong())
                        .clicked()
                    {
                        state.open_microagents();
                    }
                    if state.conversation_id.is_none() {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new("No conversation selected").weak().italics());
                    }
                });

                ui.add_space(12.0);
            });
        });
    });
}

/// Commit the typed conversation id. Returns true if the conversation changed.
fn apply_conversation_input(state: &mut AppState) -> bool {
    let input = state.ui_state.conversation_input.clone();
    state.set_conversation_id(&input)
}
