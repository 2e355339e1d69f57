//! Microagents modal
//!
//! Lists the microagents loaded into a conversation. Each row expands to
//! show its triggers and content; a refresh button refetches the list once
//! the agent runtime is ready.
//!
//! What gets drawn is a pure function of the readiness gate and the query
//! flags ([`select_view`], [`header_view`]). The only state the modal keeps
//! is which rows are expanded, and that is dropped together with the modal.

use std::sync::Arc;

use eframe::egui;

use crate::i18n::{I18nKey, Translate};
use crate::query::{MicroagentsQuery, QueryOptions, QueryResult};
use crate::state::{AgentState, ExpansionState, Microagent, TypeBadge};
use crate::ui::components::{
    centered_message, centered_spinner, chevron, refresh_button, trigger_pill, type_badge,
};

/// egui id of the modal area
pub const MODAL_ID: &str = "microagents-modal";

const MODAL_WIDTH: f32 = 640.0;
const CONTENT_MAX_HEIGHT: f32 = 400.0;
const BACKDROP_ALPHA: u8 = 160;

/// Inputs from the host
#[derive(Debug, Clone, Copy)]
pub struct ModalProps<'a> {
    /// Conversation whose microagents are listed
    pub conversation_id: Option<&'a str>,
    /// Current run-state of the agent
    pub agent_state: AgentState,
}

/// Body of the modal, one variant per mutually exclusive branch
#[derive(Debug, Clone, PartialEq)]
pub enum ModalView {
    /// Runtime not ready yet
    WaitingForRuntime,
    /// First fetch in progress
    Loading,
    /// Last fetch failed
    Error,
    /// Fetch succeeded but returned nothing
    Empty,
    /// Rows to render, in fetch order
    List(Arc<Vec<Microagent>>),
}

/// Pick the body branch. Evaluated in order: readiness, loading, error,
/// empty, list.
pub fn select_view(is_agent_ready: bool, result: &QueryResult) -> ModalView {
    if !is_agent_ready {
        return ModalView::WaitingForRuntime;
    }
    if result.is_loading {
        return ModalView::Loading;
    }
    if result.is_error {
        return ModalView::Error;
    }
    match &result.data {
        Some(list) if !list.is_empty() => ModalView::List(Arc::clone(list)),
        _ => ModalView::Empty,
    }
}

/// Header controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderView {
    /// Refresh button visible
    pub show_refresh: bool,
    /// Refresh button clickable
    pub refresh_enabled: bool,
    /// Refresh button shows its busy animation
    pub refresh_spinning: bool,
    /// Warning banner under the title visible
    pub show_warning: bool,
}

/// Header controls for the current flags
pub fn header_view(is_agent_ready: bool, result: &QueryResult) -> HeaderView {
    HeaderView {
        show_refresh: is_agent_ready,
        refresh_enabled: !(result.is_loading || result.is_refetching),
        refresh_spinning: result.is_refetching,
        show_warning: is_agent_ready,
    }
}

/// What a single row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    /// Microagent name
    pub name: &'a str,
    /// Type badge
    pub badge: TypeBadge,
    /// Row is expanded
    pub expanded: bool,
    /// Detail panel, present only when expanded
    pub details: Option<RowDetails<'a>>,
}

/// Detail panel of an expanded row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDetails<'a> {
    /// Trigger pills; the triggers section is hidden when empty
    pub triggers: &'a [String],
    /// Content to show verbatim; `None` shows the no-content text
    pub content: Option<&'a str>,
}

/// Row model for `agent` given the current expansion state
pub fn row_view<'a>(agent: &'a Microagent, expansion: &ExpansionState) -> RowView<'a> {
    let expanded = expansion.is_expanded(&agent.name);
    RowView {
        name: &agent.name,
        badge: agent.badge(),
        expanded,
        details: expanded.then(|| RowDetails {
            triggers: &agent.triggers,
            content: agent.display_content(),
        }),
    }
}

/// What happened during a frame of the modal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalResponse {
    /// Backdrop clicked or Escape pressed
    pub close_requested: bool,
    /// Refresh button clicked
    pub refresh_requested: bool,
}

/// The microagents modal. Create one when the modal opens and drop it when
/// it closes.
#[derive(Debug, Default)]
pub struct MicroagentsModal {
    expansion: ExpansionState,
    armed: bool,
}

impl MicroagentsModal {
    /// Create a modal with every row collapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// Current expansion state
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Expand or collapse the row for `name`
    pub fn toggle(&mut self, name: &str) -> bool {
        self.expansion.toggle(name)
    }

    /// Poll the query and draw one frame. Refresh clicks are forwarded to
    /// `query.refetch()`.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        props: &ModalProps<'_>,
        query: &mut MicroagentsQuery,
        t: &dyn Translate,
    ) -> ModalResponse {
        let result = query.poll(&QueryOptions {
            agent_state: props.agent_state,
            conversation_id: props.conversation_id,
            enabled: true,
        });

        let response = self.show_result(ctx, props.agent_state.is_ready(), &result, t);
        if response.refresh_requested {
            query.refetch();
        }
        response
    }

    /// Draw one frame from an already polled result
    pub fn show_result(
        &mut self,
        ctx: &egui::Context,
        is_agent_ready: bool,
        result: &QueryResult,
        t: &dyn Translate,
    ) -> ModalResponse {
        let view = select_view(is_agent_ready, result);
        let header = header_view(is_agent_ready, result);
        let mut response = ModalResponse::default();

        let screen = ctx.screen_rect();
        let width = MODAL_WIDTH.min(screen.width() * 0.9);
        let list_height = screen.height() * 0.6;

        // Full-screen backdrop under the modal. It claims every click that
        // misses the modal so host widgets below stay inert.
        let backdrop = egui::Area::new(egui::Id::new(MODAL_ID).with("backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .movable(false)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(BACKDROP_ALPHA));
                ui.allocate_rect(screen, egui::Sense::click())
            });

        egui::Area::new(egui::Id::new(MODAL_ID))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.set_width(width);
                    ui.set_max_height(screen.height() * 0.8);
                    self.header_ui(ui, &header, t, &mut response);
                    ui.add_space(12.0);
                    self.body_ui(ui, &view, list_height, t);
                });
            });

        if self.armed {
            let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
            response.close_requested = backdrop.inner.clicked() || escape;
        }
        // The click that opened the modal must not close it
        self.armed = true;

        response
    }

    fn header_ui(
        &self,
        ui: &mut egui::Ui,
        header: &HeaderView,
        t: &dyn Translate,
        response: &mut ModalResponse,
    ) {
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new(t.t(I18nKey::MicroagentsModalTitle)).strong());
            if header.show_refresh {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let clicked = refresh_button(
                        ui,
                        t.t(I18nKey::ButtonRefresh),
                        header.refresh_enabled,
                        header.refresh_spinning,
                    )
                    .clicked();
                    if clicked {
                        response.refresh_requested = true;
                    }
                });
            }
        });

        if header.show_warning {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(t.t(I18nKey::MicroagentsModalWarning))
                    .size(13.0)
                    .color(egui::Color32::GRAY),
            );
        }
    }

    fn body_ui(&mut self, ui: &mut egui::Ui, view: &ModalView, height: f32, t: &dyn Translate) {
        match view {
            ModalView::WaitingForRuntime => {
                centered_message(ui, t.t(I18nKey::WaitingForRuntime), 20.0, height)
            }
            ModalView::Loading => centered_spinner(ui, height),
            ModalView::Error => {
                centered_message(ui, t.t(I18nKey::MicroagentsModalFetchError), 14.0, height)
            }
            ModalView::Empty => {
                centered_message(ui, t.t(I18nKey::ConversationNoMicroagents), 14.0, height)
            }
            ModalView::List(microagents) => self.list_ui(ui, microagents, height, t),
        }
    }

    fn list_ui(
        &mut self,
        ui: &mut egui::Ui,
        microagents: &[Microagent],
        height: f32,
        t: &dyn Translate,
    ) {
        let mut toggled: Option<&str> = None;

        egui::ScrollArea::vertical()
            .id_source("microagents_list_scroll")
            .auto_shrink([false; 2])
            .max_height(height)
            .show(ui, |ui| {
                for agent in microagents {
                    let row = row_view(agent, &self.expansion);
                    if row_ui(ui, &row, t) {
                        toggled = Some(agent.name.as_str());
                    }
                    ui.add_space(6.0);
                }
            });

        if let Some(name) = toggled {
            let expanded = self.expansion.toggle(name);
            tracing::trace!(
                name = %name,
                expanded,
                open_rows = self.expansion.expanded_count(),
                "Toggled microagent row"
            );
        }
    }
}

/// Draw one row. Returns true if the header was clicked.
fn row_ui(ui: &mut egui::Ui, row: &RowView<'_>, t: &dyn Translate) -> bool {
    let row_id = ui.id().with(("microagent_row", row.name));
    let rounding = egui::Rounding::same(4.0);

    let header = egui::Frame::none()
        .rounding(rounding)
        .inner_margin(egui::Margin::symmetric(8.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(row.name).strong()).selectable(false),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new(chevron(row.expanded)).weak())
                            .selectable(false),
                    );
                    type_badge(ui, row.badge);
                });
            })
        });

    let header_rect = header.response.rect;
    let interact = ui.interact(header_rect, row_id, egui::Sense::click());
    if interact.hovered() {
        let stroke_color = ui.visuals().widgets.hovered.bg_fill;
        ui.painter().rect_stroke(
            header_rect,
            rounding,
            egui::Stroke::new(1.5, stroke_color),
        );
    }

    if let Some(details) = &row.details {
        details_ui(ui, row.name, details, t);
    }

    interact.clicked()
}

fn details_ui(ui: &mut egui::Ui, name: &str, details: &RowDetails<'_>, t: &dyn Translate) {
    egui::Frame::none()
        .inner_margin(egui::Margin {
            left: 8.0,
            right: 8.0,
            top: 4.0,
            bottom: 12.0,
        })
        .show(ui, |ui| {
            if !details.triggers.is_empty() {
                ui.label(
                    egui::RichText::new(t.t(I18nKey::MicroagentsModalTriggers))
                        .strong()
                        .size(13.0),
                );
                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
                    for trigger in details.triggers {
                        trigger_pill(ui, trigger);
                    }
                });
                ui.add_space(10.0);
            }

            ui.label(
                egui::RichText::new(t.t(I18nKey::MicroagentsModalContent))
                    .strong()
                    .size(13.0),
            );
            ui.add_space(4.0);

            let content = details
                .content
                .unwrap_or_else(|| t.t(I18nKey::MicroagentsModalNoContent));
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(egui::Rounding::same(4.0))
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_source(("microagent_content", name))
                        .max_height(CONTENT_MAX_HEIGHT)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(content).monospace().size(13.0),
                                )
                                .wrap(true),
                            );
                        });
                });
        });
}
