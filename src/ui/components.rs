// Reusable UI components
// Badges, pills, buttons and placeholders shared by the modal and the host window

use eframe::egui;
use crate::state::{AgentState, TypeBadge};

const PILL_ROUNDING: f32 = 10.0;

/// Render the agent run-state as colored text
/// Colors: not ready (yellow), working (green), waiting on user (blue),
/// failed (red), everything else (gray)
pub fn agent_state_badge(ui: &mut egui::Ui, state: AgentState) {
    let text_color = match state {
        AgentState::Loading | AgentState::Init => egui::Color32::from_rgb(220, 180, 0), // Yellow
        AgentState::Running | AgentState::UserConfirmed => egui::Color32::from_rgb(0, 200, 0), // Green
        AgentState::AwaitingUserInput | AgentState::AwaitingUserConfirmation => {
            egui::Color32::from_rgb(80, 150, 255) // Blue
        }
        AgentState::Error | AgentState::RateLimited | AgentState::Rejected => {
            egui::Color32::from_rgb(220, 0, 0) // Red
        }
        AgentState::Paused
        | AgentState::Stopped
        | AgentState::Finished
        | AgentState::UserRejected => egui::Color32::GRAY,
    };

    ui.colored_label(text_color, state.as_str());
}

/// Rounded label with a filled background
fn pill(ui: &mut egui::Ui, text: &str, fill: egui::Color32, text_color: egui::Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(egui::Rounding::same(PILL_ROUNDING))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(text).size(11.0).color(text_color))
                    .selectable(false),
            );
        });
}

/// "Repository" / "Knowledge" badge in a row header
pub fn type_badge(ui: &mut egui::Ui, badge: TypeBadge) {
    pill(
        ui,
        badge.label(),
        egui::Color32::from_gray(40),
        egui::Color32::from_gray(220),
    );
}

/// A single trigger keyword
pub fn trigger_pill(ui: &mut egui::Ui, trigger: &str) {
    pill(
        ui,
        trigger,
        egui::Color32::from_rgb(30, 58, 138), // Dark blue
        egui::Color32::from_gray(230),
    );
}

/// Chevron glyph for an expandable row
pub fn chevron(expanded: bool) -> &'static str {
    if expanded {
        "▼"
    } else {
        "▶"
    }
}

/// Primary refresh button
/// Shows a spinner in place of the icon while `spinning`
pub fn refresh_button(
    ui: &mut egui::Ui,
    label: &str,
    enabled: bool,
    spinning: bool,
) -> egui::Response {
    ui.horizontal(|ui| {
        if spinning {
            ui.add(egui::Spinner::new().size(14.0));
        }
        let text = if spinning {
            egui::RichText::new(label).strong()
        } else {
            egui::RichText::new(format!("⟳ {}", label)).strong()
        };
        ui.add_enabled(enabled, egui::Button::new(text))
    })
    .inner
}

/// Message centered in a block of the given height
pub fn centered_message(ui: &mut egui::Ui, text: &str, size: f32, height: f32) {
    centered_block(ui, height, |ui| {
        ui.label(egui::RichText::new(text).size(size).weak());
    });
}

/// Spinner centered in a block of the given height
pub fn centered_spinner(ui: &mut egui::Ui, height: f32) {
    centered_block(ui, height, |ui| {
        ui.add(egui::Spinner::new().size(32.0));
    });
}

fn centered_block(ui: &mut egui::Ui, height: f32, add_contents: impl FnOnce(&mut egui::Ui)) {
    let size = egui::vec2(ui.available_width(), height);
    ui.allocate_ui_with_layout(
        size,
        egui::Layout::centered_and_justified(egui::Direction::TopDown),
        add_contents,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chevron() {
        assert_eq!(chevron(true), "▼");
        assert_eq!(chevron(false), "▶");
    }
}
