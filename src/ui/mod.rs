// UI module
// Host window layout, the microagents modal, and shared components

pub mod components;
pub mod layout;
pub mod microagents_modal;

pub use layout::render_app_layout;
pub use microagents_modal::{MicroagentsModal, ModalProps, ModalResponse, ModalView};
