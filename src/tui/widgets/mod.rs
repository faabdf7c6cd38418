//! Widgets for the library screens and their overlays.

pub mod confirm_dialog;
pub mod editor;
pub mod help_menu;
pub mod interactive_widget;
pub mod passphrase_modal;
pub mod proof_list;
pub mod proof_view;
pub mod render_helpers;
pub mod search_bar;
pub mod selection;
pub mod status_bar;
pub mod tag_filter;
pub mod text_input;
pub mod theme;
pub mod welcome;

pub use crossterm::event::KeyEvent;
pub use interactive_widget::InteractiveStatefulWidget;
