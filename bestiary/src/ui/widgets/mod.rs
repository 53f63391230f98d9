//! TUI widgets for the viewer

pub mod input;
pub mod monster_list;
pub mod status_bar;

pub use input::InputWidget;
pub use monster_list::MonsterListWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
