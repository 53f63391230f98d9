//! UI module for the bestiary viewer

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::Overlay;
