//! Window screens, panels and overlays drawn with macroquad.

pub mod app;
mod audio_panel;
mod draw;
mod menu;
mod notifications;
mod overlay;
mod panels;
