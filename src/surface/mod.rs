use std::time::Duration;

use crate::menu::{MenuAction, MenuNode};

#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(target_os = "macos"))]
mod terminal;

#[cfg(target_os = "macos")]
pub use macos::StatusBarSurface as NativeSurface;
#[cfg(not(target_os = "macos"))]
pub use terminal::TerminalSurface as NativeSurface;

/// Something that can display a menu and report clicks on it.
///
/// Implementations are driven from the UI thread only.
pub trait MenuSurface {
    /// Replace everything currently shown with `nodes`.
    fn show(&mut self, nodes: &[MenuNode]);

    /// Process pending UI events for up to `timeout`, returning the action
    /// of an activated item if there was one.
    fn next_action(&mut self, timeout: Duration) -> Option<MenuAction>;
}
