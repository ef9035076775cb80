//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{AppKind, DesktopState, WindowId, WindowRecord};

/// Next stacking value: one above every live window, or `1` on an empty desktop.
pub fn next_z_index(state: &DesktopState) -> u32 {
    state.max_z_index().saturating_add(1)
}

/// Raises `window_id` above every other window and un-minimizes it.
///
/// Returns `false` when the window does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    let z_index = next_z_index(state);
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.z_index = z_index;
    window.minimized = false;
    true
}

/// Appends a fresh topmost window for `app` and returns its id.
pub fn spawn_window(state: &mut DesktopState, app: AppKind) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let z_index = next_z_index(state);
    state.windows.push(WindowRecord {
        id,
        app,
        title: app.title().to_string(),
        minimized: false,
        z_index,
    });
    id
}
