//! Reducer actions, side-effect intents, and transition logic for the desktop shell.
//!
//! Every action is defined for every input. References to windows that no longer exist are
//! no-ops, so stale clicks from a renderer that has not caught up cannot corrupt the stack.

use crate::{
    model::{AppKind, DesktopState, WindowId},
    window_manager::{focus_window_internal, spawn_window},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open the window for an app, or focus it if one already exists.
    OpenWindow(AppKind),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Toggle the minimized flag of a window.
    MinimizeWindow {
        /// Window to minimize or restore.
        window_id: WindowId,
    },
    /// Raise and un-minimize a window.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// A new window exists; app services bound to its lifetime may start.
    WindowOpened {
        /// New window.
        window_id: WindowId,
        /// App hosted by the window.
        app: AppKind,
    },
    /// A window was destroyed; app services bound to it must stop.
    WindowClosed {
        /// Removed window.
        window_id: WindowId,
        /// App hosted by the window.
        app: AppKind,
    },
    /// Move keyboard focus into the window's primary input.
    FocusWindowInput(WindowId),
}

/// Applies a [`DesktopAction`] to the shell state and collects resulting side effects.
///
/// This function is the authoritative state transition engine for window management.
pub fn reduce_desktop(state: &mut DesktopState, action: DesktopAction) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(app) => {
            if let Some(existing) = state.window_for_app(app).map(|w| w.id) {
                return reduce_desktop(state, DesktopAction::FocusWindow { window_id: existing });
            }
            let window_id = spawn_window(state, app);
            state.start_menu_open = false;
            effects.push(RuntimeEffect::WindowOpened { window_id, app });
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if let Some(index) = state.windows.iter().position(|w| w.id == window_id) {
                let removed = state.windows.remove(index);
                effects.push(RuntimeEffect::WindowClosed {
                    window_id,
                    app: removed.app,
                });
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
                window.minimized = !window.minimized;
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if focus_window_internal(state, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn open(state: &mut DesktopState, app: AppKind) -> WindowId {
        reduce_desktop(state, DesktopAction::OpenWindow(app));
        state.window_for_app(app).expect("window").id
    }

    fn z(state: &DesktopState, window_id: WindowId) -> u32 {
        state.window(window_id).expect("window").z_index
    }

    #[test]
    fn open_window_creates_topmost_window_with_default_title() {
        let mut state = DesktopState::default();

        let effects = reduce_desktop(&mut state, DesktopAction::OpenWindow(AppKind::Mail));

        let window = &state.windows[0];
        assert_eq!(window.title, "CorpMail");
        assert_eq!(window.z_index, 1);
        assert!(!window.minimized);
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::WindowOpened {
                    window_id: window.id,
                    app: AppKind::Mail,
                },
                RuntimeEffect::FocusWindowInput(window.id),
            ]
        );
    }

    #[test]
    fn default_titles_cover_every_app() {
        let titles: Vec<_> = AppKind::ALL.iter().map(|app| app.title()).collect();
        assert_eq!(
            titles,
            vec![
                "CorpMail",
                "PhishNet Intranet",
                "Terminal",
                "Messages",
                "Digital Guardian",
                "Dashboard",
                "Settings",
            ]
        );
    }

    #[test]
    fn repeated_open_keeps_one_window_per_app() {
        let mut state = DesktopState::default();
        let first = open(&mut state, AppKind::Terminal);
        open(&mut state, AppKind::Browser);

        for _ in 0..3 {
            let effects = reduce_desktop(&mut state, DesktopAction::OpenWindow(AppKind::Terminal));
            assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(first)]);
        }

        let terminals = state
            .windows
            .iter()
            .filter(|w| w.app == AppKind::Terminal)
            .count();
        assert_eq!(terminals, 1);
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.focused_window_id(), Some(first));
    }

    #[test]
    fn opened_window_is_always_above_the_rest() {
        let mut state = DesktopState::default();
        for app in AppKind::ALL {
            let id = open(&mut state, app);
            let others_max = state
                .windows
                .iter()
                .filter(|w| w.id != id)
                .map(|w| w.z_index)
                .max()
                .unwrap_or(0);
            assert!(z(&state, id) > others_max);
        }
    }

    #[test]
    fn opening_existing_minimized_app_restores_it() {
        let mut state = DesktopState::default();
        let mail = open(&mut state, AppKind::Mail);
        open(&mut state, AppKind::Messages);
        reduce_desktop(&mut state, DesktopAction::MinimizeWindow { window_id: mail });
        assert!(state.window(mail).expect("mail").minimized);

        reduce_desktop(&mut state, DesktopAction::OpenWindow(AppKind::Mail));

        let window = state.window(mail).expect("mail");
        assert!(!window.minimized);
        assert_eq!(window.z_index, 3);
        assert_eq!(state.windows.len(), 2);
    }

    #[test]
    fn new_window_closes_start_menu_but_refocus_does_not() {
        let mut state = DesktopState::default();
        reduce_desktop(&mut state, DesktopAction::ToggleStartMenu);
        open(&mut state, AppKind::Dashboard);
        assert!(!state.start_menu_open);

        reduce_desktop(&mut state, DesktopAction::ToggleStartMenu);
        open(&mut state, AppKind::Dashboard);
        assert!(state.start_menu_open);

        reduce_desktop(&mut state, DesktopAction::CloseStartMenu);
        assert!(!state.start_menu_open);
    }

    #[test]
    fn missing_ids_leave_state_unchanged() {
        let mut state = DesktopState::default();
        open(&mut state, AppKind::Mail);
        open(&mut state, AppKind::Guardian);
        let before = state.clone();
        let ghost = WindowId(404);

        for action in [
            DesktopAction::CloseWindow { window_id: ghost },
            DesktopAction::MinimizeWindow { window_id: ghost },
            DesktopAction::FocusWindow { window_id: ghost },
        ] {
            assert_eq!(reduce_desktop(&mut state, action), Vec::new());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn close_removes_window_and_reports_app() {
        let mut state = DesktopState::default();
        let mail = open(&mut state, AppKind::Mail);
        let chat = open(&mut state, AppKind::Guardian);

        let effects = reduce_desktop(&mut state, DesktopAction::CloseWindow { window_id: mail });

        assert_eq!(
            effects,
            vec![RuntimeEffect::WindowClosed {
                window_id: mail,
                app: AppKind::Mail,
            }]
        );
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.windows[0].id, chat);

        // The slot is free again; a fresh id is allocated.
        let reopened = open(&mut state, AppKind::Mail);
        assert_ne!(reopened, mail);
    }

    #[test]
    fn minimize_toggles_and_hides_from_renderer() {
        let mut state = DesktopState::default();
        let mail = open(&mut state, AppKind::Mail);
        let browser = open(&mut state, AppKind::Browser);

        reduce_desktop(&mut state, DesktopAction::MinimizeWindow { window_id: browser });
        let visible: Vec<_> = state.visible_windows().iter().map(|w| w.id).collect();
        assert_eq!(visible, vec![mail]);
        assert_eq!(state.focused_window_id(), Some(mail));

        reduce_desktop(&mut state, DesktopAction::MinimizeWindow { window_id: browser });
        assert!(!state.window(browser).expect("browser").minimized);
        // Toggling does not restack.
        assert_eq!(z(&state, browser), 2);
    }

    #[test]
    fn focus_raises_to_new_maximum_and_unminimizes() {
        let mut state = DesktopState::default();
        let mail = open(&mut state, AppKind::Mail);
        let browser = open(&mut state, AppKind::Browser);
        let terminal = open(&mut state, AppKind::Terminal);

        reduce_desktop(&mut state, DesktopAction::MinimizeWindow { window_id: mail });
        reduce_desktop(&mut state, DesktopAction::FocusWindow { window_id: mail });
        let mail_record = state.window(mail).expect("mail");
        assert!(!mail_record.minimized);
        assert_eq!(mail_record.z_index, 4);

        reduce_desktop(&mut state, DesktopAction::FocusWindow { window_id: browser });
        assert_eq!(z(&state, browser), 5);

        let draw_order: Vec<_> = state.visible_windows().iter().map(|w| w.id).collect();
        assert_eq!(draw_order, vec![terminal, mail, browser]);
        // Creation order is preserved in the collection.
        let creation_order: Vec<_> = state.windows.iter().map(|w| w.id).collect();
        assert_eq!(creation_order, vec![mail, browser, terminal]);
    }

    #[test]
    fn focusing_top_window_still_bumps_its_z_index() {
        let mut state = DesktopState::default();
        let mail = open(&mut state, AppKind::Mail);
        reduce_desktop(&mut state, DesktopAction::FocusWindow { window_id: mail });
        reduce_desktop(&mut state, DesktopAction::FocusWindow { window_id: mail });
        assert_eq!(z(&state, mail), 3);
    }
}
