use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl WindowId {
    /// DOM id of the element that should take keyboard focus when this window is focused.
    pub fn input_dom_id(self) -> String {
        format!("window-{}-input", self.0)
    }
}

/// Desktop applications. Each kind is a singleton: at most one window per kind is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppKind {
    Mail,
    Browser,
    Terminal,
    Messages,
    Guardian,
    Dashboard,
    Settings,
}

impl AppKind {
    pub const ALL: [Self; 7] = [
        Self::Mail,
        Self::Browser,
        Self::Terminal,
        Self::Messages,
        Self::Guardian,
        Self::Dashboard,
        Self::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Mail => "CorpMail",
            Self::Browser => "PhishNet Intranet",
            Self::Terminal => "Terminal",
            Self::Messages => "Messages",
            Self::Guardian => "Digital Guardian",
            Self::Dashboard => "Dashboard",
            Self::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app: AppKind,
    pub title: String,
    pub minimized: bool,
    pub z_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    /// Creation order, not stacking order.
    pub windows: Vec<WindowRecord>,
    pub start_menu_open: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            start_menu_open: false,
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn window_for_app(&self, app: AppKind) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app == app)
    }

    /// Taskbar "running" indicator.
    pub fn is_app_open(&self, app: AppKind) -> bool {
        self.window_for_app(app).is_some()
    }

    pub fn max_z_index(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Topmost window that is not minimized.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    /// Windows to draw, bottom first.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<_> = self.windows.iter().filter(|w| !w.minimized).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }
}
