//! Host-bundle models injected into the desktop runtime.

use std::rc::Rc;

use crate::{Clock, NoopTextGenerationService, SystemClock, TextGenerationService};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition with a live generation endpoint.
    Browser,
    /// Offline composition where every generation request falls back to literal content.
    Offline,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Offline => "offline",
        }
    }
}

/// Runtime-selected host service bundle injected into the desktop runtime.
///
/// Environment-specific selection happens before this bundle crosses into `desktop_runtime`, so
/// the runtime never names a browser type.
#[derive(Clone)]
pub struct HostServices {
    /// Language-model text generation.
    pub genai: Rc<dyn TextGenerationService>,
    /// Timestamp source for rating history and scenario seeds.
    pub clock: Rc<dyn Clock>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Offline bundle: generation always fails over to literal fallbacks.
    pub fn offline() -> Self {
        Self {
            genai: Rc::new(NoopTextGenerationService),
            clock: Rc::new(SystemClock),
            host_strategy: HostStrategy::Offline,
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::offline()
    }
}
