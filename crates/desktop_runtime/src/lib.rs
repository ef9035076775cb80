//! Reactive desktop runtime for the PhishNet trainer.
//!
//! The window manager itself is a pure reducer ([`reduce_desktop`]) over [`DesktopState`]; the
//! Leptos [`DesktopProvider`] wraps it together with the training reducer, the scenario feeds, and
//! the guardian chat, and executes the [`RuntimeEffect`]s the shell reducer emits.

pub mod config;
mod effect_executor;
pub mod feeds;
mod host_ui;
pub mod model;
pub mod polling;
pub mod reducer;
pub mod runtime_context;
pub mod training_flows;
mod window_manager;

pub use config::{ConfigError, FeedConfig, GenAiConfig, RuntimeConfig};
pub use feeds::{CallFeedback, FeedRegistry, ScenarioFeeds};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use training_flows::{
    dismiss_item, report_call, request_scenario, run_terminal_command, send_guardian_message,
};
