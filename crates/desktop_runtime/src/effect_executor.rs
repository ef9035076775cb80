//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{
    feeds::channel_for_app, host_ui, reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext, training_flows,
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::WindowOpened { window_id, app } => {
            if let Some(channel) = channel_for_app(app) {
                training_flows::start_feed(runtime, window_id, channel);
            }
        }
        RuntimeEffect::WindowClosed { window_id, .. } => {
            training_flows::stop_feed(runtime, window_id);
        }
        RuntimeEffect::FocusWindowInput(window_id) => host_ui::focus_window_input(window_id),
    }
}
