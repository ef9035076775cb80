//! Runtime provider and context wiring for the PhishNet desktop.
//!
//! This module owns the long-lived reducer containers (shell windows and training progress), the
//! runtime effect queue, scenario inboxes, the guardian transcript, and the feed registry. Feeds
//! are torn down when the provider's reactive scope is disposed.
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::HostServices;
use training_core::{
    prompt::GUARDIAN_GREETING, reduce_training, GuardianTurn, TerminalSession, TrainingAction,
    TrainingEffect, TrainingState,
};

use crate::{
    config::RuntimeConfig,
    effect_executor,
    feeds::{FeedRegistry, ScenarioFeeds},
    model::{AppKind, DesktopState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading runtime state and dispatching shell and training actions.
pub struct DesktopRuntimeContext {
    /// Host service bundle (text generation, clock) injected by the entry layer.
    pub host: StoredValue<HostServices>,
    /// Feed cadence and capacity settings.
    pub config: StoredValue<RuntimeConfig>,
    /// Reactive window-manager state.
    pub state: RwSignal<DesktopState>,
    /// Reactive session, rating, and task progress.
    pub training: RwSignal<TrainingState>,
    /// Mail and SMS inboxes plus the latest verdict.
    pub feeds: RwSignal<ScenarioFeeds>,
    /// Guardian chat transcript, oldest first.
    pub guardian: RwSignal<Vec<GuardianTurn>>,
    pub terminal: RwSignal<TerminalSession>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Live scenario feeds keyed by owning window.
    pub feed_registry: StoredValue<FeedRegistry>,
    /// Shell reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    /// Training reducer dispatch callback.
    pub dispatch_training: Callback<TrainingAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a shell reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    pub fn dispatch_training_action(&self, action: TrainingAction) {
        self.dispatch_training.call(action);
    }

    /// Opens `app`, or focuses its window when one is already open.
    pub fn open_app(&self, app: AppKind) {
        self.dispatch_action(DesktopAction::OpenWindow(app));
    }
}

fn log_training_effect(effect: &TrainingEffect) {
    match effect {
        TrainingEffect::CallResolved { correct, change } => logging::log!(
            "call {}: rating {} -> {} ({:+})",
            if *correct { "correct" } else { "missed" },
            change.old_rating,
            change.new_rating,
            change.delta()
        ),
        TrainingEffect::LevelUp(level) => {
            logging::log!("level up: {} ({})", level.number(), level.title())
        }
        TrainingEffect::DayAdvanced(day) => logging::log!("day {day} started"),
        TrainingEffect::DayBlocked => {
            logging::warn!("next day blocked: critical tasks remain open")
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and installs the effect executor.
pub fn DesktopProvider(
    /// Injected browser or offline host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Feed settings; defaults apply when omitted.
    #[prop(optional)]
    config: Option<RuntimeConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let feeds = create_rw_signal(ScenarioFeeds::from_config(&config));
    let host = store_value(host_services);
    let config = store_value(config);
    let state = create_rw_signal(DesktopState::default());
    let training = create_rw_signal(TrainingState::default());
    let guardian = create_rw_signal(vec![GuardianTurn::guardian(GUARDIAN_GREETING)]);
    let terminal = create_rw_signal(TerminalSession::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let feed_registry = store_value(FeedRegistry::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        let new_effects = reduce_desktop(&mut desktop, action);
        if desktop != previous {
            state.set(desktop);
        }
        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let dispatch_training = Callback::new(move |action: TrainingAction| {
        let now_ms = host.with_value(|host| host.clock.now_ms());
        let mut progress = training.get_untracked();
        let emitted = reduce_training(&mut progress, action, now_ms);
        training.set(progress);
        emitted.iter().for_each(log_training_effect);
    });

    let runtime = DesktopRuntimeContext {
        host,
        config,
        state,
        training,
        feeds,
        guardian,
        terminal,
        effects,
        feed_registry,
        dispatch,
        dispatch_training,
    };

    provide_context(runtime.clone());
    effect_executor::install(runtime);
    on_cleanup(move || {
        let _ = feed_registry.try_update_value(FeedRegistry::cancel_all);
    });

    logging::log!(
        "desktop runtime ready (host: {})",
        runtime.host.with_value(|host| host.host_strategy.as_str())
    );

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
