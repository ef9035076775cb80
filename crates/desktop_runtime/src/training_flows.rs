//! Async training flows driven by the runtime: scenario feeds, call resolution, the guardian
//! chat, and terminal commands.
//!
//! Every flow that awaits the generation service re-checks ownership when it resumes. A feed
//! response for a window that has since closed is dropped, and continuations that outlive the
//! provider use the `try_*` signal accessors so they become no-ops.

use std::time::Duration;

use leptos::*;
use platform_host::{now_label, random_unit};
use training_core::{
    chat_with_guardian, generate_email, generate_feedback, generate_sms, Channel, Generated,
    GenerationSource, GuardianTurn, ScenarioRecord, TrainingAction,
};

use crate::{
    feeds::{difficulty_for_channel, feed_config, plan_for_channel, CallFeedback, FeedRegistry},
    model::WindowId,
    polling::RepeatingTask,
    runtime_context::DesktopRuntimeContext,
};

/// Binds a scenario feed to a freshly opened window.
pub(crate) fn start_feed(runtime: DesktopRuntimeContext, window_id: WindowId, channel: Channel) {
    let config = runtime
        .config
        .with_value(|config| feed_config(config, channel).clone());

    let task = match RepeatingTask::start(Duration::from_millis(config.interval_ms), move || {
        request_scenario(runtime, window_id)
    }) {
        Ok(task) => Some(task),
        Err(err) => {
            logging::warn!("{channel:?} feed for window {} has no timer: {err}", window_id.0);
            None
        }
    };
    runtime
        .feed_registry
        .update_value(|registry| registry.register(window_id, channel, task));

    if config.fetch_on_open {
        request_scenario(runtime, window_id);
    }
}

/// Cancels the feed owned by a closed window.
pub(crate) fn stop_feed(runtime: DesktopRuntimeContext, window_id: WindowId) {
    let mut cancelled = false;
    runtime
        .feed_registry
        .update_value(|registry| cancelled = registry.cancel(window_id));
    if cancelled {
        let remaining = runtime.feed_registry.with_value(FeedRegistry::len);
        logging::log!(
            "feed for window {} cancelled; {remaining} still active",
            window_id.0
        );
    }
}

/// Requests one scenario for the feed owned by `window_id`.
///
/// Skipped while the inbox is full or another request for the same feed is outstanding.
pub fn request_scenario(runtime: DesktopRuntimeContext, window_id: WindowId) {
    let Some(channel) = runtime
        .feed_registry
        .try_with_value(|registry| registry.channel(window_id))
        .flatten()
    else {
        return;
    };
    if !runtime.feeds.with_untracked(|feeds| feeds.accepts_more(channel)) {
        return;
    }
    let mut claimed = false;
    runtime
        .feed_registry
        .update_value(|registry| claimed = registry.begin_request(window_id));
    if !claimed {
        return;
    }

    let host = runtime.host.get_value();
    let plan = plan_for_channel(channel, random_unit(), random_unit(), host.clock.now_ms());
    let difficulty = runtime
        .training
        .with_untracked(|training| difficulty_for_channel(channel, &training.session));

    spawn_local(async move {
        let generated: Generated<ScenarioRecord> = match channel {
            Channel::Email => generate_email(host.genai.as_ref(), difficulty, &plan)
                .await
                .map(ScenarioRecord::Email),
            Channel::Sms => generate_sms(host.genai.as_ref(), &plan)
                .await
                .map(ScenarioRecord::Sms),
        };

        let mut still_open = false;
        let _ = runtime
            .feed_registry
            .try_update_value(|registry| still_open = registry.finish_request(window_id));
        if !still_open {
            return;
        }

        if let GenerationSource::Fallback(reason) = &generated.source {
            logging::warn!("{channel:?} scenario fell back to default content: {reason}");
        }
        let _ = runtime.feeds.try_update(|feeds| {
            if feeds.deliver(generated.value).is_none() {
                logging::log!("{channel:?} inbox full; scenario dropped");
            }
        });
    });
}

/// Resolves the player's call on an inbox item: scores it and fetches verdict text.
///
/// Items that were already called are ignored.
pub fn report_call(
    runtime: DesktopRuntimeContext,
    channel: Channel,
    item_id: u64,
    marked_as_phishing: bool,
) {
    let mut taken = None;
    runtime
        .feeds
        .update(|feeds| taken = feeds.take_for_call(channel, item_id));
    let Some(record) = taken else {
        logging::warn!("{channel:?} item {item_id} is missing or already called");
        return;
    };

    let is_phishing = record.is_phishing();
    let correct = is_phishing == marked_as_phishing;
    runtime.dispatch_training_action(TrainingAction::ResolveScenario {
        channel,
        difficulty: record.difficulty(),
        marked_as_phishing,
        is_phishing,
    });

    let host = runtime.host.get_value();
    spawn_local(async move {
        let feedback = generate_feedback(host.genai.as_ref(), &record, marked_as_phishing).await;
        if let GenerationSource::Fallback(reason) = &feedback.source {
            logging::warn!("feedback fell back to canned text: {reason}");
        }
        let _ = runtime.feeds.try_update(|feeds| {
            feeds.last_feedback = Some(CallFeedback {
                channel,
                item_id,
                correct,
                message: feedback.value,
            });
        });
    });
}

pub fn dismiss_item(runtime: DesktopRuntimeContext, channel: Channel, item_id: u64) {
    runtime
        .feeds
        .update(|feeds| feeds.dismiss(channel, item_id));
}

/// Appends the player's message to the guardian transcript and requests a reply.
pub fn send_guardian_message(runtime: DesktopRuntimeContext, text: String) {
    if text.trim().is_empty() {
        return;
    }
    runtime
        .guardian
        .update(|history| history.push(GuardianTurn::player(text)));

    let history = runtime.guardian.get_untracked();
    let context = runtime.training.with_untracked(|training| {
        format!("Current Objective: {}", training.session.current_objective)
    });
    let host = runtime.host.get_value();
    spawn_local(async move {
        let reply = chat_with_guardian(host.genai.as_ref(), &history, &context).await;
        if let GenerationSource::Fallback(reason) = &reply.source {
            logging::warn!("guardian reply fell back: {reason}");
        }
        let _ = runtime
            .guardian
            .try_update(|history| history.push(GuardianTurn::guardian(reply.value)));
    });
}

pub fn run_terminal_command(runtime: DesktopRuntimeContext, input: &str) {
    let label = now_label();
    runtime
        .terminal
        .update(|terminal| terminal.execute(input, &label));
}
