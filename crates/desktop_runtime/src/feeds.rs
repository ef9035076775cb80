//! Scenario inboxes and the per-window feed registry.
//!
//! A feed is bound to the window that hosts its app: it starts on `WindowOpened`, and its timer is
//! cancelled on `WindowClosed`. Responses that land after the window closed are discarded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use training_core::{
    prompt::{self, ScenarioPlan},
    Channel, Difficulty, EmailScenario, GameSession, Inbox, ScenarioRecord, SmsScenario,
};

use crate::{
    config::{FeedConfig, RuntimeConfig},
    model::{AppKind, WindowId},
    polling::RepeatingTask,
};

/// Scenario channel served by an app window, if any.
pub fn channel_for_app(app: AppKind) -> Option<Channel> {
    match app {
        AppKind::Mail => Some(Channel::Email),
        AppKind::Messages => Some(Channel::Sms),
        _ => None,
    }
}

pub fn feed_config(config: &RuntimeConfig, channel: Channel) -> &FeedConfig {
    match channel {
        Channel::Email => &config.mail_feed,
        Channel::Sms => &config.sms_feed,
    }
}

/// Tier requested for the next scenario. SMS is pinned to Intermediate; email follows the score.
pub fn difficulty_for_channel(channel: Channel, session: &GameSession) -> Difficulty {
    match channel {
        Channel::Email => session.next_difficulty(),
        Channel::Sms => Difficulty::Intermediate,
    }
}

/// Rolls a scenario plan with the channel's topic list and phishing mix.
pub fn plan_for_channel(channel: Channel, mix_roll: f64, topic_roll: f64, now_ms: u64) -> ScenarioPlan {
    match channel {
        Channel::Email => ScenarioPlan::roll(
            prompt::EMAIL_TOPICS,
            prompt::EMAIL_PHISHING_RATIO,
            mix_roll,
            topic_roll,
            now_ms,
        ),
        Channel::Sms => ScenarioPlan::roll(
            prompt::SMS_TOPICS,
            prompt::SMS_PHISHING_RATIO,
            mix_roll,
            topic_roll,
            now_ms,
        ),
    }
}

/// Verdict text shown after the player makes a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFeedback {
    pub channel: Channel,
    pub item_id: u64,
    pub correct: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFeeds {
    pub mail: Inbox<EmailScenario>,
    pub sms: Inbox<SmsScenario>,
    pub last_feedback: Option<CallFeedback>,
}

impl Default for ScenarioFeeds {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

impl ScenarioFeeds {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            mail: Inbox::new(config.mail_feed.capacity),
            sms: Inbox::new(config.sms_feed.capacity),
            last_feedback: None,
        }
    }

    pub fn accepts_more(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.mail.accepts_more(),
            Channel::Sms => self.sms.accepts_more(),
        }
    }

    /// Stores a scenario in its channel's inbox. Returns `None` when that inbox is full.
    pub fn deliver(&mut self, scenario: ScenarioRecord) -> Option<u64> {
        match scenario {
            ScenarioRecord::Email(email) => self.mail.push(email),
            ScenarioRecord::Sms(sms) => self.sms.push(sms),
        }
    }

    /// Looks up an item as a channel-agnostic record.
    pub fn record(&self, channel: Channel, item_id: u64) -> Option<ScenarioRecord> {
        match channel {
            Channel::Email => self
                .mail
                .get(item_id)
                .map(|item| ScenarioRecord::Email(item.scenario.clone())),
            Channel::Sms => self
                .sms
                .get(item_id)
                .map(|item| ScenarioRecord::Sms(item.scenario.clone())),
        }
    }

    /// Marks an unread item read and returns it for scoring. Items already called (or gone) yield
    /// `None`, so each scenario is scored at most once.
    pub fn take_for_call(&mut self, channel: Channel, item_id: u64) -> Option<ScenarioRecord> {
        let unread = match channel {
            Channel::Email => self.mail.get(item_id).is_some_and(|item| !item.read),
            Channel::Sms => self.sms.get(item_id).is_some_and(|item| !item.read),
        };
        if !unread {
            return None;
        }
        self.mark_read(channel, item_id);
        self.record(channel, item_id)
    }

    pub fn mark_read(&mut self, channel: Channel, item_id: u64) {
        match channel {
            Channel::Email => self.mail.mark_read(item_id),
            Channel::Sms => self.sms.mark_read(item_id),
        }
    }

    /// Removes a handled item and clears feedback that referred to it.
    pub fn dismiss(&mut self, channel: Channel, item_id: u64) {
        match channel {
            Channel::Email => {
                self.mail.remove(item_id);
            }
            Channel::Sms => {
                self.sms.remove(item_id);
            }
        }
        if self
            .last_feedback
            .as_ref()
            .is_some_and(|fb| fb.channel == channel && fb.item_id == item_id)
        {
            self.last_feedback = None;
        }
    }
}

struct ActiveFeed {
    channel: Channel,
    in_flight: bool,
    // Held for its Drop; clearing the interval happens when the entry is removed.
    _task: Option<RepeatingTask>,
}

/// Live feeds keyed by owning window.
#[derive(Default)]
pub struct FeedRegistry {
    active: HashMap<WindowId, ActiveFeed>,
}

impl FeedRegistry {
    /// Registers a feed for `window_id`, replacing (and cancelling) any previous one.
    pub fn register(&mut self, window_id: WindowId, channel: Channel, task: Option<RepeatingTask>) {
        self.active.insert(
            window_id,
            ActiveFeed {
                channel,
                in_flight: false,
                _task: task,
            },
        );
    }

    /// Cancels the feed owned by `window_id`. Returns whether one was registered.
    pub fn cancel(&mut self, window_id: WindowId) -> bool {
        self.active.remove(&window_id).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    pub fn channel(&self, window_id: WindowId) -> Option<Channel> {
        self.active.get(&window_id).map(|feed| feed.channel)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Claims the single in-flight slot for `window_id`. Returns `false` when the feed is gone or
    /// a request is already outstanding.
    pub fn begin_request(&mut self, window_id: WindowId) -> bool {
        match self.active.get_mut(&window_id) {
            Some(feed) if !feed.in_flight => {
                feed.in_flight = true;
                true
            }
            _ => false,
        }
    }

    /// Releases the in-flight slot. Returns whether the feed is still registered, i.e. whether the
    /// response should be delivered.
    pub fn finish_request(&mut self, window_id: WindowId) -> bool {
        match self.active.get_mut(&window_id) {
            Some(feed) => {
                feed.in_flight = false;
                true
            }
            None => false,
        }
    }
}
