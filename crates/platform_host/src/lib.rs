//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the text-generation
//! service trait used for scenario content, clock/entropy helpers, and the host bundle, while
//! concrete browser transports live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod genai;
pub mod host;
pub mod time;

pub use genai::{
    ChatMessage, ChatRole, GenerationRequest, NoopTextGenerationService,
    ScriptedTextGenerationService, TextGenerationFuture, TextGenerationService,
    DEFAULT_GENAI_MODEL,
};
pub use host::{HostServices, HostStrategy};
pub use time::{now_label, random_unit, unix_time_ms_now, Clock, FixedClock, SystemClock};
