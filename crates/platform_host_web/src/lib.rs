//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Outside `wasm32` the adapters compile but report that no browser host is available, so the
//! runtime falls back exactly as it would offline.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host bundle factories for runtime wiring.
pub mod adapters;
/// `fetch`-backed text generation.
pub mod genai;

pub use adapters::{build_host_services, host_services_for_endpoint};
pub use genai::{build_chat_body, extract_completion_text, WebTextGenerationService};
