//! Concrete host-service bundle assembly for the browser entry layer.

use std::rc::Rc;

use platform_host::{HostServices, HostStrategy, SystemClock};

use crate::WebTextGenerationService;

/// Builds the browser host bundle with a `fetch`-backed generation service.
pub fn build_host_services(endpoint: impl Into<String>, model: impl Into<String>) -> HostServices {
    HostServices {
        genai: Rc::new(WebTextGenerationService::new(endpoint, model)),
        clock: Rc::new(SystemClock),
        host_strategy: HostStrategy::Browser,
    }
}

/// Builds the browser bundle when an endpoint is configured, otherwise the offline bundle.
pub fn host_services_for_endpoint(endpoint: Option<&str>, model: &str) -> HostServices {
    match endpoint.map(str::trim).filter(|endpoint| !endpoint.is_empty()) {
        Some(endpoint) => build_host_services(endpoint, model),
        None => HostServices::offline(),
    }
}
