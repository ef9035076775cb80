//! Browser-side UI hooks invoked by runtime effects.

use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::model::WindowId;

/// Moves keyboard focus to the focused window's primary input, if the view rendered one.
pub(crate) fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        // Looked up on the next tick so a freshly opened window has mounted its input.
        let callback = Closure::once_into_js(move || {
            let Some(element) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&window_id.input_dom_id()))
            else {
                return;
            };
            if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                let _ = element.focus();
            }
        });
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
            .is_err()
        {
            logging::warn!("could not schedule input focus for window {}", window_id.0);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    logging::log!("focus input {}", window_id.input_dom_id());
}
