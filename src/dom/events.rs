//! Page-lifetime event listeners.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event};

/// Bootstrap fires this on the modal element before it becomes visible
pub const MODAL_SHOW_EVENT: &str = "show.bs.modal";

/// Call `handler` with the element that triggered the modal, if any.
/// The listener lives as long as the page.
pub fn on_modal_show<F>(modal: &Element, handler: F)
where
    F: Fn(Option<Element>) + 'static,
{
    let on_show = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        handler(related_target(&ev));
    });
    if modal
        .add_event_listener_with_callback(MODAL_SHOW_EVENT, on_show.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("could not listen for {} on #{}", MODAL_SHOW_EVENT, modal.id());
    }
    on_show.forget();
}

/// Bootstrap puts the trigger on the event object itself, not on `detail`
fn related_target(ev: &Event) -> Option<Element> {
    js_sys::Reflect::get(ev.as_ref(), &JsValue::from_str("relatedTarget"))
        .ok()?
        .dyn_into::<Element>()
        .ok()
}

/// Run `f` once the document is parsed (immediately if it already is)
pub fn when_dom_ready<F>(document: &Document, f: F)
where
    F: FnOnce() + 'static,
{
    if !still_parsing(&document.ready_state()) {
        f();
        return;
    }

    let mut f = Some(f);
    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Some(f) = f.take() {
            f();
        }
    });
    if document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .is_err()
    {
        log::error!("could not listen for DOMContentLoaded, page will not be initialized");
    }
    on_ready.forget();
}

/// `document.readyState` is `"loading"` until parsing finishes, then
/// `"interactive"` and `"complete"`
fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}
