//! Prefill Notice Component
//!
//! Non-blocking inline message inside an edit modal, shown when the form
//! could not be prefilled. Dismisses itself after a timeout.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Message state for one modal's notice
#[derive(Clone, Copy)]
pub struct NoticeBoard {
    message: RwSignal<Option<String>>,
    /// Bumped on every post/clear so an old timer can't hide a newer message
    generation: RwSignal<u64>,
    timeout_ms: u32,
}

impl NoticeBoard {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            message: RwSignal::new(None),
            generation: RwSignal::new(0),
            timeout_ms,
        }
    }

    pub fn message(&self) -> ReadSignal<Option<String>> {
        self.message.read_only()
    }

    /// Show `text`, returning the generation a later `dismiss` must match
    pub fn post(&self, text: String) -> u64 {
        let generation = self.generation.get_untracked() + 1;
        self.generation.set(generation);
        self.message.set(Some(text));
        generation
    }

    pub fn dismiss(&self, generation: u64) {
        if self.generation.get_untracked() == generation {
            self.message.set(None);
        }
    }

    pub fn clear(&self) {
        self.generation.update(|g| *g += 1);
        self.message.set(None);
    }

    /// Post and schedule the dismiss
    pub fn flash(&self, text: String) {
        let generation = self.post(text);
        let board = *self;
        spawn_local(async move {
            TimeoutFuture::new(board.timeout_ms).await;
            board.dismiss(generation);
        });
    }
}

#[component]
pub fn PrefillNotice(board: NoticeBoard) -> impl IntoView {
    let message = board.message();

    view! {
        <Show when=move || message.get().is_some()>
            <div class="alert alert-warning py-1 px-2 mb-2 prefill-notice" role="status">
                <span>{move || message.get().unwrap_or_default()}</span>
                <button
                    type="button"
                    class="btn-close btn-sm float-end"
                    aria-label="Zavrieť"
                    on:click=move |_| board.clear()
                ></button>
            </div>
        </Show>
    }
}

/// Mount the notice into `#host_id` if the page has such an element
pub fn mount_notice(document: &Document, host_id: &str, board: NoticeBoard) -> bool {
    if host_id.is_empty() {
        return false;
    }
    let Some(host) = document
        .get_element_by_id(host_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("no #{} for prefill notices, failures go to the console only", host_id);
        return false;
    };

    leptos::mount::mount_to(host, move || view! { <PrefillNotice board=board /> }).forget();
    true
}
