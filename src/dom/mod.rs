//! DOM Bindings
//!
//! `web_sys` implementations of the seams the prefill controller writes
//! through, plus the Bootstrap modal event hook.

mod events;
mod form;
mod modal;

pub use events::{on_modal_show, when_dom_ready};
pub use form::DomForm;
pub use modal::DomModal;
