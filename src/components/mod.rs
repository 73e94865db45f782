//! UI Components
//!
//! Leptos components mounted into server-rendered markup.

mod prefill_notice;

pub use prefill_notice::{mount_notice, NoticeBoard, PrefillNotice};
