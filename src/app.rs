//! Timesheet Frontend Page
//!
//! Wires the edit modals and the hours chart into the server-rendered page.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::api::HttpFetcher;
use crate::chart;
use crate::components::{mount_notice, NoticeBoard};
use crate::config::{AppConfig, FormConfig};
use crate::dom::{self, DomForm, DomModal};
use crate::models::{Prefill, Project, ProjectArgs, Record, RecordArgs};
use crate::prefill::{parse_trigger_id, PrefillController, PrefillOutcome};

type DomController<T> = PrefillController<T, DomForm, DomModal, HttpFetcher>;

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

/// One edit modal on the page with its controller and notice
pub struct EditModal<T> {
    controller: Rc<DomController<T>>,
    notice: NoticeBoard,
}

impl<T> Clone for EditModal<T> {
    fn clone(&self) -> Self {
        Self { controller: Rc::clone(&self.controller), notice: self.notice }
    }
}

impl<T> EditModal<T>
where
    T: Prefill + DeserializeOwned + 'static,
{
    /// Bind the modal named in `config`. `None` when the page doesn't have it.
    fn install(document: &Document, kind: &'static str, config: &FormConfig, notice_timeout_ms: u32) -> Option<Self> {
        let Some(modal_el) = document
            .get_element_by_id(&config.modal_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::debug!("[{}] no #{} on this page", kind, config.modal_id);
            return None;
        };

        let notice = NoticeBoard::new(notice_timeout_ms);
        mount_notice(document, &config.notice_host_id, notice);

        let form = DomForm::bind(document, config);
        let modal = DomModal::new(modal_el.clone());
        let controller = Rc::new(PrefillController::new(kind, config, form, modal, HttpFetcher));
        let edit = Self { controller, notice };

        let handler = edit.clone();
        dom::on_modal_show(&modal_el, move |trigger| handler.on_show(trigger));
        log::debug!("[{}] listening on #{}", kind, config.modal_id);

        Some(edit)
    }

    /// `show.bs.modal`: prefill from the trigger's `data-id`
    fn on_show(&self, trigger: Option<Element>) {
        let kind = self.controller.kind();
        let attr = trigger.and_then(|el| el.get_attribute("data-id"));
        let id = match parse_trigger_id(attr.as_deref()) {
            Ok(Some(id)) => id,
            Ok(None) => {
                log::debug!("[{}] modal opened without data-id, nothing to prefill", kind);
                self.controller.invalidate();
                return;
            }
            Err(e) => {
                log::warn!("[{}] {}", kind, e);
                self.controller.invalidate();
                return;
            }
        };

        self.notice.clear();
        let controller = Rc::clone(&self.controller);
        let notice = self.notice;
        spawn_local(async move {
            match controller.open(id).await {
                Ok(PrefillOutcome::Applied) => log::debug!("[{}] prefilled {}", kind, id),
                Ok(PrefillOutcome::Stale) => {}
                Err(e) => {
                    log::warn!("[{}] prefill of {} failed: {}", kind, id, e);
                    notice.flash(e.notice_text());
                }
            }
        });
    }

    fn open_with<P: Prefill>(&self, values: &P) {
        self.notice.clear();
        self.controller.open_with(values);
    }
}

/// Everything installed on the current page
pub struct Page {
    records: Option<EditModal<Record>>,
    projects: Option<EditModal<Project>>,
    chart_rendered: bool,
}

impl Page {
    pub fn install(document: &Document, config: &AppConfig) -> Self {
        let page = Self {
            records: EditModal::install(document, "record", &config.record_form, config.notice_timeout_ms),
            projects: EditModal::install(document, "project", &config.project_form, config.notice_timeout_ms),
            chart_rendered: chart::render(document, &config.chart),
        };
        log::info!(
            "timesheet frontend ready (record modal: {}, project modal: {}, chart: {})",
            page.records.is_some(),
            page.projects.is_some(),
            page.chart_rendered
        );
        page
    }

    pub fn open_record(&self, args: &RecordArgs) {
        match &self.records {
            Some(edit) => edit.open_with(args),
            None => log::warn!("openEditModal called but the page has no record modal"),
        }
    }

    pub fn open_project(&self, args: &ProjectArgs) {
        match &self.projects {
            Some(edit) => edit.open_with(args),
            None => log::warn!("openProjectModal called but the page has no project modal"),
        }
    }
}

/// Make `page` reachable from the exported JS entry points
pub fn register(page: Page) {
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::new(page)));
}

/// Run `f` against the installed page; logs and skips before boot
pub fn with_page<F: FnOnce(&Page)>(f: F) {
    let page = PAGE.with(|slot| slot.borrow().clone());
    match page {
        Some(page) => f(&page),
        None => log::warn!("timesheet frontend not initialized yet"),
    }
}
