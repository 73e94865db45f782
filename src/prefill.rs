//! Edit-Modal Prefill Controller
//!
//! Gets a record (or project) into its edit form, either by fetching the
//! JSON endpoint or from values the page passes in directly.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::api::{self, Fetch};
use crate::config::{expand_template, FormConfig};
use crate::error::PrefillError;
use crate::fields::{FormSink, ModalHandle};
use crate::models::Prefill;
use crate::sequence::RequestSequence;

/// Result of an open that didn't fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefillOutcome {
    /// Form now holds the fetched values
    Applied,
    /// A newer open superseded this one; response dropped
    Stale,
}

/// Parse the trigger element's `data-id`. Missing attribute is not an error.
pub fn parse_trigger_id(attr: Option<&str>) -> Result<Option<u32>, PrefillError> {
    match attr.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| PrefillError::InvalidId(raw.to_string())),
    }
}

/// One modal/form pair, typed by the entity its endpoint returns
pub struct PrefillController<T, S, M, F> {
    kind: &'static str,
    endpoint: String,
    submit_action: Option<String>,
    form: S,
    modal: M,
    fetcher: F,
    sequence: RequestSequence,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S, M, F> PrefillController<T, S, M, F>
where
    T: Prefill + DeserializeOwned,
    S: FormSink,
    M: ModalHandle,
    F: Fetch,
{
    pub fn new(kind: &'static str, config: &FormConfig, form: S, modal: M, fetcher: F) -> Self {
        Self {
            kind,
            endpoint: config.endpoint.clone(),
            submit_action: config.submit_action.clone(),
            form,
            modal,
            fetcher,
            sequence: RequestSequence::new(),
            _entity: PhantomData,
        }
    }

    /// Fetch-based prefill.
    ///
    /// The sequence token is taken when `open` is called, not when the future
    /// is first polled, so call order decides which response wins.
    pub fn open(&self, id: u32) -> impl Future<Output = Result<PrefillOutcome, PrefillError>> + '_ {
        let token = self.sequence.next();
        let url = expand_template(&self.endpoint, id);
        log::debug!("[{}] prefill {} from {}", self.kind, id, url);

        async move {
            let fetched = api::fetch_json::<T, F>(&self.fetcher, &url).await;

            if !self.sequence.is_current(token) {
                log::debug!("[{}] dropping stale response for {}", self.kind, id);
                return Ok(PrefillOutcome::Stale);
            }

            let entity = fetched?;
            self.apply(&entity);
            Ok(PrefillOutcome::Applied)
        }
    }

    /// Argument-based prefill: write the given values and show the modal.
    /// Any fetch still in flight becomes stale.
    pub fn open_with<P: Prefill>(&self, values: &P) {
        self.sequence.next();
        log::debug!("[{}] prefill {} from arguments", self.kind, values.id());
        self.apply(values);
        self.modal.show();
    }

    /// Supersede any fetch in flight without writing anything. Used when a
    /// trigger turns out to carry no usable id.
    pub fn invalidate(&self) {
        self.sequence.next();
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    fn apply<P: Prefill>(&self, entity: &P) {
        let values = entity.field_values();
        let changed = values
            .iter()
            .filter(|(field, value)| self.form.read(*field).is_some_and(|current| current != *value))
            .count();
        for (field, value) in &values {
            self.form.write(*field, value);
        }
        log::debug!("[{}] wrote {} fields, {} changed", self.kind, values.len(), changed);
        if let Some(template) = &self.submit_action {
            self.form.set_action(&expand_template(template, entity.id()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::fields::Field;
    use crate::models::{Project, Record, RecordArgs};
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    // ========================
    // Fakes
    // ========================

    struct FakeForm {
        values: RefCell<HashMap<Field, String>>,
        action: RefCell<Option<String>>,
    }

    impl FakeForm {
        /// Only the listed fields are bound; all start empty
        fn bound(fields: &[Field]) -> Self {
            Self {
                values: RefCell::new(fields.iter().map(|f| (*f, String::new())).collect()),
                action: RefCell::new(None),
            }
        }

        fn snapshot(&self) -> HashMap<Field, String> {
            self.values.borrow().clone()
        }
    }

    impl FormSink for FakeForm {
        fn read(&self, field: Field) -> Option<String> {
            self.values.borrow().get(&field).cloned()
        }

        fn write(&self, field: Field, value: &str) {
            if let Some(slot) = self.values.borrow_mut().get_mut(&field) {
                *slot = value.to_string();
            }
        }

        fn set_action(&self, action: &str) {
            *self.action.borrow_mut() = Some(action.to_string());
        }
    }

    #[derive(Default)]
    struct FakeModal {
        shown: Cell<u32>,
    }

    impl ModalHandle for FakeModal {
        fn show(&self) {
            self.shown.set(self.shown.get() + 1);
        }
    }

    /// Canned responses keyed by url
    #[derive(Default)]
    struct StaticFetcher {
        responses: HashMap<String, Result<String, PrefillError>>,
    }

    impl StaticFetcher {
        fn with(mut self, url: &str, response: Result<&str, PrefillError>) -> Self {
            self.responses.insert(url.to_string(), response.map(str::to_string));
            self
        }
    }

    impl Fetch for StaticFetcher {
        async fn get_text(&self, url: &str) -> Result<String, PrefillError> {
            self.responses.get(url).cloned().unwrap_or_else(|| {
                Err(PrefillError::Status { url: url.to_string(), status: 404 })
            })
        }
    }

    /// Responses the test resolves by hand, in whatever order it likes
    #[derive(Default)]
    struct ChannelFetcher {
        pending: RefCell<HashMap<String, oneshot::Receiver<Result<String, PrefillError>>>>,
    }

    impl ChannelFetcher {
        fn expect(&self, url: &str) -> oneshot::Sender<Result<String, PrefillError>> {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().insert(url.to_string(), rx);
            tx
        }
    }

    impl Fetch for ChannelFetcher {
        async fn get_text(&self, url: &str) -> Result<String, PrefillError> {
            let rx = self.pending.borrow_mut().remove(url);
            let dropped = || PrefillError::Network { url: url.to_string(), reason: "dropped".to_string() };
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| Err(dropped())),
                None => Err(dropped()),
            }
        }
    }

    const RECORD_FIELDS: [Field; 5] = [Field::Id, Field::Date, Field::Project, Field::Amount, Field::Note];

    fn record_json(id: u32, note: &str) -> String {
        format!(r#"{{"id":{},"date":"2024-02-0{}","project_id":{},"amount":{}.5,"note":"{}"}}"#, id, id, id + 10, id, note)
    }

    fn record_controller<F: Fetch>(fetcher: F) -> PrefillController<Record, FakeForm, FakeModal, F> {
        let config = AppConfig::default();
        PrefillController::new(
            "record",
            &config.record_form,
            FakeForm::bound(&RECORD_FIELDS),
            FakeModal::default(),
            fetcher,
        )
    }

    // ========================
    // Trigger parsing
    // ========================

    #[test]
    fn test_parse_trigger_id() {
        assert_eq!(parse_trigger_id(Some("42")), Ok(Some(42)));
        assert_eq!(parse_trigger_id(Some(" 7 ")), Ok(Some(7)));
        assert_eq!(parse_trigger_id(None), Ok(None));
        assert_eq!(parse_trigger_id(Some("")), Ok(None));
        assert_eq!(parse_trigger_id(Some("abc")), Err(PrefillError::InvalidId("abc".to_string())));
        assert!(parse_trigger_id(Some("-1")).is_err());
    }

    // ========================
    // Fetch-based prefill
    // ========================

    #[test]
    fn test_open_fills_every_field() {
        let fetcher = StaticFetcher::default().with(
            "/entry/42/json",
            Ok(r#"{"id":42,"date":"2024-01-01","project_id":7,"amount":12.5,"note":"lunch"}"#),
        );
        let ctrl = record_controller(fetcher);

        assert_eq!(block_on(ctrl.open(42)), Ok(PrefillOutcome::Applied));

        assert_eq!(ctrl.form.read(Field::Id).as_deref(), Some("42"));
        assert_eq!(ctrl.form.read(Field::Date).as_deref(), Some("2024-01-01"));
        assert_eq!(ctrl.form.read(Field::Project).as_deref(), Some("7"));
        assert_eq!(ctrl.form.read(Field::Amount).as_deref(), Some("12.5"));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some("lunch"));
        assert_eq!(ctrl.form.action.borrow().as_deref(), Some("/edit_record/42"));
        // Bootstrap is already showing the modal when the fetch runs
        assert_eq!(ctrl.modal.shown.get(), 0);
    }

    #[test]
    fn test_failed_fetch_leaves_form_untouched() {
        let fetcher = StaticFetcher::default()
            .with("/entry/1/json", Ok(record_json(1, "first").as_str()))
            .with("/entry/2/json", Err(PrefillError::Status { url: "/entry/2/json".to_string(), status: 500 }));
        let ctrl = record_controller(fetcher);
        block_on(ctrl.open(1)).unwrap();
        let before = ctrl.form.snapshot();

        let result = block_on(ctrl.open(2));

        assert!(matches!(result, Err(PrefillError::Status { status: 500, .. })));
        assert_eq!(ctrl.form.snapshot(), before);
        assert_eq!(ctrl.form.action.borrow().as_deref(), Some("/edit_record/1"));
    }

    #[test]
    fn test_non_json_leaves_form_untouched() {
        let fetcher = StaticFetcher::default()
            .with("/entry/1/json", Ok(record_json(1, "first").as_str()))
            .with("/entry/2/json", Ok("<html>Internal Server Error</html>"))
            .with("/entry/3/json", Ok(r#"{"id":3,"date":"2024-01-01","project_id":1,"amount":2}"#));
        let ctrl = record_controller(fetcher);
        block_on(ctrl.open(1)).unwrap();
        let before = ctrl.form.snapshot();

        assert!(matches!(block_on(ctrl.open(2)), Err(PrefillError::Decode { .. })));
        // Valid JSON with a missing field is rejected before any write
        assert!(matches!(block_on(ctrl.open(3)), Err(PrefillError::Decode { .. })));
        assert_eq!(ctrl.form.snapshot(), before);
    }

    #[test]
    fn test_late_response_for_earlier_open_is_dropped() {
        let fetcher = ChannelFetcher::default();
        let first_tx = fetcher.expect("/entry/1/json");
        let second_tx = fetcher.expect("/entry/2/json");
        let ctrl = record_controller(fetcher);

        let first = ctrl.open(1);
        let second = ctrl.open(2);

        second_tx.send(Ok(record_json(2, "second"))).unwrap();
        assert_eq!(block_on(second), Ok(PrefillOutcome::Applied));

        first_tx.send(Ok(record_json(1, "first"))).unwrap();
        assert_eq!(block_on(first), Ok(PrefillOutcome::Stale));

        assert_eq!(ctrl.form.read(Field::Id).as_deref(), Some("2"));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some("second"));
    }

    #[test]
    fn test_earlier_response_resolving_first_is_still_dropped() {
        let fetcher = ChannelFetcher::default();
        let first_tx = fetcher.expect("/entry/1/json");
        let second_tx = fetcher.expect("/entry/2/json");
        let ctrl = record_controller(fetcher);

        let first = ctrl.open(1);
        let second = ctrl.open(2);

        first_tx.send(Ok(record_json(1, "first"))).unwrap();
        assert_eq!(block_on(first), Ok(PrefillOutcome::Stale));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some(""));

        second_tx.send(Ok(record_json(2, "second"))).unwrap();
        assert_eq!(block_on(second), Ok(PrefillOutcome::Applied));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some("second"));
    }

    #[test]
    fn test_stale_failure_is_not_reported() {
        let fetcher = ChannelFetcher::default();
        let first_tx = fetcher.expect("/entry/1/json");
        let second_tx = fetcher.expect("/entry/2/json");
        let ctrl = record_controller(fetcher);

        let first = ctrl.open(1);
        let second = ctrl.open(2);
        first_tx.send(Ok("garbage".to_string())).unwrap();
        second_tx.send(Ok(record_json(2, "second"))).unwrap();

        assert_eq!(block_on(first), Ok(PrefillOutcome::Stale));
        assert_eq!(block_on(second), Ok(PrefillOutcome::Applied));
    }

    #[test]
    fn test_null_note_prefills_empty_textarea() {
        let fetcher = StaticFetcher::default()
            .with("/entry/1/json", Ok(record_json(1, "first").as_str()))
            .with(
                "/entry/42/json",
                Ok(r#"{"id":42,"date":"2024-01-01","project_id":7,"amount":12.5,"note":null}"#),
            );
        let ctrl = record_controller(fetcher);
        block_on(ctrl.open(1)).unwrap();

        assert_eq!(block_on(ctrl.open(42)), Ok(PrefillOutcome::Applied));
        assert_eq!(ctrl.form.read(Field::Id).as_deref(), Some("42"));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some(""));
    }

    #[test]
    fn test_invalidate_drops_pending_fetch() {
        let fetcher = ChannelFetcher::default();
        let tx = fetcher.expect("/entry/1/json");
        let ctrl = record_controller(fetcher);
        let before = ctrl.form.snapshot();

        let pending = ctrl.open(1);
        // Next trigger had no usable data-id
        ctrl.invalidate();
        tx.send(Ok(record_json(1, "first"))).unwrap();

        assert_eq!(block_on(pending), Ok(PrefillOutcome::Stale));
        assert_eq!(ctrl.form.snapshot(), before);
        assert_eq!(*ctrl.form.action.borrow(), None);
    }

    // ========================
    // Argument-based prefill
    // ========================

    #[test]
    fn test_open_with_writes_and_shows() {
        let ctrl = record_controller(StaticFetcher::default());
        let args = RecordArgs {
            id: 9,
            project_id: 3,
            amount: 4.0,
            note: "montáž".to_string(),
            date: None,
        };

        ctrl.open_with(&args);

        assert_eq!(ctrl.form.read(Field::Id).as_deref(), Some("9"));
        assert_eq!(ctrl.form.read(Field::Project).as_deref(), Some("3"));
        assert_eq!(ctrl.form.read(Field::Amount).as_deref(), Some("4"));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some("montáž"));
        assert_eq!(ctrl.form.read(Field::Date).as_deref(), Some(""));
        assert_eq!(ctrl.modal.shown.get(), 1);
    }

    #[test]
    fn test_open_with_supersedes_pending_fetch() {
        let fetcher = ChannelFetcher::default();
        let tx = fetcher.expect("/entry/1/json");
        let ctrl = record_controller(fetcher);

        let pending = ctrl.open(1);
        ctrl.open_with(&RecordArgs {
            id: 5,
            project_id: 1,
            amount: 1.5,
            note: "ručne".to_string(),
            date: None,
        });
        tx.send(Ok(record_json(1, "first"))).unwrap();

        assert_eq!(block_on(pending), Ok(PrefillOutcome::Stale));
        assert_eq!(ctrl.form.read(Field::Id).as_deref(), Some("5"));
    }

    // ========================
    // Projects
    // ========================

    #[test]
    fn test_project_prefill_without_description() {
        let config = AppConfig::default();
        let fetcher = StaticFetcher::default()
            .with("/project/3/json", Ok(r#"{"id":3,"name":"Strecha","unit_type":"m2"}"#));
        let form = FakeForm::bound(&[Field::Id, Field::Name, Field::UnitType, Field::Description]);
        form.write(Field::Description, "previous project text");
        let ctrl: PrefillController<Project, _, _, _> =
            PrefillController::new("project", &config.project_form, form, FakeModal::default(), fetcher);

        assert_eq!(block_on(ctrl.open(3)), Ok(PrefillOutcome::Applied));

        assert_eq!(ctrl.form.read(Field::Name).as_deref(), Some("Strecha"));
        assert_eq!(ctrl.form.read(Field::UnitType).as_deref(), Some("m2"));
        assert_eq!(ctrl.form.read(Field::Description).as_deref(), Some(""));
        // No submit template configured for projects
        assert_eq!(*ctrl.form.action.borrow(), None);
    }

    #[test]
    fn test_unbound_fields_are_skipped() {
        let config = AppConfig::default();
        let fetcher = StaticFetcher::default().with("/entry/4/json", Ok(record_json(4, "x").as_str()));
        let ctrl: PrefillController<Record, _, _, _> = PrefillController::new(
            "record",
            &config.record_form,
            FakeForm::bound(&[Field::Note]),
            FakeModal::default(),
            fetcher,
        );

        assert_eq!(block_on(ctrl.open(4)), Ok(PrefillOutcome::Applied));
        assert_eq!(ctrl.form.read(Field::Note).as_deref(), Some("x"));
        assert_eq!(ctrl.form.read(Field::Id), None);
    }
}
