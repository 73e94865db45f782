//! Live form bound to DOM elements.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config::FormConfig;
use crate::fields::{BindingSpec, Field, FieldKind, FormSink};

enum BoundElement {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    Textarea(HtmlTextAreaElement),
}

impl BoundElement {
    fn value(&self) -> String {
        match self {
            BoundElement::Input(el) => el.value(),
            BoundElement::Select(el) => el.value(),
            BoundElement::Textarea(el) => el.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            BoundElement::Input(el) => el.set_value(value),
            BoundElement::Select(el) => el.set_value(value),
            BoundElement::Textarea(el) => el.set_value(value),
        }
    }
}

/// Binding table resolved once at page load
pub struct DomForm {
    form: Option<HtmlFormElement>,
    fields: HashMap<Field, BoundElement>,
}

impl DomForm {
    pub fn bind(document: &Document, config: &FormConfig) -> Self {
        let form = document
            .get_element_by_id(&config.form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        if form.is_none() {
            log::debug!("no <form id={:?}>, submit action stays as rendered", config.form_id);
        }

        let fields = config
            .bindings
            .iter()
            .filter_map(|spec| resolve(document, spec).map(|el| (spec.field, el)))
            .collect::<HashMap<_, _>>();
        log::debug!("bound {}/{} fields for #{}", fields.len(), config.bindings.len(), config.modal_id);

        Self { form, fields }
    }
}

/// Look up the element and make sure it is the kind the binding declares.
/// A `<input name="note">` where a textarea is expected is rejected here
/// instead of half-working later.
fn resolve(document: &Document, spec: &BindingSpec) -> Option<BoundElement> {
    let Some(el) = document.get_element_by_id(&spec.element) else {
        log::debug!("no #{} on this page, {} not bound", spec.element, spec.field.as_str());
        return None;
    };

    let tag = el.tag_name();
    if !spec.kind.matches_tag(&tag) {
        log::warn!(
            "#{} is <{}> but {} is bound as <{}>; field will not be prefilled",
            spec.element,
            tag.to_lowercase(),
            spec.field.as_str(),
            spec.kind.tag_name()
        );
        return None;
    }

    Some(match spec.kind {
        FieldKind::Input => BoundElement::Input(el.unchecked_into()),
        FieldKind::Select => BoundElement::Select(el.unchecked_into()),
        FieldKind::Textarea => BoundElement::Textarea(el.unchecked_into()),
    })
}

impl FormSink for DomForm {
    fn read(&self, field: Field) -> Option<String> {
        self.fields.get(&field).map(BoundElement::value)
    }

    fn write(&self, field: Field, value: &str) {
        if let Some(el) = self.fields.get(&field) {
            el.set_value(value);
        }
    }

    fn set_action(&self, action: &str) {
        if let Some(form) = &self.form {
            form.set_action(action);
        }
    }
}
