//! Form Field Bindings
//!
//! Logical field names, the element kind each one is bound to, and the
//! `FormSink` seam the prefill controller writes through.

use serde::{Deserialize, Serialize};

/// Logical form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Date,
    Project,
    Amount,
    Note,
    Name,
    UnitType,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Date => "date",
            Field::Project => "project",
            Field::Amount => "amount",
            Field::Note => "note",
            Field::Name => "name",
            Field::UnitType => "unit_type",
            Field::Description => "description",
        }
    }
}

/// Element kind a field is expected to be rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    Select,
    Textarea,
}

impl FieldKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
        }
    }

    /// Compare against `Element::tag_name()`, which is upper-case for HTML
    pub fn matches_tag(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(self.tag_name())
    }
}

/// One row of the binding table: field -> element id + expected kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub field: Field,
    pub element: String,
    pub kind: FieldKind,
}

impl BindingSpec {
    pub fn new(field: Field, element: &str, kind: FieldKind) -> Self {
        Self { field, element: element.to_string(), kind }
    }
}

/// Default bindings for the record edit form
pub fn record_bindings() -> Vec<BindingSpec> {
    vec![
        BindingSpec::new(Field::Id, "edit-id", FieldKind::Input),
        BindingSpec::new(Field::Date, "edit-date", FieldKind::Input),
        BindingSpec::new(Field::Project, "edit-project", FieldKind::Select),
        BindingSpec::new(Field::Amount, "edit-amount", FieldKind::Input),
        BindingSpec::new(Field::Note, "edit-note", FieldKind::Textarea),
    ]
}

/// Default bindings for the project edit form
pub fn project_bindings() -> Vec<BindingSpec> {
    vec![
        BindingSpec::new(Field::Id, "edit-project-id", FieldKind::Input),
        BindingSpec::new(Field::Name, "edit-project-name", FieldKind::Input),
        BindingSpec::new(Field::UnitType, "edit-project-unit", FieldKind::Select),
        BindingSpec::new(Field::Description, "edit-project-description", FieldKind::Textarea),
    ]
}

/// Where prefill values end up. Implemented over live DOM elements in
/// `dom::form` and over plain maps in tests.
pub trait FormSink {
    /// Current value, `None` if the field isn't bound
    fn read(&self, field: Field) -> Option<String>;

    /// Set a value. Unbound fields are ignored.
    fn write(&self, field: Field, value: &str);

    /// Set the form's submission target
    fn set_action(&self, action: &str);
}

/// Modal dialog wrapping a form
pub trait ModalHandle {
    fn show(&self);
}
