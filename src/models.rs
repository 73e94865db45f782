//! Frontend Models
//!
//! Data structures matching the server's JSON endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::Field;

/// Logged entry (matches `/entry/{id}/json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub date: NaiveDate,
    pub project_id: u32,
    pub amount: f64,
    /// Nullable in the database; `null` and a missing key both read as ""
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project (matches `/project/{id}/json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub unit_type: UnitType,
    #[serde(default)]
    pub description: Option<String>,
}

/// Unit a project's amounts are measured in
///
/// Labels the server doesn't know about yet are kept verbatim so the
/// form shows exactly what was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitType {
    Hours,
    SquareMeters,
    Other(String),
}

impl UnitType {
    pub fn as_str(&self) -> &str {
        match self {
            UnitType::Hours => "hodiny",
            UnitType::SquareMeters => "m2",
            UnitType::Other(label) => label,
        }
    }
}

impl From<String> for UnitType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "hodiny" => UnitType::Hours,
            "m2" => UnitType::SquareMeters,
            _ => UnitType::Other(label),
        }
    }
}

impl From<UnitType> for String {
    fn from(unit: UnitType) -> Self {
        unit.as_str().to_string()
    }
}

/// Values passed straight from the page to `openEditModal`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordArgs {
    pub id: u32,
    pub project_id: u32,
    pub amount: f64,
    pub note: String,
    pub date: Option<NaiveDate>,
}

/// Values passed straight from the page to `openProjectModal`
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectArgs {
    pub id: u32,
    pub name: String,
    pub unit_type: UnitType,
    pub description: Option<String>,
}

// ========================
// Form values
// ========================

/// Anything that can be written into an edit form
pub trait Prefill {
    /// Identifier used for the submit action
    fn id(&self) -> u32;

    /// Field values in form order. Fields not listed are left untouched.
    fn field_values(&self) -> Vec<(Field, String)>;
}

impl Prefill for Record {
    fn id(&self) -> u32 {
        self.id
    }

    fn field_values(&self) -> Vec<(Field, String)> {
        vec![
            (Field::Id, self.id.to_string()),
            (Field::Date, self.date.format("%Y-%m-%d").to_string()),
            (Field::Project, self.project_id.to_string()),
            (Field::Amount, self.amount.to_string()),
            (Field::Note, self.note.clone()),
        ]
    }
}

impl Prefill for RecordArgs {
    fn id(&self) -> u32 {
        self.id
    }

    fn field_values(&self) -> Vec<(Field, String)> {
        let mut values = vec![(Field::Id, self.id.to_string())];
        if let Some(date) = self.date {
            values.push((Field::Date, date.format("%Y-%m-%d").to_string()));
        }
        values.push((Field::Project, self.project_id.to_string()));
        values.push((Field::Amount, self.amount.to_string()));
        values.push((Field::Note, self.note.clone()));
        values
    }
}

impl Prefill for Project {
    fn id(&self) -> u32 {
        self.id
    }

    fn field_values(&self) -> Vec<(Field, String)> {
        vec![
            (Field::Id, self.id.to_string()),
            (Field::Name, self.name.clone()),
            (Field::UnitType, self.unit_type.as_str().to_string()),
            (Field::Description, self.description.clone().unwrap_or_default()),
        ]
    }
}

impl Prefill for ProjectArgs {
    fn id(&self) -> u32 {
        self.id
    }

    fn field_values(&self) -> Vec<(Field, String)> {
        vec![
            (Field::Id, self.id.to_string()),
            (Field::Name, self.name.clone()),
            (Field::UnitType, self.unit_type.as_str().to_string()),
            (Field::Description, self.description.clone().unwrap_or_default()),
        ]
    }
}
