use serde_json::Value;
use tracing::warn;

use crate::models::{Record, Table};

/// Transient copy of a record being created or modified before persistence.
///
/// Field editors are selected by matching the record variant; the only
/// transforms applied are the numeric coercions (zero fallback on parse
/// failure) and the comma-split of the course features list. Everything else
/// is taken verbatim; validation belongs to the record store.
pub struct EditSession {
    record: Record,
}

impl EditSession {
    /// Seeds an empty draft shaped for the table, with no id.
    pub fn for_create(table: Table) -> Self {
        Self {
            record: Record::empty(table),
        }
    }

    /// Seeds a copy of an existing record; its id selects update on save.
    pub fn for_edit(record: Record) -> Self {
        Self { record }
    }

    pub fn table(&self) -> Table {
        self.record.table()
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn apply(&mut self, fields: &serde_json::Map<String, Value>) {
        for (key, value) in fields {
            self.update_field(key, value);
        }
    }

    /// Merges one field by name into the held record. Unknown keys are
    /// dropped with a warning; the id is never writable through here.
    pub fn update_field(&mut self, key: &str, value: &Value) {
        match &mut self.record {
            Record::Course(course) => match key {
                "title" => course.title = text(value),
                "category" => course.category = text(value),
                "description" => course.description = text(value),
                "duration" => course.duration = text(value),
                "price" => course.price = integer(value),
                "features" => course.features = features(value),
                other => warn!("ignoring unknown course field: {}", other),
            },
            Record::Instructor(instructor) => match key {
                "name" => instructor.name = text(value),
                "specialization" => instructor.specialization = text(value),
                "experience" => instructor.experience = integer(value),
                "rating" => instructor.rating = float(value),
                "bio" => instructor.bio = text(value),
                other => warn!("ignoring unknown instructor field: {}", other),
            },
            Record::Enrollment(enrollment) => match key {
                "full_name" => enrollment.full_name = text(value),
                "phone" => enrollment.phone = text(value),
                "email" => enrollment.email = optional_text(value),
                "course_id" => enrollment.course_id = optional_integer(value),
                "message" => enrollment.message = optional_text(value),
                "status" => enrollment.status = text(value),
                other => warn!("ignoring unknown enrollment field: {}", other),
            },
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn optional_text(value: &Value) -> Option<String> {
    let s = text(value);
    if s.is_empty() { None } else { Some(s) }
}

fn integer(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0)
}

fn optional_integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn float(value: &Value) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0.0)
}

/// Comma-split with per-item trim; an already-split array passes through.
fn features(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(text).collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => s.split(',').map(|item| item.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}
