pub mod course;
pub mod enrollment;
pub mod instructor;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use course::Course;
pub use enrollment::{Enrollment, STATUS_COMPLETED, STATUS_ENROLLED, STATUS_NEW};
pub use instructor::Instructor;

/// Server-side collection name selecting which record kind an API call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Courses,
    Instructors,
    Enrollments,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Courses => "courses",
            Table::Instructors => "instructors",
            Table::Enrollments => "enrollments",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a course, instructor or enrollment table.
///
/// The wire format is the bare row object; the variant is always picked from
/// the table an operation targets, never guessed from the field shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Course(Course),
    Instructor(Instructor),
    Enrollment(Enrollment),
}

impl Record {
    /// Seeds a draft for a record that has not been persisted yet.
    pub fn empty(table: Table) -> Self {
        match table {
            Table::Courses => Record::Course(Course::empty()),
            Table::Instructors => Record::Instructor(Instructor::empty()),
            Table::Enrollments => Record::Enrollment(Enrollment::empty()),
        }
    }

    pub fn from_value(table: Table, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match table {
            Table::Courses => Record::Course(serde_json::from_value(value)?),
            Table::Instructors => Record::Instructor(serde_json::from_value(value)?),
            Table::Enrollments => Record::Enrollment(serde_json::from_value(value)?),
        })
    }

    pub fn table(&self) -> Table {
        match self {
            Record::Course(_) => Table::Courses,
            Record::Instructor(_) => Table::Instructors,
            Record::Enrollment(_) => Table::Enrollments,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Record::Course(c) => c.id,
            Record::Instructor(i) => i.id,
            Record::Enrollment(e) => e.id,
        }
    }

    pub fn set_id(&mut self, id: i64) {
        match self {
            Record::Course(c) => c.id = Some(id),
            Record::Instructor(i) => i.id = Some(id),
            Record::Enrollment(e) => e.id = Some(id),
        }
    }
}
