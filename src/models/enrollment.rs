use serde::{Deserialize, Serialize};

pub const STATUS_NEW: &str = "new";
pub const STATUS_ENROLLED: &str = "enrolled";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Soft reference to a course id. Not checked against the courses table.
    pub course_id: Option<i64>,
    pub message: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    /// Stamped by the record store on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_status() -> String {
    STATUS_NEW.to_string()
}

impl Enrollment {
    pub fn empty() -> Self {
        Self {
            id: None,
            full_name: String::new(),
            phone: String::new(),
            email: None,
            course_id: None,
            message: None,
            status: default_status(),
            created_at: None,
        }
    }
}
