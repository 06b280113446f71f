use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Absent until the record store has persisted the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
    pub price: i64,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Course {
    pub fn empty() -> Self {
        Self {
            id: None,
            title: String::new(),
            category: String::new(),
            description: String::new(),
            duration: String::new(),
            price: 0,
            features: Vec::new(),
        }
    }
}
