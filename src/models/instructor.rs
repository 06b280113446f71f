use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub specialization: String,
    /// Years of experience. Kept as plain integer, range is not enforced here.
    pub experience: i64,
    /// 0.0 to 5.0 by convention, not enforced.
    pub rating: f64,
    pub bio: String,
}

impl Instructor {
    pub fn empty() -> Self {
        Self {
            id: None,
            name: String::new(),
            specialization: String::new(),
            experience: 0,
            rating: 0.0,
            bio: String::new(),
        }
    }
}
