use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::models::{Enrollment, Record, Table};
use crate::store::RecordStore;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[78][\d\s\-()]{9,}$").expect("phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

/// Body of the public enrollment form on the marketing page.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Creates a `"new"` enrollment from the public form. Required fields and
/// phone/email formats are checked here; nothing reaches the store on
/// rejected input.
pub async fn submit_enrollment(
    store: &dyn RecordStore,
    request: EnrollmentRequest,
) -> Result<Enrollment, AppError> {
    let full_name = normalize_name(&request.full_name);
    let phone = request.phone.trim().to_string();
    let course_id = request
        .course_id
        .ok_or_else(|| AppError::BadRequest("course_id is required".to_string()))?;

    if full_name.is_empty() {
        return Err(AppError::BadRequest("full_name is required".to_string()));
    }
    if phone.is_empty() {
        return Err(AppError::BadRequest("phone is required".to_string()));
    }
    if !PHONE_RE.is_match(&phone) {
        return Err(AppError::BadRequest("invalid phone format".to_string()));
    }

    let email = match request.email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(e) if EMAIL_RE.is_match(e) => Some(e.to_string()),
        Some(_) => return Err(AppError::BadRequest("invalid email format".to_string())),
    };

    let message = match request.message.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(m) => Some(m.to_string()),
    };

    let mut enrollment = Enrollment::empty();
    enrollment.full_name = full_name;
    enrollment.phone = phone;
    enrollment.email = email;
    enrollment.course_id = Some(course_id);
    enrollment.message = message;

    let created = store
        .create(Table::Enrollments, &Record::Enrollment(enrollment))
        .await?;

    match created {
        Record::Enrollment(e) => {
            info!("enrollment {:?} submitted for course {}", e.id, course_id);
            Ok(e)
        }
        other => Err(AppError::Upstream(format!(
            "store returned a non-enrollment record: {:?}",
            other
        ))),
    }
}

/// Trim plus title-casing: every letter that follows a non-letter starts a
/// new word, so hyphenated names come out as "Анна-Мария".
fn normalize_name(name: &str) -> String {
    let mut normalized = String::new();
    let mut word_start = true;
    for ch in name.trim().chars() {
        if ch.is_alphabetic() {
            if word_start {
                normalized.extend(ch.to_uppercase());
            } else {
                normalized.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            normalized.push(ch);
            word_start = true;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;

    fn request() -> EnrollmentRequest {
        EnrollmentRequest {
            full_name: "  петров пётр  ".to_string(),
            phone: "+79001234567".to_string(),
            email: Some("petrov@example.com".to_string()),
            course_id: Some(2),
            message: Some("Хочу на категорию B".to_string()),
        }
    }

    #[tokio::test]
    async fn valid_submission_creates_a_new_enrollment() {
        let store = MemoryRecordStore::new();

        let enrollment = submit_enrollment(&store, request()).await.expect("submit");
        assert_eq!(enrollment.full_name, "Петров Пётр");
        assert_eq!(enrollment.status, "new");
        assert!(enrollment.id.is_some());
        assert!(enrollment.created_at.is_some());
    }

    #[tokio::test]
    async fn hyphenated_names_are_title_cased_per_part() {
        let store = MemoryRecordStore::new();

        let mut req = request();
        req.full_name = "анна-мария кузнецова".to_string();
        let enrollment = submit_enrollment(&store, req).await.expect("submit");
        assert_eq!(enrollment.full_name, "Анна-Мария Кузнецова");
    }

    #[tokio::test]
    async fn bad_phone_is_rejected_before_the_store() {
        let store = MemoryRecordStore::new();

        let mut req = request();
        req.phone = "12345".to_string();
        let result = submit_enrollment(&store, req).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        let rows = store.list(Table::Enrollments).await.expect("list");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn missing_course_is_rejected() {
        let store = MemoryRecordStore::new();

        let mut req = request();
        req.course_id = None;
        let result = submit_enrollment(&store, req).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn empty_email_is_stored_as_absent() {
        let store = MemoryRecordStore::new();

        let mut req = request();
        req.email = Some("".to_string());
        let enrollment = submit_enrollment(&store, req).await.expect("submit");
        assert_eq!(enrollment.email, None);
    }
}
