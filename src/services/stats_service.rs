use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{
    Course, Enrollment, Instructor, Record, STATUS_COMPLETED, STATUS_ENROLLED, Table,
};
use crate::store::RecordStore;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    #[default]
    Overview,
    Courses,
    Recent,
}

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct OverviewStats {
    pub total_enrollments: usize,
    pub total_courses: usize,
    pub total_instructors: usize,
    pub total_revenue: i64,
    pub status_breakdown: Vec<StatusCount>,
}

#[derive(Debug, Serialize)]
pub struct CourseStats {
    pub id: Option<i64>,
    pub title: String,
    pub category: String,
    pub price: i64,
    pub duration: String,
    pub enrollment_count: usize,
    pub active_students: usize,
    pub completed_students: usize,
    pub total_revenue: i64,
}

#[derive(Debug, Serialize)]
pub struct RecentEnrollment {
    pub id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub course_title: Option<String>,
    pub course_category: Option<String>,
    pub course_price: Option<i64>,
    pub status: String,
    pub message: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsReport {
    Overview(OverviewStats),
    Courses(Vec<CourseStats>),
    Recent(Vec<RecentEnrollment>),
}

/// Derives the admin dashboard numbers from plain `list` calls; the record
/// store has no aggregate queries to lean on. Revenue counts a course's price
/// once per enrolled or completed student.
pub struct StatsService {
    store: Arc<dyn RecordStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn report(&self, kind: StatKind, limit: usize) -> Result<StatsReport, AppError> {
        Ok(match kind {
            StatKind::Overview => StatsReport::Overview(self.overview().await?),
            StatKind::Courses => StatsReport::Courses(self.per_course().await?),
            StatKind::Recent => StatsReport::Recent(self.recent(limit).await?),
        })
    }

    pub async fn overview(&self) -> Result<OverviewStats, AppError> {
        let courses = self.courses().await?;
        let instructors = self.instructors().await?;
        let enrollments = self.enrollments().await?;

        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        for enrollment in &enrollments {
            *by_status.entry(enrollment.status.clone()).or_default() += 1;
        }

        let price_by_id: HashMap<i64, i64> = courses
            .iter()
            .filter_map(|course| course.id.map(|id| (id, course.price)))
            .collect();
        let total_revenue = enrollments
            .iter()
            .filter(|e| is_paying(&e.status))
            .filter_map(|e| e.course_id.and_then(|id| price_by_id.get(&id)))
            .sum();

        Ok(OverviewStats {
            total_enrollments: enrollments.len(),
            total_courses: courses.len(),
            total_instructors: instructors.len(),
            total_revenue,
            status_breakdown: by_status
                .into_iter()
                .map(|(status, total)| StatusCount { status, total })
                .collect(),
        })
    }

    /// Per-course enrollment and revenue numbers, busiest course first.
    /// Courses nobody enrolled in still appear, with zeroes.
    pub async fn per_course(&self) -> Result<Vec<CourseStats>, AppError> {
        let courses = self.courses().await?;
        let enrollments = self.enrollments().await?;

        let mut stats: Vec<CourseStats> = courses
            .into_iter()
            .map(|course| {
                let matching: Vec<&Enrollment> = enrollments
                    .iter()
                    .filter(|e| e.course_id.is_some() && e.course_id == course.id)
                    .collect();
                let active = matching
                    .iter()
                    .filter(|e| e.status == STATUS_ENROLLED)
                    .count();
                let completed = matching
                    .iter()
                    .filter(|e| e.status == STATUS_COMPLETED)
                    .count();

                CourseStats {
                    id: course.id,
                    title: course.title,
                    category: course.category,
                    price: course.price,
                    duration: course.duration,
                    enrollment_count: matching.len(),
                    active_students: active,
                    completed_students: completed,
                    total_revenue: course.price * (active + completed) as i64,
                }
            })
            .collect();

        stats.sort_by(|a, b| b.enrollment_count.cmp(&a.enrollment_count));
        Ok(stats)
    }

    /// Latest enrollments with their course joined in, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<RecentEnrollment>, AppError> {
        let courses = self.courses().await?;
        let mut enrollments = self.enrollments().await?;

        let course_by_id: HashMap<i64, &Course> = courses
            .iter()
            .filter_map(|course| course.id.map(|id| (id, course)))
            .collect();

        enrollments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(enrollments
            .into_iter()
            .take(limit)
            .map(|e| {
                let course = e.course_id.and_then(|id| course_by_id.get(&id));
                RecentEnrollment {
                    id: e.id,
                    full_name: e.full_name,
                    phone: e.phone,
                    email: e.email,
                    course_title: course.map(|c| c.title.clone()),
                    course_category: course.map(|c| c.category.clone()),
                    course_price: course.map(|c| c.price),
                    status: e.status,
                    message: e.message,
                    created_at: e.created_at,
                }
            })
            .collect())
    }

    async fn courses(&self) -> Result<Vec<Course>, AppError> {
        let rows = self.store.list(Table::Courses).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                Record::Course(c) => Some(c),
                _ => None,
            })
            .collect())
    }

    async fn instructors(&self) -> Result<Vec<Instructor>, AppError> {
        let rows = self.store.list(Table::Instructors).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                Record::Instructor(i) => Some(i),
                _ => None,
            })
            .collect())
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>, AppError> {
        let rows = self.store.list(Table::Enrollments).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                Record::Enrollment(e) => Some(e),
                _ => None,
            })
            .collect())
    }
}

fn is_paying(status: &str) -> bool {
    status == STATUS_ENROLLED || status == STATUS_COMPLETED
}
