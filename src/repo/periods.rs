//! Evaluation-period repository.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{courses, IdIndex};
use crate::context::ServiceContext;
use crate::ident::LocalId;
use crate::model::period::record_with_course;
use crate::model::EvaluationPeriod;

/// Collection holding evaluation-period records.
pub const COLLECTION: &str = "evaluation_periods";

/// Evaluation-period CRUD over the data source.
pub struct PeriodRepository<'a> {
    ctx: &'a ServiceContext,
    index: IdIndex,
    course_index: IdIndex,
}

impl<'a> PeriodRepository<'a> {
    /// Creates a repository with empty ID caches.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            index: IdIndex::new(COLLECTION),
            course_index: IdIndex::new(courses::COLLECTION),
        }
    }

    /// Inserts a new period, optionally linked to a course.
    ///
    /// # Errors
    ///
    /// Returns an error when the window is empty or inverted, the linked
    /// course does not exist, or the insert fails.
    pub async fn create(
        &mut self,
        name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        course_id: Option<LocalId>,
    ) -> Result<EvaluationPeriod, String> {
        if end <= start {
            return Err(format!("period {name} ends at or before it starts"));
        }

        let course_remote = match course_id {
            Some(id) => Some(self.course_index.resolve(self.ctx.data.as_ref(), id).await?),
            None => None,
        };

        let record =
            record_with_course(name, start, end, course_remote.as_ref().map(|r| r.as_str()));
        let stored = self
            .ctx
            .data
            .create(COLLECTION, record)
            .await
            .map_err(|e| format!("Failed to create period {name}: {e}"))?;
        let local = self.index.observe(&stored)?;
        EvaluationPeriod::from_record(local, &stored)
    }

    /// Lists every period.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or any record is malformed.
    pub async fn get_all(&mut self) -> Result<Vec<EvaluationPeriod>, String> {
        let records = self
            .ctx
            .data
            .get_all(COLLECTION)
            .await
            .map_err(|e| format!("Failed to list periods: {e}"))?;
        records
            .iter()
            .map(|record| {
                let local = self.index.observe(record)?;
                EvaluationPeriod::from_record(local, record)
            })
            .collect()
    }

    /// Lists the periods linked to one course.
    ///
    /// # Errors
    ///
    /// Returns an error when the course does not exist or the read fails.
    pub async fn for_course(
        &mut self,
        course_id: LocalId,
    ) -> Result<Vec<EvaluationPeriod>, String> {
        let course_remote = self.course_index.resolve(self.ctx.data.as_ref(), course_id).await?;
        let records = self
            .ctx
            .data
            .get_where(COLLECTION, "course_id", Value::String(course_remote.as_str().to_string()))
            .await
            .map_err(|e| format!("Failed to list periods for course {course_id}: {e}"))?;
        records
            .iter()
            .map(|record| {
                let local = self.index.observe(record)?;
                EvaluationPeriod::from_record(local, record)
            })
            .collect()
    }

    /// Fetches one period by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error when no period exists for the ID (after the fallback
    /// scan) or the read fails.
    pub async fn get_by_id(&mut self, id: LocalId) -> Result<EvaluationPeriod, String> {
        let remote = self.index.resolve(self.ctx.data.as_ref(), id).await?;
        let record = self
            .ctx
            .data
            .get_by_id(COLLECTION, remote.as_str())
            .await
            .map_err(|e| format!("Failed to fetch period {id}: {e}"))?
            .ok_or_else(|| format!("no {COLLECTION} record found for id {id}"))?;
        let local = self.index.observe(&record)?;
        EvaluationPeriod::from_record(local, &record)
    }

    /// Writes the period's name and window back to the backend.
    ///
    /// The course link is immutable; re-create the period to move it.
    ///
    /// # Errors
    ///
    /// Returns an error when the window is invalid, no record exists for the
    /// ID, or the update fails.
    pub async fn update(&mut self, period: &EvaluationPeriod) -> Result<(), String> {
        if period.end <= period.start {
            return Err(format!("period {} ends at or before it starts", period.name));
        }
        let remote = self.index.resolve(self.ctx.data.as_ref(), period.id).await?;
        self.ctx
            .data
            .update(COLLECTION, remote.as_str(), period.to_record())
            .await
            .map_err(|e| format!("Failed to update period {}: {e}", period.id))
    }

    /// Deletes the period and drops its ID mapping.
    ///
    /// # Errors
    ///
    /// Returns an error when no record exists for the ID or the delete fails.
    pub async fn delete(&mut self, id: LocalId) -> Result<(), String> {
        let remote = self.index.resolve(self.ctx.data.as_ref(), id).await?;
        self.ctx
            .data
            .delete(COLLECTION, remote.as_str())
            .await
            .map_err(|e| format!("Failed to delete period {id}: {e}"))?;
        self.index.forget(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::CourseRepository;
    use chrono::TimeZone;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 15, 23, 59, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn create_list_fetch_round_trip() {
        let ctx = ServiceContext::memory();
        let mut repo = PeriodRepository::new(&ctx);
        let (start, end) = window();

        let created = repo.create("Midterm", start, end, None).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap(), vec![created.clone()]);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_rejects_inverted_window() {
        let ctx = ServiceContext::memory();
        let mut repo = PeriodRepository::new(&ctx);
        let (start, end) = window();

        let err = repo.create("Backwards", end, start, None).await.unwrap_err();
        assert!(err.contains("ends at or before"));
    }

    #[tokio::test]
    async fn course_link_survives_storage() {
        let ctx = ServiceContext::memory();
        let course_id = {
            let mut courses = CourseRepository::new(&ctx);
            courses.create("Rust", "Systems programming", "systems", None).await.unwrap().id
        };

        let mut repo = PeriodRepository::new(&ctx);
        let (start, end) = window();
        let created = repo.create("Midterm", start, end, Some(course_id)).await.unwrap();
        assert_eq!(created.course_id, Some(course_id));

        let linked = repo.for_course(course_id).await.unwrap();
        assert_eq!(linked, vec![created]);
    }

    #[tokio::test]
    async fn update_changes_window() {
        let ctx = ServiceContext::memory();
        let mut repo = PeriodRepository::new(&ctx);
        let (start, end) = window();
        let mut period = repo.create("Midterm", start, end, None).await.unwrap();

        period.name = "Midterm (extended)".into();
        period.end = Utc.with_ymd_and_hms(2026, 3, 20, 23, 59, 0).unwrap();
        repo.update(&period).await.unwrap();

        let fetched = repo.get_by_id(period.id).await.unwrap();
        assert_eq!(fetched.name, "Midterm (extended)");
        assert_eq!(fetched.end, period.end);
    }

    #[tokio::test]
    async fn delete_then_fetch_reports_not_found() {
        let ctx = ServiceContext::memory();
        let mut repo = PeriodRepository::new(&ctx);
        let (start, end) = window();
        let period = repo.create("Midterm", start, end, None).await.unwrap();

        repo.delete(period.id).await.unwrap();
        let err = repo.get_by_id(period.id).await.unwrap_err();
        assert!(err.contains("no evaluation_periods record found"));
    }

    #[tokio::test]
    async fn fresh_repository_resolves_via_scan() {
        let ctx = ServiceContext::memory();
        let (start, end) = window();
        let created = {
            let mut repo = PeriodRepository::new(&ctx);
            repo.create("Midterm", start, end, None).await.unwrap()
        };

        let mut repo = PeriodRepository::new(&ctx);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
    }
}
