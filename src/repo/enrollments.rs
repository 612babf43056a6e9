//! Enrollment repository.

use serde_json::Value;

use super::{courses, IdIndex};
use crate::context::ServiceContext;
use crate::ident::{LocalId, RemoteId};
use crate::model::Enrollment;

/// Collection holding enrollment records.
pub const COLLECTION: &str = "enrollments";

/// Enrollment CRUD over the data source.
///
/// Stored records reference courses by the backend's string ID, so the
/// repository keeps a second ID index over the courses collection to
/// translate the numeric course IDs callers pass in.
pub struct EnrollmentRepository<'a> {
    ctx: &'a ServiceContext,
    index: IdIndex,
    course_index: IdIndex,
}

impl<'a> EnrollmentRepository<'a> {
    /// Creates a repository with empty ID caches.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            index: IdIndex::new(COLLECTION),
            course_index: IdIndex::new(courses::COLLECTION),
        }
    }

    /// Enrolls a student in a course and returns the new enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error when the course does not exist, the student is
    /// already enrolled, or the insert fails.
    pub async fn enroll(
        &mut self,
        course_id: LocalId,
        student_email: &str,
    ) -> Result<Enrollment, String> {
        let course_remote = self.course_index.resolve(self.ctx.data.as_ref(), course_id).await?;

        let existing = self.for_course(course_id).await?;
        if existing.iter().any(|e| e.student_email == student_email) {
            return Err(format!("{student_email} is already enrolled in course {course_id}"));
        }

        let record = Enrollment::record_for(&course_remote, student_email);
        let stored = self
            .ctx
            .data
            .create(COLLECTION, record)
            .await
            .map_err(|e| format!("Failed to enroll {student_email}: {e}"))?;
        let local = self.index.observe(&stored)?;
        Enrollment::from_record(local, &stored)
    }

    /// Lists every enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or any record is malformed.
    pub async fn get_all(&mut self) -> Result<Vec<Enrollment>, String> {
        let records = self
            .ctx
            .data
            .get_all(COLLECTION)
            .await
            .map_err(|e| format!("Failed to list enrollments: {e}"))?;
        records
            .iter()
            .map(|record| {
                let local = self.index.observe(record)?;
                Enrollment::from_record(local, record)
            })
            .collect()
    }

    /// Lists the enrollments for one course.
    ///
    /// # Errors
    ///
    /// Returns an error when the course does not exist or the read fails.
    pub async fn for_course(&mut self, course_id: LocalId) -> Result<Vec<Enrollment>, String> {
        let course_remote = self.course_index.resolve(self.ctx.data.as_ref(), course_id).await?;
        let records = self
            .ctx
            .data
            .get_where(
                COLLECTION,
                "course_id",
                Value::String(course_remote.as_str().to_string()),
            )
            .await
            .map_err(|e| format!("Failed to list enrollments for course {course_id}: {e}"))?;
        records
            .iter()
            .map(|record| {
                let local = self.index.observe(record)?;
                Enrollment::from_record(local, record)
            })
            .collect()
    }

    /// Removes a student's enrollment in a course.
    ///
    /// # Errors
    ///
    /// Returns an error when the student is not enrolled or the delete fails.
    pub async fn unenroll(
        &mut self,
        course_id: LocalId,
        student_email: &str,
    ) -> Result<(), String> {
        let enrollment = self
            .for_course(course_id)
            .await?
            .into_iter()
            .find(|e| e.student_email == student_email)
            .ok_or_else(|| {
                format!("{student_email} is not enrolled in course {course_id}")
            })?;

        let remote = self.index.resolve(self.ctx.data.as_ref(), enrollment.id).await?;
        self.ctx
            .data
            .delete(COLLECTION, remote.as_str())
            .await
            .map_err(|e| format!("Failed to unenroll {student_email}: {e}"))?;
        self.index.forget(enrollment.id);
        Ok(())
    }

    /// Recovers the backend's ID for an enrollment; exposed for symmetry with
    /// the other repositories.
    ///
    /// # Errors
    ///
    /// Returns an error when no enrollment exists for the ID.
    pub async fn remote_id(&mut self, id: LocalId) -> Result<RemoteId, String> {
        self.index.resolve(self.ctx.data.as_ref(), id).await
    }
}
