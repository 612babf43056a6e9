//! Course repository.

use serde_json::Value;

use super::IdIndex;
use crate::context::ServiceContext;
use crate::ident::LocalId;
use crate::model::Course;
use crate::ports::data_source::Record;

/// Collection holding course records.
pub const COLLECTION: &str = "courses";

/// CRUD over courses, translating backend string IDs to numeric IDs.
pub struct CourseRepository<'a> {
    ctx: &'a ServiceContext,
    index: IdIndex,
}

impl<'a> CourseRepository<'a> {
    /// Creates a repository with an empty ID cache.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx, index: IdIndex::new(COLLECTION) }
    }

    /// Inserts a new course and returns it with its derived ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the stored record is
    /// malformed.
    pub async fn create(
        &mut self,
        name: &str,
        description: &str,
        category: &str,
        teacher: Option<&str>,
    ) -> Result<Course, String> {
        let mut record = Record::new();
        record.insert("name".into(), Value::String(name.to_string()));
        record.insert("description".into(), Value::String(description.to_string()));
        record.insert("category".into(), Value::String(category.to_string()));
        if let Some(teacher) = teacher {
            record.insert("teacher".into(), Value::String(teacher.to_string()));
        }

        let stored = self
            .ctx
            .data
            .create(COLLECTION, record)
            .await
            .map_err(|e| format!("Failed to create course: {e}"))?;
        let local = self.index.observe(&stored)?;
        Course::from_record(local, &stored)
    }

    /// Lists every course.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or any record is malformed.
    pub async fn get_all(&mut self) -> Result<Vec<Course>, String> {
        let records = self
            .ctx
            .data
            .get_all(COLLECTION)
            .await
            .map_err(|e| format!("Failed to list courses: {e}"))?;
        records
            .iter()
            .map(|record| {
                let local = self.index.observe(record)?;
                Course::from_record(local, record)
            })
            .collect()
    }

    /// Fetches one course by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error when no course exists for the ID (after the fallback
    /// scan) or the read fails.
    pub async fn get_by_id(&mut self, id: LocalId) -> Result<Course, String> {
        let remote = self.index.resolve(self.ctx.data.as_ref(), id).await?;
        let record = self
            .ctx
            .data
            .get_by_id(COLLECTION, remote.as_str())
            .await
            .map_err(|e| format!("Failed to fetch course {id}: {e}"))?
            .ok_or_else(|| format!("no courses record found for id {id}"))?;
        let local = self.index.observe(&record)?;
        Course::from_record(local, &record)
    }

    /// Lists courses in the given catalog category.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or any record is malformed.
    pub async fn find_by_category(&mut self, category: &str) -> Result<Vec<Course>, String> {
        let records = self
            .ctx
            .data
            .get_where(COLLECTION, "category", Value::String(category.to_string()))
            .await
            .map_err(|e| format!("Failed to search courses: {e}"))?;
        records
            .iter()
            .map(|record| {
                let local = self.index.observe(record)?;
                Course::from_record(local, record)
            })
            .collect()
    }

    /// Writes the course's current fields back to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error when no record exists for the course's ID or the
    /// update fails.
    pub async fn update(&mut self, course: &Course) -> Result<(), String> {
        let remote = self.index.resolve(self.ctx.data.as_ref(), course.id).await?;
        self.ctx
            .data
            .update(COLLECTION, remote.as_str(), course.to_record())
            .await
            .map_err(|e| format!("Failed to update course {}: {e}", course.id))
    }

    /// Deletes the course and drops its ID mapping.
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
            .map_err(|e| format!("Failed to delete course {id}: {e}"))?;
        self.index.forget(id);
        Ok(())
    }

    /// Recovers the backend's ID for a course; used by repositories that
    /// store course links.
    ///
    /// # Errors
    ///
    /// Returns an error when no course exists for the ID.
    pub async fn remote_id(&mut self, id: LocalId) -> Result<String, String> {
        let remote = self.index.resolve(self.ctx.data.as_ref(), id).await?;
        Ok(remote.as_str().to_string())
    }
}
