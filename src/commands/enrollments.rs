//! Enrollment command handlers.

use crate::context::ServiceContext;
use crate::ident::LocalId;
use crate::model::Enrollment;
use crate::repo::EnrollmentRepository;

/// Enrolls a student in a course.
///
/// # Errors
///
/// Returns an error when the course is unknown, the student is already
/// enrolled, or the insert fails.
pub async fn enroll(ctx: &ServiceContext, course_id: u32, student: &str) -> Result<(), String> {
    let mut repo = EnrollmentRepository::new(ctx);
    let enrollment = repo.enroll(LocalId::new(course_id), student).await?;
    println!("Enrolled {student} in course {} (enrollment {})", course_id, enrollment.id);
    Ok(())
}

/// Removes a student's enrollment.
///
/// # Errors
///
/// Returns an error when the student is not enrolled or the delete fails.
pub async fn unenroll(ctx: &ServiceContext, course_id: u32, student: &str) -> Result<(), String> {
    let mut repo = EnrollmentRepository::new(ctx);
    repo.unenroll(LocalId::new(course_id), student).await?;
    println!("Unenrolled {student} from course {course_id}");
    Ok(())
}

/// Lists enrollments, optionally for one course.
///
/// # Errors
///
/// Returns an error if the read fails.
pub async fn list(ctx: &ServiceContext, course: Option<u32>) -> Result<(), String> {
    let mut repo = EnrollmentRepository::new(ctx);
    let enrollments = match course {
        Some(id) => repo.for_course(LocalId::new(id)).await?,
        None => repo.get_all().await?,
    };
    println!("{}", format_enrollments(&enrollments));
    Ok(())
}

/// Formats an enrollment list as a human-readable report.
#[must_use]
pub fn format_enrollments(enrollments: &[Enrollment]) -> String {
    if enrollments.is_empty() {
        return "No enrollments found.".to_string();
    }
    let mut lines = Vec::new();
    for enrollment in enrollments {
        lines.push(format!(
            "  {}  course {}  {}",
            enrollment.id, enrollment.course_id, enrollment.student_email
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::CourseRepository;

    #[test]
    fn format_enrollments_empty() {
        assert_eq!(format_enrollments(&[]), "No enrollments found.");
    }

    #[test]
    fn format_enrollments_lists_student_and_course() {
        let enrollment = Enrollment {
            id: LocalId::new(5),
            course_id: LocalId::new(42),
            student_email: "ana@campus.edu".into(),
        };
        let output = format_enrollments(&[enrollment]);
        assert!(output.contains("course 42"));
        assert!(output.contains("ana@campus.edu"));
    }

    #[tokio::test]
    async fn enroll_list_unenroll_via_handlers() {
        let ctx = ServiceContext::memory();
        let course_id = {
            let mut courses = CourseRepository::new(&ctx);
            courses.create("Rust", "Systems programming", "systems", None).await.unwrap().id
        };

        enroll(&ctx, course_id.get(), "ana@campus.edu").await.unwrap();
        list(&ctx, Some(course_id.get())).await.unwrap();
        unenroll(&ctx, course_id.get(), "ana@campus.edu").await.unwrap();

        let err = unenroll(&ctx, course_id.get(), "ana@campus.edu").await.unwrap_err();
        assert!(err.contains("not enrolled"));
    }
}
