//! Course command handlers.

use std::fmt::Write as _;

use crate::cli::CourseAction;
use crate::context::ServiceContext;
use crate::ident::LocalId;
use crate::model::Course;
use crate::repo::CourseRepository;

/// Runs one course action.
///
/// # Errors
///
/// Returns an error string if the repository operation fails.
pub async fn run(ctx: &ServiceContext, action: &CourseAction) -> Result<(), String> {
    let mut repo = CourseRepository::new(ctx);
    match action {
        CourseAction::List { category } => {
            let courses = match category {
                Some(category) => repo.find_by_category(category).await?,
                None => repo.get_all().await?,
            };
            println!("{}", format_courses(&courses));
        }
        CourseAction::Create { name, description, category, teacher } => {
            let course =
                repo.create(name, description, category, teacher.as_deref()).await?;
            println!("Created course {} ({})", course.id, course.name);
        }
        CourseAction::Show { id } => {
            let course = repo.get_by_id(LocalId::new(*id)).await?;
            println!("{}", format_course(&course));
        }
        CourseAction::Delete { id } => {
            repo.delete(LocalId::new(*id)).await?;
            println!("Deleted course {id}");
        }
    }
    Ok(())
}

/// Formats a course list as a human-readable report.
#[must_use]
pub fn format_courses(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }
    let mut lines = Vec::new();
    for course in courses {
        lines.push(format!("  {}  {} [{}]", course.id, course.name, course.category));
    }
    lines.join("\n")
}

/// Formats one course with all its fields.
#[must_use]
pub fn format_course(course: &Course) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Course {}: {}", course.id, course.name);
    let _ = writeln!(out, "  category:    {}", course.category);
    let _ = write!(out, "  description: {}", course.description);
    if let Some(teacher) = &course.teacher {
        let _ = write!(out, "\n  teacher:     {teacher}");
    }
    out
}
