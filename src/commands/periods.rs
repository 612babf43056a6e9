//! Evaluation-period command handlers.

use chrono::{DateTime, NaiveDate, Utc};

use crate::cli::PeriodAction;
use crate::context::ServiceContext;
use crate::ident::LocalId;
use crate::model::EvaluationPeriod;
use crate::repo::PeriodRepository;

/// Runs one period action.
///
/// # Errors
///
/// Returns an error string if date parsing or the repository operation fails.
pub async fn run(ctx: &ServiceContext, action: &PeriodAction) -> Result<(), String> {
    let mut repo = PeriodRepository::new(ctx);
    match action {
        PeriodAction::List { course } => {
            let periods = match course {
                Some(id) => repo.for_course(LocalId::new(*id)).await?,
                None => repo.get_all().await?,
            };
            println!("{}", format_periods(&periods));
        }
        PeriodAction::Create { name, start, end, course } => {
            let start = parse_date_arg(start)?;
            let end = parse_date_arg(end)?;
            let period =
                repo.create(name, start, end, course.map(LocalId::new)).await?;
            println!("Created period {} ({})", period.id, period.name);
        }
        PeriodAction::Update { id, name, start, end } => {
            let mut period = repo.get_by_id(LocalId::new(*id)).await?;
            if let Some(name) = name {
                period.name = name.clone();
            }
            if let Some(start) = start {
                period.start = parse_date_arg(start)?;
            }
            if let Some(end) = end {
                period.end = parse_date_arg(end)?;
            }
            repo.update(&period).await?;
            println!("Updated period {id}");
        }
        PeriodAction::Delete { id } => {
            repo.delete(LocalId::new(*id)).await?;
            println!("Deleted period {id}");
        }
    }
    Ok(())
}

/// Parses a date argument: full RFC 3339, or a bare `YYYY-MM-DD` taken as
/// midnight UTC.
///
/// # Errors
///
/// Returns an error naming the accepted formats.
pub fn parse_date_arg(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| {
            date.and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc()
        })
        .map_err(|_| format!("{raw} is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}

/// Formats a period list as a human-readable report.
#[must_use]
pub fn format_periods(periods: &[EvaluationPeriod]) -> String {
    if periods.is_empty() {
        return "No evaluation periods found.".to_string();
    }
    let mut lines = Vec::new();
    for period in periods {
        let course = match period.course_id {
            Some(id) => format!("  course {id}"),
            None => String::new(),
        };
        lines.push(format!(
            "  {}  {}  {} to {}{course}",
            period.id,
            period.name,
            period.start.format("%Y-%m-%d"),
            period.end.format("%Y-%m-%d"),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_date_arg_accepts_rfc3339() {
        let parsed = parse_date_arg("2026-03-01T10:30:00+00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn parse_date_arg_accepts_bare_date_as_midnight_utc() {
        let parsed = parse_date_arg("2026-03-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_date_arg_rejects_garbage() {
        let err = parse_date_arg("next tuesday").unwrap_err();
        assert!(err.contains("RFC 3339"));
    }

    #[test]
    fn format_periods_empty() {
        assert_eq!(format_periods(&[]), "No evaluation periods found.");
    }

    #[test]
    fn format_periods_shows_window_and_course() {
        let period = EvaluationPeriod {
            id: LocalId::new(3),
            name: "Midterm".into(),
            start: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap(),
            course_id: Some(LocalId::new(42)),
        };
        let output = format_periods(&[period]);
        assert!(output.contains("Midterm"));
        assert!(output.contains("2026-03-01 to 2026-03-15"));
        assert!(output.contains("course 42"));
    }

    #[tokio::test]
    async fn create_update_delete_via_handlers() {
        let ctx = ServiceContext::memory();
        let create = PeriodAction::Create {
            name: "Midterm".into(),
            start: "2026-03-01".into(),
            end: "2026-03-15".into(),
            course: None,
        };
        run(&ctx, &create).await.unwrap();

        // Fresh repositories inside each call resolve through the scan path.
        let id = {
            let mut repo = PeriodRepository::new(&ctx);
            repo.get_all().await.unwrap()[0].id
        };
        let update = PeriodAction::Update {
            id: id.get(),
            name: Some("Final".into()),
            start: None,
            end: None,
        };
        run(&ctx, &update).await.unwrap();
        run(&ctx, &PeriodAction::Delete { id: id.get() }).await.unwrap();

        let err = run(&ctx, &PeriodAction::Delete { id: id.get() }).await.unwrap_err();
        assert!(err.contains("no evaluation_periods record found"));
    }

    #[tokio::test]
    async fn create_with_bad_date_fails() {
        let ctx = ServiceContext::memory();
        let create = PeriodAction::Create {
            name: "Midterm".into(),
            start: "soon".into(),
            end: "2026-03-15".into(),
            course: None,
        };
        let err = run(&ctx, &create).await.unwrap_err();
        assert!(err.contains("RFC 3339"));
    }
}
