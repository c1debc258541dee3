//! Publish date normalization
//!
//! Articles dated after the reference day get a new date drawn uniformly
//! from the window ending at that day. Dates on or before the reference are
//! left as they are. Each future-dated file draws independently.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use regex::Regex;
use std::path::Path;
use tracing::debug;

use super::{replace_in_header, write_file, Outcome, TransformReport};
use crate::config::DateSettings;
use crate::document::{load_documents, metadata_span};
use crate::error::{ContentError, Result};

/// Matches the whole `key:` scalar of a header line, quoted or not, when it
/// starts with a calendar date. A time or other suffix is part of the match
/// so a rewrite replaces the entire value.
fn date_field_pattern(key: &str) -> Result<Regex> {
    const DAY: &str = r"(\d{4}-\d{2}-\d{2})";
    Regex::new(&format!(
        r#"(?m)^{key}:[ \t]*(?:'{day}[^'\r\n]*'|"{day}[^"\r\n]*"|{day}[^'"\r\n]*)"#,
        key = regex::escape(key),
        day = DAY
    ))
    .map_err(|e| ContentError::InternalError(format!("date pattern for '{}': {}", key, e)))
}

/// Calendar-date text of the first date field in the header
pub fn find_date(raw: &str, key: &str) -> Result<Option<String>> {
    let pattern = date_field_pattern(key)?;
    let Some(span) = metadata_span(raw) else {
        return Ok(None);
    };
    Ok(pattern
        .captures(&raw[span])
        .and_then(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| m.as_str().to_string()))
}

/// Uniform draw from `[reference - window_days, reference]`
pub fn random_date_in_window<R: Rng>(
    reference: NaiveDate,
    window_days: u32,
    rng: &mut R,
) -> NaiveDate {
    let offset = rng.gen_range(0..=i64::from(window_days));
    reference - Duration::days(offset)
}

/// Text with the first date field set to `date`
pub fn apply_date(raw: &str, key: &str, date: NaiveDate) -> Result<Option<String>> {
    let pattern = date_field_pattern(key)?;
    let replacement = format!("{}: '{}'", key, date.format("%Y-%m-%d"));
    Ok(replace_in_header(raw, &pattern, &replacement))
}

/// Normalize future publish dates of every document in `dir`
pub fn normalize_dates<R: Rng>(
    dir: &Path,
    extensions: &[String],
    key: &str,
    settings: &DateSettings,
    rng: &mut R,
) -> Result<TransformReport> {
    let documents = load_documents(dir, extensions)?;
    let mut report = TransformReport::new("fix-dates");

    for document in &documents {
        let Some(text) = find_date(&document.raw, key)? else {
            debug!(file = %document.file_name, "No date field");
            report.record(&document.file_name, Outcome::Skipped, "no date field");
            continue;
        };

        let current = match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                report.record(
                    &document.file_name,
                    Outcome::Skipped,
                    format!("{} is not a calendar date", text),
                );
                continue;
            }
        };

        if current <= settings.reference {
            report.record(
                &document.file_name,
                Outcome::Unchanged,
                format!("{} (already valid)", text),
            );
            continue;
        }

        let replacement = random_date_in_window(settings.reference, settings.window_days, rng);
        match apply_date(&document.raw, key, replacement)? {
            Some(updated) => {
                write_file(&document.path, &updated)?;
                report.record(
                    &document.file_name,
                    Outcome::Updated,
                    format!("{} -> {}", text, replacement.format("%Y-%m-%d")),
                );
            }
            None => report.record(&document.file_name, Outcome::Skipped, "no date field"),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_find_date_variants() {
        assert_eq!(
            find_date("---\ndate: '2026-03-01'\n---\n", "date").unwrap().as_deref(),
            Some("2026-03-01")
        );
        assert_eq!(
            find_date("---\ndate: \"2026-03-01\"\n---\n", "date").unwrap().as_deref(),
            Some("2026-03-01")
        );
        assert_eq!(
            find_date("---\ndate: 2026-03-01\n---\n", "date").unwrap().as_deref(),
            Some("2026-03-01")
        );
        assert_eq!(find_date("---\ntitle: x\n---\ndate: 2026-03-01", "date").unwrap(), None);
        assert_eq!(find_date("---\nupdatedDate: 2026-03-01\n---\n", "date").unwrap(), None);
    }

    #[test]
    fn test_random_date_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        let earliest = reference() - Duration::days(180);
        for _ in 0..500 {
            let date = random_date_in_window(reference(), 180, &mut rng);
            assert!(date >= earliest && date <= reference());
        }
    }

    #[test]
    fn test_apply_date_rewrites_quoted_format() {
        let raw = "---\ntitle: \"A\"\ndate: 2026-05-02\nid: 1\n---\nbody date: 2026-05-02\n";
        let updated = apply_date(raw, "date", reference()).unwrap().unwrap();
        assert_eq!(
            updated,
            "---\ntitle: \"A\"\ndate: '2026-01-15'\nid: 1\n---\nbody date: 2026-05-02\n"
        );
    }

    #[test]
    fn test_apply_date_replaces_time_suffix() {
        let quoted = "---\ndate: '2026-05-02T10:00:00Z'\ntitle: \"A\"\n---\n";
        assert_eq!(find_date(quoted, "date").unwrap().as_deref(), Some("2026-05-02"));
        let updated = apply_date(quoted, "date", reference()).unwrap().unwrap();
        assert_eq!(updated, "---\ndate: '2026-01-15'\ntitle: \"A\"\n---\n");

        let spaced = "---\ndate: 2026-05-02 10:00\r\nid: 1\r\n---\r\n";
        let updated = apply_date(spaced, "date", reference()).unwrap().unwrap();
        assert_eq!(updated, "---\ndate: '2026-01-15'\r\nid: 1\r\n---\r\n");
        let (metadata, _) = crate::document::try_parse(&updated).unwrap();
        assert_eq!(metadata.get_str("id").as_deref(), Some("1"));
    }

    #[test]
    fn test_normalize_dates_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let future = "---\ntitle: \"F\"\ndate: '2026-02-10'\n---\ncorpo\n";
        let past = "---\ntitle: \"P\"\ndate: '2025-12-01'\n---\ncorpo\n";
        let same_day = "---\ntitle: \"S\"\ndate: '2026-01-15'\n---\ncorpo\n";
        std::fs::write(dir.path().join("future.mdx"), future).unwrap();
        std::fs::write(dir.path().join("past.mdx"), past).unwrap();
        std::fs::write(dir.path().join("same.mdx"), same_day).unwrap();
        std::fs::write(dir.path().join("none.mdx"), "---\ntitle: \"N\"\n---\n").unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let exts = vec!["mdx".to_string()];
        let report =
            normalize_dates(dir.path(), &exts, "date", &DateSettings::default(), &mut rng).unwrap();

        assert_eq!(report.outcome_of("future.mdx"), Some(Outcome::Updated));
        assert_eq!(report.outcome_of("past.mdx"), Some(Outcome::Unchanged));
        assert_eq!(report.outcome_of("same.mdx"), Some(Outcome::Unchanged));
        assert_eq!(report.outcome_of("none.mdx"), Some(Outcome::Skipped));

        assert_eq!(std::fs::read_to_string(dir.path().join("past.mdx")).unwrap(), past);
        let rewritten = std::fs::read_to_string(dir.path().join("future.mdx")).unwrap();
        let new_date = find_date(&rewritten, "date").unwrap().unwrap();
        let parsed = NaiveDate::parse_from_str(&new_date, "%Y-%m-%d").unwrap();
        assert!(parsed <= reference());
        assert!(parsed >= reference() - Duration::days(180));
        assert!(rewritten.ends_with("---\ncorpo\n"));

        let again =
            normalize_dates(dir.path(), &exts, "date", &DateSettings::default(), &mut rng).unwrap();
        assert_eq!(again.count(Outcome::Updated), 0);
    }

    #[test]
    fn test_invalid_calendar_date_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.mdx"), "---\ndate: 2026-13-40\n---\n").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let report = normalize_dates(
            dir.path(),
            &["mdx".to_string()],
            "date",
            &DateSettings::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(report.outcome_of("bad.mdx"), Some(Outcome::Skipped));
    }
}
