//! Keyword gap analysis
//!
//! Compares a keyword-cluster export against what the site already covers.
//! Coverage comes from article file names plus a configured topic list; a
//! keyword containing any covered topic is considered handled.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::KeywordSettings;
use crate::document::has_extension;
use crate::error::{ContentError, Result};

/// One row of the keyword export
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordRow {
    #[serde(rename = "Keyword", default)]
    pub keyword: String,
    #[serde(rename = "Volume", default, deserialize_with = "csv::invalid_option")]
    pub volume: Option<u64>,
    #[serde(
        rename = "Keyword Difficulty",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub difficulty: Option<u32>,
    #[serde(rename = "Intent", default)]
    pub intent: String,
}

/// An uncovered keyword worth writing about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOpportunity {
    pub keyword: String,
    pub volume: u64,
    pub difficulty: u32,
    pub intent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordReport {
    /// Opportunities found before the display limit
    pub total: usize,
    /// Best opportunities, highest volume first
    pub opportunities: Vec<KeywordOpportunity>,
}

/// Topic an article covers, from its file name.
///
/// `101-melhores-geladeiras.mdx` covers `melhores geladeiras`.
pub fn topic_from_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let digits = stem.chars().take_while(|c| c.is_ascii_digit()).count();
    let stem = match stem[digits..].strip_prefix('-') {
        Some(rest) if digits > 0 => rest,
        _ => stem,
    };
    stem.replace('-', " ").to_lowercase()
}

/// Topics covered by the articles in `dir` and by `manual`
pub fn covered_topics(dir: &Path, extensions: &[String], manual: &[String]) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ContentError::DirectoryNotFound(format!("{}: {}", dir.display(), e)))?;

    let mut topics: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .map(|name| topic_from_file_name(&name))
        .chain(manual.iter().map(|t| t.to_lowercase()))
        .filter(|t| !t.trim().is_empty())
        .collect();
    topics.sort();
    topics.dedup();

    debug!(topics = topics.len(), "Covered topics collected");
    Ok(topics)
}

/// Parse a keyword export with a header row
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<KeywordRow>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in csv.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Uncovered, reachable keywords sorted by volume (desc) then difficulty (asc)
pub fn find_opportunities(
    rows: impl IntoIterator<Item = KeywordRow>,
    topics: &[String],
    settings: &KeywordSettings,
) -> Vec<KeywordOpportunity> {
    let mut found: Vec<KeywordOpportunity> = rows
        .into_iter()
        .filter_map(|row| {
            let keyword = row.keyword.trim().to_lowercase();
            let volume = row.volume.unwrap_or(0);
            // a missing difficulty counts as unreachable
            let difficulty = row.difficulty.unwrap_or(100);

            if keyword.is_empty()
                || volume < settings.min_volume
                || difficulty >= settings.max_difficulty
            {
                return None;
            }
            if settings.covered_keywords.iter().any(|k| k.to_lowercase() == keyword)
                || topics.iter().any(|t| keyword.contains(t.as_str()))
            {
                return None;
            }

            Some(KeywordOpportunity {
                keyword,
                volume,
                difficulty,
                intent: row.intent.trim().to_string(),
            })
        })
        .collect();

    found.sort_by_key(|o| (Reverse(o.volume), o.difficulty));
    found
}

/// Run the gap analysis for the export at `csv_path`
pub fn analyze_keywords(
    csv_path: &Path,
    content_dir: &Path,
    extensions: &[String],
    settings: &KeywordSettings,
) -> Result<KeywordReport> {
    let topics = covered_topics(content_dir, extensions, &settings.covered_topics)?;
    let file = std::fs::File::open(csv_path).map_err(|e| ContentError::io_at(csv_path, e))?;
    let rows = read_rows(file)?;

    let mut opportunities = find_opportunities(rows, &topics, settings);
    let total = opportunities.len();
    opportunities.truncate(settings.limit);

    info!(total, shown = opportunities.len(), "Keyword opportunities found");
    Ok(KeywordReport {
        total,
        opportunities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Keyword,Volume,Keyword Difficulty,Intent,CPC
geladeira 12v barata,900,35,Commercial,1.2
Geladeira Para Caminhão,5000,40,Commercial,2.0
painel solar para geladeira,700,20,Informational,0.5
geladeira para van,900,20,Commercial,1.0
frigobar 24v,40,10,Commercial,0.3
geladeira dometic,3000,75,Navigational,1.5
caixa térmica elétrica,1200,,Commercial,0.9
cooler elétrico 12v,1200,45,Commercial,0.9
";

    fn settings() -> KeywordSettings {
        KeywordSettings {
            covered_topics: vec!["Painel Solar".to_string()],
            ..KeywordSettings::default()
        }
    }

    #[test]
    fn test_topic_from_file_name() {
        assert_eq!(topic_from_file_name("101-melhores-geladeiras.mdx"), "melhores geladeiras");
        assert_eq!(topic_from_file_name("302-12v-24v-ou-quadrivolt.mdx"), "12v 24v ou quadrivolt");
        assert_eq!(topic_from_file_name("guia-rapido.mdx"), "guia rapido");
    }

    #[test]
    fn test_filter_and_sort_order() {
        let rows = read_rows(EXPORT.as_bytes()).unwrap();
        let topics = vec!["painel solar".to_string()];
        let found = find_opportunities(rows, &topics, &settings());

        let keywords: Vec<&str> = found.iter().map(|o| o.keyword.as_str()).collect();
        // volume desc, then difficulty asc for the 900 tie
        assert_eq!(
            keywords,
            vec!["cooler elétrico 12v", "geladeira para van", "geladeira 12v barata"]
        );
        assert_eq!(found[1].difficulty, 20);
        assert_eq!(found[0].intent, "Commercial");
    }

    #[test]
    fn test_thresholds_are_inclusive_and_exclusive() {
        let export = "Keyword,Volume,Keyword Difficulty\nexato,50,59\nlimite,50,60\n";
        let rows = read_rows(export.as_bytes()).unwrap();
        let found = find_opportunities(rows, &[], &settings());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].keyword, "exato");
    }

    #[test]
    fn test_covered_topics_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("401-guia-caixa-cozinha.mdx"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let topics =
            covered_topics(dir.path(), &["mdx".to_string()], &["Elber".to_string()]).unwrap();
        assert_eq!(topics, vec!["elber".to_string(), "guia caixa cozinha".to_string()]);
    }

    #[test]
    fn test_analyze_applies_limit() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("clusters.csv");
        std::fs::write(&csv_path, EXPORT).unwrap();
        std::fs::write(dir.path().join("205-geladeira-para-van.mdx"), "").unwrap();

        let settings = KeywordSettings {
            limit: 1,
            ..settings()
        };
        let report =
            analyze_keywords(&csv_path, dir.path(), &["mdx".to_string()], &settings).unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.opportunities[0].keyword, "cooler elétrico 12v");
    }

    #[test]
    fn test_missing_export_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = analyze_keywords(
            &dir.path().join("absent.csv"),
            dir.path(),
            &["mdx".to_string()],
            &KeywordSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::FileError(_)));
    }
}
