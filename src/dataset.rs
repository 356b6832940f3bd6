use crate::course::CourseRecord;
use crate::error::CrawlerError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes the full record list as a JSON array, replacing any prior content.
pub fn save_records(path: &Path, records: &[CourseRecord]) -> Result<(), CrawlerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn load_records(path: &Path) -> Result<Vec<CourseRecord>, CrawlerError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Case-insensitive exact-title match.
pub fn find_by_title<'a>(records: &'a [CourseRecord], title: &str) -> Option<&'a CourseRecord> {
    let wanted = title.to_lowercase();
    records
        .iter()
        .find(|record| record.title.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<CourseRecord> {
        vec![
            CourseRecord {
                title: "Intro To Algorithms".to_string(),
                prerequisites: "CS101, MATH201".to_string(),
                source: "https://example.edu/courses/algo".to_string(),
            },
            CourseRecord {
                title: "Discrete Mathematics".to_string(),
                prerequisites: "basic programming maturity".to_string(),
                source: "https://example.edu/courses/discrete-math".to_string(),
            },
        ]
    }

    #[test]
    fn round_trips_through_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("prereqs.json");

        let records = sample();
        save_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn field_names_are_stable() {
        let json = serde_json::to_string(&sample()[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Intro To Algorithms");
        assert_eq!(value["prerequisites"], "CS101, MATH201");
        assert_eq!(value["source"], "https://example.edu/courses/algo");
    }

    #[test]
    fn lookup_ignores_title_case() {
        let records = sample();
        let found = find_by_title(&records, "intro to algorithms").unwrap();
        assert_eq!(found.prerequisites, "CS101, MATH201");
        assert!(find_by_title(&records, "intro to proofs").is_none());
    }
}
