use crate::error::CrawlerError;
use lazy_regex::regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Columns the input spreadsheet must carry, in header spelling.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Department",
    "Course Code",
    "Course Title",
    "Faculty Incharge",
    "Except For",
    "Swayam_URL",
    "Prerequisites",
];

/// One converted course row. This is the converter's own schema, independent
/// of the crawler's [`CourseRecord`](crate::course::CourseRecord) output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedCourse {
    pub department: String,
    pub course_code: String,
    pub course_name: String,
    pub description: String,
    pub faculty_incharge: String,
    pub swayam_url: String,
    pub prerequisites: Vec<String>,
}

/// Splits a prerequisites cell on commas, semicolons or the word "and".
pub fn split_prerequisites(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("nan") {
        return Vec::new();
    }
    regex!(r"[,;]\s*| and ")
        .split(raw)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Reads the course spreadsheet and converts every well-formed row.
/// Malformed rows are skipped with a warning; missing required columns abort
/// the whole conversion.
pub fn convert_csv(input: &Path) -> Result<Vec<ConvertedCourse>, CrawlerError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing = Vec::new();
    for column in REQUIRED_COLUMNS {
        match headers.iter().position(|header| header == *column) {
            Some(index) => indices.push(index),
            None => missing.push(*column),
        }
    }
    if !missing.is_empty() {
        return Err(CrawlerError::MissingColumns(missing.join(", ")));
    }

    let field = |row: &csv::StringRecord, nth: usize| -> String {
        row.get(indices[nth]).unwrap_or_default().trim().to_string()
    };

    let mut courses = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping malformed row: {}", e);
                continue;
            }
        };

        let department = field(&row, 0);
        let course_code = field(&row, 1);
        let course_title = field(&row, 2);
        let faculty_incharge = field(&row, 3);
        let except_for = field(&row, 4);
        let swayam_url = field(&row, 5);
        let prerequisites = split_prerequisites(&field(&row, 6));

        courses.push(ConvertedCourse {
            department,
            course_code,
            description: format!("{}. Except For: {}.", course_title, except_for),
            course_name: course_title,
            faculty_incharge,
            swayam_url,
            prerequisites,
        });
    }

    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const HEADER: &str =
        "Department,Course Code,Course Title,Faculty Incharge,Except For,Swayam_URL,Prerequisites";

    #[test]
    fn splits_on_commas_semicolons_and_and() {
        assert_eq!(
            split_prerequisites("CS101 and MATH201"),
            vec!["CS101".to_string(), "MATH201".to_string()]
        );
        assert_eq!(
            split_prerequisites("CS101, MATH201; PHYS101"),
            vec!["CS101".to_string(), "MATH201".to_string(), "PHYS101".to_string()]
        );
        assert_eq!(split_prerequisites("nan"), Vec::<String>::new());
        assert_eq!(split_prerequisites("  "), Vec::<String>::new());
    }

    #[test]
    fn converts_rows_with_composed_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");
        fs::write(
            &path,
            format!(
                "{}\nCSE,CS301,Compilers,Dr. Rao,Final-year students,https://swayam.example/cs301,CS101 and MATH201\n",
                HEADER
            ),
        )
        .unwrap();

        let courses = convert_csv(&path).unwrap();
        assert_eq!(
            courses,
            vec![ConvertedCourse {
                department: "CSE".to_string(),
                course_code: "CS301".to_string(),
                course_name: "Compilers".to_string(),
                description: "Compilers. Except For: Final-year students.".to_string(),
                faculty_incharge: "Dr. Rao".to_string(),
                swayam_url: "https://swayam.example/cs301".to_string(),
                prerequisites: vec!["CS101".to_string(), "MATH201".to_string()],
            }]
        );
    }

    #[test]
    fn reports_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Department,Course Title\nCSE,Compilers\n").unwrap();

        let err = convert_csv(&path).unwrap_err();
        match err {
            CrawlerError::MissingColumns(cols) => {
                assert!(cols.contains("Course Code"));
                assert!(cols.contains("Prerequisites"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(convert_csv(Path::new("does-not-exist.csv")).is_err());
    }
}
