mod extract;

pub use extract::{course_codes, Extract, HeuristicExtractor};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A course extracted from a single page.
///
/// `prerequisites` is either a comma-joined list of course codes or, when no
/// code was recognized, the raw extracted sentence. The field names are the
/// wire format of the output file and must stay stable for the lookup CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub title: String,
    pub prerequisites: String,
    pub source: String,
}

impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title         : {}", self.title)?;
        writeln!(f, "Prerequisites : {}", self.prerequisites)?;
        writeln!(f, "Source        : {}", self.source)?;
        Ok(())
    }
}
