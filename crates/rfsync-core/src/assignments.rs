// ── Assignment sheet ──
//
// A CSV with the header row `Network Name,RF Profiles,APs`. Cells are kept
// exactly as read; splitting and trimming of the list cells happens during
// validation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{ASSIGNMENT_COLUMNS, AssignmentRow};

/// Load the assignment rows of the sheet at `path`, in file order.
///
/// A missing file is `CoreError::AssignmentsNotFound`, which callers may
/// answer by asking for another path.
pub fn load_assignments(path: &Path) -> Result<Vec<AssignmentRow>, CoreError> {
    if !path.is_file() {
        return Err(CoreError::AssignmentsNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path).map_err(|e| CoreError::io(path, &e))?;
    let rows = read_assignments(file).map_err(|reason| CoreError::InvalidAssignments {
        path: path.display().to_string(),
        reason,
    })?;
    info!(path = %path.display(), rows = rows.len(), "assignment rows loaded");
    Ok(rows)
}

/// Parse assignment rows from any reader. Errors are plain reasons; the
/// caller attaches the source path.
pub fn read_assignments<R: Read>(reader: R) -> Result<Vec<AssignmentRow>, String> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv.headers().map_err(|e| e.to_string())?.clone();
    let mut found: Vec<&str> = headers.iter().collect();
    found.sort_unstable();
    let mut expected = ASSIGNMENT_COLUMNS.to_vec();
    expected.sort_unstable();
    if found != expected {
        return Err(format!(
            "expected columns {}, found {}",
            ASSIGNMENT_COLUMNS.join(", "),
            headers.iter().collect::<Vec<_>>().join(", ")
        ));
    }

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record.map_err(|e| e.to_string())?;
        let line = record.position().map(csv::Position::line);
        let mut row: AssignmentRow = record.deserialize(Some(&headers)).map_err(|e| {
            let at = line.map_or_else(String::new, |l| format!("line {l}: "));
            format!("{at}{e}")
        })?;
        row.line = line;
        debug!(?line, network = %row.network_name, profiles = %row.rf_profiles, "read assignment row");
        rows.push(row);
    }
    Ok(rows)
}
