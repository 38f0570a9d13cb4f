use regex::Regex;

use crate::model::ColumnRoles;

const REGISTER_KEYWORDS: &[&str] = &["reg", "register", "roll"];
const NAME_KEYWORDS: &[&str] = &["name", "candidate", "student"];

/// How many leading rows the positional fallback may inspect.
const FALLBACK_ROW_SCAN: usize = 3;

/// Treats one row as a candidate header row and scans for column roles.
///
/// The two scans are independent: a row may yield both roles, one, or
/// neither. The first matching cell per role wins; later matches never
/// overwrite an assignment.
pub(crate) fn detect_roles(row: &[String]) -> ColumnRoles {
    let lowered = row
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect::<Vec<_>>();

    let position_of = |keywords: &[&str]| {
        lowered
            .iter()
            .position(|cell| keywords.iter().any(|keyword| cell.contains(keyword)))
    };

    ColumnRoles {
        register: position_of(REGISTER_KEYWORDS),
        name: position_of(NAME_KEYWORDS),
    }
}

/// Resolves the column roles for a whole table: the first row the detector
/// fully resolves wins; otherwise fall back to the known fixed layouts.
/// An unresolved result means the table contributes zero records.
pub(crate) fn resolve_table_roles(rows: &[Vec<String>]) -> ColumnRoles {
    for row in rows {
        let roles = detect_roles(row);
        if roles.is_resolved() {
            return roles;
        }
    }
    positional_fallback(rows)
}

/// Headerless tables from the known sources still follow two fixed layouts:
/// register/name in columns 1/2, or 4/5 on wide signature sheets. Applied
/// only to tables at least five columns wide, probing the first few rows for
/// a register-number-shaped cell.
fn positional_fallback(rows: &[Vec<String>]) -> ColumnRoles {
    if rows.first().is_none_or(|first| first.len() < 5) {
        return ColumnRoles::default();
    }

    let register_shape_re =
        Regex::new(r"[A-Z]{3,}\d+").expect("hardcoded register shape regex is valid");

    for row in rows.iter().take(FALLBACK_ROW_SCAN) {
        let cells = row.iter().map(|cell| cell.trim()).collect::<Vec<_>>();
        if cells.len() > 2 && register_shape_re.is_match(cells[1]) {
            return ColumnRoles {
                register: Some(1),
                name: Some(2),
            };
        }
        if cells.len() > 5 && register_shape_re.is_match(cells[4]) {
            return ColumnRoles {
                register: Some(4),
                name: Some(5),
            };
        }
    }

    ColumnRoles::default()
}
