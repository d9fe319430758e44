// Loose entry-date heuristic for imported spreadsheets

use crate::utils::leading_integer;

/// Rewrites free-form date text into `YYYY-MM-DDTHH:MM`.
///
/// The text is split on whitespace, `/`, `-` and `:`. With fewer than three
/// parts it is returned unchanged. A first part above 31 means year-first,
/// otherwise day-month-year with two-character years placed in the 2000s.
/// Parts four and five, when present, are hours and minutes.
///
/// No range checks are made: "10/13/2023" yields month "13".
pub fn normalize_entry_date(text: &str) -> String {
    let parts = text
        .split(|ch: char| ch.is_whitespace() || matches!(ch, '/' | '-' | ':'))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>();
    if parts.len() < 3 {
        return text.to_string();
    }

    let year_first = leading_integer(parts[0])
        .map(|value| value > 31)
        .unwrap_or(false);
    let (year, month, day) = if year_first {
        (parts[0].to_string(), pad2(parts[1]), pad2(parts[2]))
    } else {
        let year = if parts[2].chars().count() == 2 {
            format!("20{}", parts[2])
        } else {
            parts[2].to_string()
        };
        (year, pad2(parts[1]), pad2(parts[0]))
    };

    let (hours, minutes) = if parts.len() >= 5 {
        (pad2(parts[3]), pad2(parts[4]))
    } else {
        ("00".to_string(), "00".to_string())
    };

    format!("{}-{}-{}T{}:{}", year, month, day, hours, minutes)
}

fn pad2(part: &str) -> String {
    if part.chars().count() >= 2 {
        part.to_string()
    } else {
        format!("{:0>2}", part)
    }
}
