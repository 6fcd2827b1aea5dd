//! `YYYY-MM` date formatting for experience entries.

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Literal shown instead of the end date of a current position.
pub const PRESENT: &str = "Present";

/// Format `YYYY-MM` as `Mon YYYY`.
///
/// Anything that does not parse is returned unchanged, so a malformed date
/// is still shown to the reader rather than failing the render.
pub fn format_month_year(raw: &str) -> String {
    parse_year_month(raw.trim())
        .map(|(year, month)| format!("{} {year}", MONTHS[month - 1]))
        .unwrap_or_else(|| raw.to_string())
}

fn parse_year_month(value: &str) -> Option<(&str, usize)> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: usize = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Date range for an experience entry, e.g. `Jun 2021 - Present`.
///
/// Blank ends are dropped; when both ends are blank the range is empty.
pub fn date_range(start: &str, end: &str, is_current: bool) -> String {
    let start = format_month_year(start.trim());
    let end = if is_current {
        PRESENT.to_string()
    } else {
        format_month_year(end.trim())
    };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}
