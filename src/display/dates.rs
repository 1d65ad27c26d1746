use chrono::NaiveDate;

/// Renders the calendar date of an ISO timestamp as `DD.MM.YYYY`.
pub fn format_date(raw: &str) -> Option<String> {
    let date_part = raw.trim().split('T').next()?;

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%d.%m.%Y").to_string())
}
