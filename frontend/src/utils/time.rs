use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn today() -> NaiveDate {
    now_local().date()
}

/// Earliest start date offered by the leave form.
pub fn tomorrow() -> NaiveDate {
    today() + Duration::days(1)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%b %-d, %Y %H:%M").to_string()
}

pub fn format_optional_datetime(value: Option<NaiveDateTime>) -> String {
    value.map(format_datetime).unwrap_or_else(|| "-".into())
}

/// Value for an `<input type="date">`.
pub fn input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        "Just now".into()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if hours < 48 {
        "Yesterday".into()
    } else {
        format!("{}d ago", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = at(2024, 3, 10, 12);
        assert_eq!(relative_time(at(2024, 3, 10, 12), now), "Just now");
        assert_eq!(relative_time(at(2024, 3, 10, 9), now), "3h ago");
        assert_eq!(relative_time(at(2024, 3, 9, 6), now), "Yesterday");
        assert_eq!(relative_time(at(2024, 3, 5, 12), now), "5d ago");
    }

    #[test]
    fn date_formatting_and_parsing() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(format_date(date), "Mar 4, 2024");
        assert_eq!(input_value(Some(date)), "2024-03-04");
        assert_eq!(input_value(None), "");
        assert_eq!(parse_input_date("2024-03-04"), Some(date));
        assert_eq!(parse_input_date(""), None);
        assert_eq!(format_optional_datetime(None), "-");
    }

    #[test]
    fn tomorrow_follows_today() {
        assert_eq!(tomorrow() - today(), Duration::days(1));
    }
}
