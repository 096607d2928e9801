use chrono::{Datelike, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse "YYYY-MM" into (year, month).
pub fn parse_month(s: &str) -> Option<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&(s.to_string() + "-01"), "%Y-%m-%d").ok()?;
    Some((d.year(), d.month()))
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1).unwrap();

    while d.month() == month {
        out.push(d);
        d = d.succ_opt().unwrap();
    }

    out
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;

    while d <= end {
        out.push(d);
        d = d.succ_opt().unwrap();
    }

    out
}

/// Month preceding (year, month).
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month > 1 { (year, month - 1) } else { (year - 1, 12) }
}

/// Indonesian weekday name, the wire value of routine-holiday sets.
pub fn weekday_name_id(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Reverse of [`weekday_name_id`], case-insensitive.
pub fn weekday_from_name_id(name: &str) -> Option<Weekday> {
    match name.trim().to_lowercase().as_str() {
        "senin" => Some(Weekday::Mon),
        "selasa" => Some(Weekday::Tue),
        "rabu" => Some(Weekday::Wed),
        "kamis" => Some(Weekday::Thu),
        "jumat" => Some(Weekday::Fri),
        "sabtu" => Some(Weekday::Sat),
        "minggu" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
