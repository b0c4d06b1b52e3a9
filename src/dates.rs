use chrono::{NaiveDate, NaiveDateTime};

use super::error::DayError;


/// Timestamp layouts seen in the daily reports, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
	/// `2020-03-16T23:45:00`
	Iso8601,
	/// `1/22/20 17:00`
	ShortYear,
	/// `01/22/2020 17:00`
	LongYear,
}

pub static DATE_LAYOUTS: [DateLayout; 3] = [
	DateLayout::Iso8601,
	DateLayout::ShortYear,
	DateLayout::LongYear,
];


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAttempt {
	Matched(NaiveDate),
	TryNext,
}


fn pad_month(s: &str) -> String {
	match s.as_bytes().get(2) {
		Some(b'/') | None => s.to_string(),
		Some(_) => format!("0{}", s),
	}
}

impl DateLayout {
	pub fn format(&self) -> &'static str {
		match self {
			Self::Iso8601 => "%Y-%m-%dT%H:%M:%S",
			Self::ShortYear => "%m/%d/%y %H:%M",
			Self::LongYear => "%m/%d/%Y %H:%M",
		}
	}

	pub fn attempt(&self, s: &str) -> DateAttempt {
		let parsed = match self {
			Self::Iso8601 => NaiveDateTime::parse_from_str(s, self.format()),
			Self::ShortYear | Self::LongYear => NaiveDateTime::parse_from_str(&pad_month(s), self.format()),
		};
		match parsed {
			// time of day is irrelevant for a daily report
			Ok(dt) => DateAttempt::Matched(dt.date()),
			Err(_) => DateAttempt::TryNext,
		}
	}
}


/// Parse a report timestamp by trying each of [`DATE_LAYOUTS`] in order.
pub fn parse_report_date(s: &str) -> Result<(NaiveDate, DateLayout), DayError> {
	let s = s.trim();
	for layout in DATE_LAYOUTS.iter() {
		match layout.attempt(s) {
			DateAttempt::Matched(date) => return Ok((date, *layout)),
			DateAttempt::TryNext => continue,
		}
	}
	Err(DayError::UnparsableDate(s.to_string()))
}


#[cfg(test)]
mod tests {
	use super::*;

	fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn iso_timestamp() {
		let (date, layout) = parse_report_date("2020-03-16T23:45:00").unwrap();
		assert_eq!(date, ymd(2020, 3, 16));
		assert_eq!(layout, DateLayout::Iso8601);
	}

	#[test]
	fn short_year_with_single_digit_month() {
		let (date, layout) = parse_report_date("1/22/20 17:00").unwrap();
		assert_eq!(date, ymd(2020, 1, 22));
		assert_eq!(layout, DateLayout::ShortYear);
	}

	#[test]
	fn long_year() {
		let (date, layout) = parse_report_date("01/22/2020 17:00").unwrap();
		assert_eq!(date, ymd(2020, 1, 22));
		assert_eq!(layout, DateLayout::LongYear);
	}

	#[test]
	fn surrounding_whitespace_is_ignored() {
		let (date, _) = parse_report_date(" 2020-02-01T10:00:00 ").unwrap();
		assert_eq!(date, ymd(2020, 2, 1));
	}

	#[test]
	fn exhausted_layouts() {
		match parse_report_date("yesterday") {
			Err(DayError::UnparsableDate(s)) => assert_eq!(s, "yesterday"),
			other => panic!("unexpected result: {:?}", other),
		}
		assert!(parse_report_date("").is_err());
	}

	#[test]
	fn iso_attempt_rejects_slashed_layout() {
		assert_eq!(DateLayout::Iso8601.attempt("1/22/20 17:00"), DateAttempt::TryNext);
		assert_eq!(DateLayout::ShortYear.attempt("01/22/2020 17:00"), DateAttempt::TryNext);
	}

	#[test]
	fn month_padding() {
		assert_eq!(pad_month("1/22/20 17:00"), "01/22/20 17:00");
		assert_eq!(pad_month("12/1/20 17:00"), "12/1/20 17:00");
	}
}
