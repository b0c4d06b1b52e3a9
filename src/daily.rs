//! Parsing of one daily report file into a [`DayReport`].
//!
//! Rows are positional: `[province_or_state, country, last_update, confirmed,
//! deaths, recovered, (latitude, longitude)?]`. The reporting date is taken
//! from the first row. Rows which fail validation are dropped and recorded as
//! [`RowRejection`]s on the report; only an unreadable file or an unparsable
//! date fails the day as a whole.

use std::io;
use std::path::Path;

use log::{debug, info, warn};

use csv::StringRecord;

use chrono::NaiveDate;

use super::dates::parse_report_date;
use super::error::{DayError, RowError};
use super::ioutil::{field, magic_open};
use super::metrics::Counts;
use super::model::{region_label, Coordinates, DayReport, RegionRow, RowRejection};
use super::reference::ReferenceTables;


const COL_PROVINCE: usize = 0;
const COL_COUNTRY: usize = 1;
const COL_LAST_UPDATE: usize = 2;
const COL_CONFIRMED: usize = 3;
const COL_DEATHS: usize = 4;
const COL_RECOVERED: usize = 5;
const COL_LATITUDE: usize = 6;
const COL_LONGITUDE: usize = 7;
const MIN_FIELDS: usize = 6;


/// Read all data rows, skipping the header.
pub fn read_rows<R: io::Read>(r: R) -> Result<Vec<StringRecord>, csv::Error> {
	let mut r = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.from_reader(r);
	let mut result = Vec::new();
	for row in r.records() {
		result.push(row?);
	}
	Ok(result)
}


fn parse_count(rec: &StringRecord, i: usize, name: &'static str) -> Result<u64, RowError> {
	match field(rec, i) {
		None => Ok(0),
		Some(s) => match s.parse::<u64>() {
			// active cases are signed, so counts must fit an i64
			Ok(v) if v <= i64::MAX as u64 => Ok(v),
			_ => Err(RowError::MalformedCount{
				field: name,
				value: s.to_string(),
			}),
		},
	}
}

fn row_coordinates(rec: &StringRecord) -> Option<Coordinates> {
	let latitude = field(rec, COL_LATITUDE)?.parse::<f64>().ok()?;
	let longitude = field(rec, COL_LONGITUDE)?.parse::<f64>().ok()?;
	Some(Coordinates{latitude, longitude})
}

/// Whether a country name denotes something without a country, like a cruise ship.
pub fn is_unattributed(country: &str) -> bool {
	country == "Others" || country.contains("Cruise")
}


/// Validate and enrich a single data row.
pub fn parse_row(rec: &StringRecord, refs: &ReferenceTables) -> Result<RegionRow, RowError> {
	if rec.len() < MIN_FIELDS {
		return Err(RowError::TooFewFields(rec.len()))
	}
	let province = field(rec, COL_PROVINCE);
	let country = field(rec, COL_COUNTRY).unwrap_or("");
	let label = region_label(province, country);

	let counts = Counts{
		confirmed: parse_count(rec, COL_CONFIRMED, "confirmed")?,
		deaths: parse_count(rec, COL_DEATHS, "deaths")?,
		recovered: parse_count(rec, COL_RECOVERED, "recovered")?,
	};

	let coordinates = match row_coordinates(rec) {
		Some(c) => c,
		None => {
			let looked_up = refs.geo.get(&label).or_else(|| match province {
				Some(_) => refs.geo.get(country),
				None => None,
			});
			match looked_up {
				Some(c) => {
					debug!("coordinates for {} taken from geo table", label);
					c
				},
				None => return Err(RowError::MissingGeolocation),
			}
		},
	};

	let iso3 = if is_unattributed(country) {
		None
	} else {
		match refs.country_codes.get(country) {
			Some(code) => Some(code.clone()),
			None => return Err(RowError::UnknownCountry(country.to_string())),
		}
	};

	if !counts.is_consistent() {
		return Err(RowError::InconsistentCounts{
			confirmed: counts.confirmed,
			recovered: counts.recovered,
			deaths: counts.deaths,
		})
	}

	Ok(RegionRow{
		province_or_state: province.map(Into::into),
		country: country.into(),
		region_label: label,
		counts,
		coordinates,
		iso3,
	})
}


fn report_date(rows: &[StringRecord]) -> Result<NaiveDate, DayError> {
	let first = rows.first().ok_or(DayError::NoRows)?;
	let (date, layout) = parse_report_date(first.get(COL_LAST_UPDATE).unwrap_or(""))?;
	debug!("report date {} parsed with {:?} layout", date, layout);
	Ok(date)
}

fn rejected_region(rec: &StringRecord) -> Option<String> {
	let country = field(rec, COL_COUNTRY)?;
	Some(region_label(field(rec, COL_PROVINCE), country))
}


/// Build a day report from raw rows. `source` names the file in log messages.
pub fn parse_day(source: &str, rows: &[StringRecord], refs: &ReferenceTables) -> Result<DayReport, DayError> {
	let date = report_date(rows)?;
	let mut regions = Vec::with_capacity(rows.len());
	let mut rejected = Vec::new();
	for (i, rec) in rows.iter().enumerate() {
		match parse_row(rec, refs) {
			Ok(region) => regions.push(region),
			Err(reason) => {
				let rejection = RowRejection{
					// header is line 1
					line: i + 2,
					region: rejected_region(rec),
					reason,
				};
				warn!("{} ({}): rejected {}", source, date, rejection);
				rejected.push(rejection);
			},
		}
	}
	info!("{}: {} regions on {}, {} rows rejected", source, regions.len(), date, rejected.len());
	Ok(DayReport::new(date, regions, rejected))
}

pub fn load_day<P: AsRef<Path>>(path: P, refs: &ReferenceTables) -> Result<DayReport, DayError> {
	let path = path.as_ref();
	let rows = read_rows(magic_open(path)?)?;
	parse_day(&path.display().to_string(), &rows, refs)
}
