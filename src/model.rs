use std::fmt;

use chrono::NaiveDate;

use smartstring::alias::{String as SmartString};

use super::error::RowError;
use super::metrics::{Counts, Metrics};


pub type Iso3 = SmartString;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
	pub latitude: f64,
	pub longitude: f64,
}


/// Build the display label of a region: `"{province}, {country}"` or the bare country.
pub fn region_label(province_or_state: Option<&str>, country: &str) -> String {
	match province_or_state {
		Some(p) => format!("{}, {}", p, country),
		None => country.to_string(),
	}
}


/// One region's counts on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
	pub province_or_state: Option<SmartString>,
	pub country: SmartString,
	pub region_label: String,
	pub counts: Counts,
	pub coordinates: Coordinates,
	/// `None` for entities without a country, like cruise ships.
	pub iso3: Option<Iso3>,
}


/// A rejected row of a day file.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
	/// 1-based line in the source file, the header being line 1.
	pub line: usize,
	pub region: Option<String>,
	pub reason: RowError,
}

impl fmt::Display for RowRejection {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self.region.as_ref() {
			Some(region) => write!(f, "line {} ({}): {}", self.line, region, self.reason),
			None => write!(f, "line {}: {}", self.line, self.reason),
		}
	}
}


/// One file's worth of data. The derived metrics are computed once, on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
	date: NaiveDate,
	regions: Vec<RegionRow>,
	active: Vec<i64>,
	death_rate: Vec<f64>,
	rejected: Vec<RowRejection>,
}

impl DayReport {
	pub fn new(date: NaiveDate, regions: Vec<RegionRow>, rejected: Vec<RowRejection>) -> Self {
		let mut active = Vec::with_capacity(regions.len());
		let mut death_rate = Vec::with_capacity(regions.len());
		for region in regions.iter() {
			let m = region.counts.metrics();
			active.push(m.active);
			death_rate.push(m.death_rate);
		}
		Self{
			date,
			regions,
			active,
			death_rate,
			rejected,
		}
	}

	#[inline(always)]
	pub fn date(&self) -> NaiveDate {
		self.date
	}

	#[inline(always)]
	pub fn regions(&self) -> &[RegionRow] {
		&self.regions[..]
	}

	#[inline(always)]
	pub fn active(&self) -> &[i64] {
		&self.active[..]
	}

	#[inline(always)]
	pub fn death_rate(&self) -> &[f64] {
		&self.death_rate[..]
	}

	pub fn rejected(&self) -> &[RowRejection] {
		&self.rejected[..]
	}

	pub fn len(&self) -> usize {
		self.regions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}

	pub fn max_confirmed(&self) -> Option<u64> {
		self.regions.iter().map(|r| r.counts.confirmed).max()
	}
}


/// One country's summed counts for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryAggregate {
	pub iso3: Iso3,
	/// Country name of the first contributing row.
	pub country_name: SmartString,
	pub counts: Counts,
	pub metrics: Metrics,
}
