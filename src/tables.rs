use std::io;

use chrono::NaiveDate;

use serde::Serialize;

use smartstring::alias::{String as SmartString};

use super::model::{CountryAggregate, DayReport, Iso3};


/// Region-level view of one day as parallel columns, for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
	pub date: NaiveDate,
	pub region_label: Vec<String>,
	pub lat: Vec<f64>,
	pub lon: Vec<f64>,
	pub confirmed: Vec<u64>,
	pub deaths: Vec<u64>,
	pub recovered: Vec<u64>,
	pub active: Vec<i64>,
	pub death_rate: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
struct RegionTableRow<'x> {
	date: NaiveDate,
	region: &'x str,
	lat: f64,
	lon: f64,
	confirmed: u64,
	deaths: u64,
	recovered: u64,
	active: i64,
	death_rate: f64,
}

impl RegionTable {
	pub fn from_day(day: &DayReport) -> Self {
		let regions = day.regions();
		Self{
			date: day.date(),
			region_label: regions.iter().map(|r| r.region_label.clone()).collect(),
			lat: regions.iter().map(|r| r.coordinates.latitude).collect(),
			lon: regions.iter().map(|r| r.coordinates.longitude).collect(),
			confirmed: regions.iter().map(|r| r.counts.confirmed).collect(),
			deaths: regions.iter().map(|r| r.counts.deaths).collect(),
			recovered: regions.iter().map(|r| r.counts.recovered).collect(),
			active: day.active().to_vec(),
			death_rate: day.death_rate().to_vec(),
		}
	}

	pub fn len(&self) -> usize {
		self.region_label.len()
	}

	pub fn is_empty(&self) -> bool {
		self.region_label.is_empty()
	}

	pub fn write_csv<W: io::Write>(&self, w: W) -> Result<(), csv::Error> {
		let mut w = csv::Writer::from_writer(w);
		for i in 0..self.len() {
			w.serialize(RegionTableRow{
				date: self.date,
				region: &self.region_label[i],
				lat: self.lat[i],
				lon: self.lon[i],
				confirmed: self.confirmed[i],
				deaths: self.deaths[i],
				recovered: self.recovered[i],
				active: self.active[i],
				death_rate: self.death_rate[i],
			})?;
		}
		w.flush()?;
		Ok(())
	}
}


/// Country-level view of one day as parallel columns, for choropleths.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTable {
	pub date: NaiveDate,
	pub iso3: Vec<Iso3>,
	pub country_name: Vec<SmartString>,
	pub confirmed: Vec<u64>,
	pub deaths: Vec<u64>,
	pub recovered: Vec<u64>,
	pub active: Vec<i64>,
	pub death_rate: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
struct CountryTableRow<'x> {
	date: NaiveDate,
	iso3: &'x str,
	country: &'x str,
	confirmed: u64,
	deaths: u64,
	recovered: u64,
	active: i64,
	death_rate: f64,
}

impl CountryTable {
	pub fn from_aggregates(date: NaiveDate, aggregates: &[CountryAggregate]) -> Self {
		Self{
			date,
			iso3: aggregates.iter().map(|a| a.iso3.clone()).collect(),
			country_name: aggregates.iter().map(|a| a.country_name.clone()).collect(),
			confirmed: aggregates.iter().map(|a| a.counts.confirmed).collect(),
			deaths: aggregates.iter().map(|a| a.counts.deaths).collect(),
			recovered: aggregates.iter().map(|a| a.counts.recovered).collect(),
			active: aggregates.iter().map(|a| a.metrics.active).collect(),
			death_rate: aggregates.iter().map(|a| a.metrics.death_rate).collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.iso3.len()
	}

	pub fn is_empty(&self) -> bool {
		self.iso3.is_empty()
	}

	pub fn write_csv<W: io::Write>(&self, w: W) -> Result<(), csv::Error> {
		let mut w = csv::Writer::from_writer(w);
		for i in 0..self.len() {
			w.serialize(CountryTableRow{
				date: self.date,
				iso3: &self.iso3[i],
				country: &self.country_name[i],
				confirmed: self.confirmed[i],
				deaths: self.deaths[i],
				recovered: self.recovered[i],
				active: self.active[i],
				death_rate: self.death_rate[i],
			})?;
		}
		w.flush()?;
		Ok(())
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::aggregate::aggregate_countries;
	use crate::metrics::Counts;
	use crate::model::{Coordinates, RegionRow};

	fn sample_day() -> DayReport {
		let regions = vec![
			RegionRow{
				province_or_state: Some("Hubei".into()),
				country: "China".into(),
				region_label: "Hubei, China".into(),
				counts: Counts::new(100, 4, 50),
				coordinates: Coordinates{latitude: 30.5, longitude: 112.25},
				iso3: Some("CHN".into()),
			},
			RegionRow{
				province_or_state: None,
				country: "Others".into(),
				region_label: "Others".into(),
				counts: Counts::new(0, 0, 0),
				coordinates: Coordinates{latitude: 35.5, longitude: 139.5},
				iso3: None,
			},
		];
		DayReport::new(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), regions, Vec::new())
	}

	#[test]
	fn region_columns_are_parallel() {
		let table = RegionTable::from_day(&sample_day());
		assert_eq!(table.date, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
		assert_eq!(table.len(), 2);
		assert_eq!(table.region_label, vec!["Hubei, China".to_string(), "Others".to_string()]);
		assert_eq!(table.lat, vec![30.5, 35.5]);
		assert_eq!(table.active, vec![46, 0]);
		assert_eq!(table.death_rate, vec![0.04, 0.]);
	}

	#[test]
	fn region_csv() {
		let mut buf = Vec::new();
		RegionTable::from_day(&sample_day()).write_csv(&mut buf).unwrap();
		let text = String::from_utf8(buf).unwrap();
		let mut lines = text.lines();
		assert_eq!(lines.next(), Some("date,region,lat,lon,confirmed,deaths,recovered,active,death_rate"));
		assert_eq!(lines.next(), Some("2020-03-01,\"Hubei, China\",30.5,112.25,100,4,50,46,0.04"));
		assert_eq!(lines.next(), Some("2020-03-01,Others,35.5,139.5,0,0,0,0,0.0"));
		assert_eq!(lines.next(), None);
	}

	#[test]
	fn country_csv() {
		let day = sample_day();
		let table = CountryTable::from_aggregates(day.date(), &aggregate_countries(&day));
		assert_eq!(table.date, day.date());
		assert_eq!(table.len(), 1);
		let mut buf = Vec::new();
		table.write_csv(&mut buf).unwrap();
		let text = String::from_utf8(buf).unwrap();
		assert_eq!(text, "date,iso3,country,confirmed,deaths,recovered,active,death_rate\n2020-03-01,CHN,China,100,4,50,46,0.04\n");
	}
}
