use std::collections::HashMap;
use std::io;
use std::path::Path;

use log::{info, warn};

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use csv::StringRecord;

use smartstring::alias::{String as SmartString};

use super::error::ReferenceError;
use super::ioutil::{field, magic_open};
use super::model::{region_label, Coordinates, Iso3};


/// Deserialize the first `width` fields of every data row into `T`.
///
/// Header names are not checked; rows which fail to deserialize are logged and skipped.
/// Only I/O errors abort the read.
fn for_each_record<R: io::Read, T: DeserializeOwned, F: FnMut(usize, T)>(
	r: R,
	table: &str,
	width: usize,
	mut f: F,
) -> Result<(), csv::Error> {
	let mut r = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.trim(csv::Trim::All)
		.from_reader(r);
	for (i, row) in r.records().enumerate() {
		let line = i + 2;
		let rec: StringRecord = match row {
			Ok(rec) => rec.iter().take(width).collect(),
			Err(e) if e.is_io_error() => return Err(e),
			Err(e) => {
				warn!("{} line {}: {}", table, line, e);
				continue
			},
		};
		match rec.deserialize::<T>(None) {
			Ok(v) => f(line, v),
			Err(e) => warn!("{} line {}: {}", table, line, e),
		}
	}
	Ok(())
}


/// Region label to coordinates, exact match.
#[derive(Debug, Clone, Default)]
pub struct GeoLookup {
	entries: HashMap<String, Coordinates>,
}

impl GeoLookup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert<S: Into<String>>(&mut self, label: S, coordinates: Coordinates) {
		self.entries.insert(label.into(), coordinates);
	}

	pub fn get(&self, label: &str) -> Option<Coordinates> {
		self.entries.get(label).copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Rows are `[province_or_state, country, latitude, longitude]`.
	pub fn from_reader<R: io::Read>(r: R) -> Result<Self, csv::Error> {
		let mut result = Self::new();
		for_each_record(r, "geo table", 4, |line, rec: GeoRecord| {
			if rec.country.is_empty() {
				warn!("geo table line {}: no country", line);
				return
			}
			result.insert(
				region_label(rec.province_or_state.as_deref(), &rec.country),
				Coordinates{latitude: rec.latitude, longitude: rec.longitude},
			);
		})?;
		Ok(result)
	}
}


/// Lowercased country name to ISO-3 code.
#[derive(Debug, Clone, Default)]
pub struct CountryCodeLookup {
	entries: HashMap<String, Iso3>,
}

impl CountryCodeLookup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert<S: Into<Iso3>>(&mut self, country: &str, iso3: S) {
		self.entries.insert(country.trim().to_lowercase(), iso3.into());
	}

	/// Case-insensitive lookup.
	pub fn get(&self, country: &str) -> Option<&Iso3> {
		self.entries.get(&country.trim().to_lowercase())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Rows are `[country_name, _, _, iso3]`.
	pub fn from_reader<R: io::Read>(r: R) -> Result<Self, csv::Error> {
		let mut result = Self::new();
		for_each_record(r, "country code table", 4, |line, rec: CountryCodeRecord| {
			if rec.name.is_empty() || rec.iso3.is_empty() {
				warn!("country code table line {}: missing name or code", line);
				return
			}
			result.insert(&rec.name, rec.iso3);
		})?;
		Ok(result)
	}
}


#[derive(Debug, Clone, Deserialize)]
pub struct CountryCodeRecord {
	pub name: SmartString,
	pub alpha2: IgnoredAny,
	pub numeric: IgnoredAny,
	pub iso3: Iso3,
}


pub fn load_geo<P: AsRef<Path>>(path: P) -> Result<GeoLookup, ReferenceError> {
	let path = path.as_ref();
	let r = magic_open(path).map_err(|source| ReferenceError::MissingReferenceFile{
		path: path.to_path_buf(),
		source,
	})?;
	let table = GeoLookup::from_reader(r).map_err(|source| ReferenceError::Csv{
		path: path.to_path_buf(),
		source,
	})?;
	info!("loaded {} geo locations from {}", table.len(), path.display());
	Ok(table)
}

pub fn load_country_codes<P: AsRef<Path>>(path: P) -> Result<CountryCodeLookup, ReferenceError> {
	let path = path.as_ref();
	let r = magic_open(path).map_err(|source| ReferenceError::MissingReferenceFile{
		path: path.to_path_buf(),
		source,
	})?;
	let table = CountryCodeLookup::from_reader(r).map_err(|source| ReferenceError::Csv{
		path: path.to_path_buf(),
		source,
	})?;
	info!("loaded {} country codes from {}", table.len(), path.display());
	Ok(table)
}


/// Both lookup tables. Built once, then only ever borrowed.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
	pub geo: GeoLookup,
	pub country_codes: CountryCodeLookup,
}

impl ReferenceTables {
	pub fn new(geo: GeoLookup, country_codes: CountryCodeLookup) -> Self {
		Self{geo, country_codes}
	}

	pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(geo_path: P, country_codes_path: Q) -> Result<Self, ReferenceError> {
		Ok(Self{
			geo: load_geo(geo_path)?,
			country_codes: load_country_codes(country_codes_path)?,
		})
	}
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoRecord {
	#[serde(rename = "PROVINCE/STATE")]
	pub province_or_state: Option<SmartString>,
	#[serde(rename = "COUNTRY/REGION")]
	pub country: SmartString,
	#[serde(rename = "LATITUDE")]
	pub latitude: f64,
	#[serde(rename = "LONGITUDE")]
	pub longitude: f64,
}

/// Harvest a geo table from the raw rows of a day file which carries coordinates.
///
/// Rows without usable coordinates are skipped. Returns the number of rows written.
pub fn write_geo_table<W: io::Write>(rows: &[StringRecord], w: W) -> Result<usize, csv::Error> {
	let mut w = csv::Writer::from_writer(w);
	let mut n = 0;
	for (i, rec) in rows.iter().enumerate() {
		let country = match field(rec, 1) {
			Some(c) => c,
			None => continue,
		};
		let (latitude, longitude) = match (field(rec, 6).map(str::parse::<f64>), field(rec, 7).map(str::parse::<f64>)) {
			(Some(Ok(lat)), Some(Ok(lon))) => (lat, lon),
			_ => {
				warn!("line {}: no coordinates for {}, not added to geo table", i + 2, country);
				continue
			},
		};
		w.serialize(GeoRecord{
			province_or_state: field(rec, 0).map(Into::into),
			country: country.into(),
			latitude,
			longitude,
		})?;
		n += 1;
	}
	w.flush()?;
	Ok(n)
}
