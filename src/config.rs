use std::env;
use std::path::PathBuf;

use super::error::ReferenceError;
use super::reference::ReferenceTables;


pub static GEO_TABLE_VAR: &'static str = "COVIDMAP_GEO_TABLE";
pub static COUNTRY_CODES_VAR: &'static str = "COVIDMAP_COUNTRY_CODES";
static DEFAULT_GEO_TABLE: &'static str = "geo_locations.csv";
static DEFAULT_COUNTRY_CODES: &'static str = "country_codes.csv";


/// Locations of the reference tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
	pub geo: PathBuf,
	pub country_codes: PathBuf,
}

impl ReferencePaths {
	pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(geo: P, country_codes: Q) -> Self {
		Self{
			geo: geo.into(),
			country_codes: country_codes.into(),
		}
	}

	pub fn from_env() -> Self {
		Self::new(
			env::var_os(GEO_TABLE_VAR).map(PathBuf::from).unwrap_or_else(|| DEFAULT_GEO_TABLE.into()),
			env::var_os(COUNTRY_CODES_VAR).map(PathBuf::from).unwrap_or_else(|| DEFAULT_COUNTRY_CODES.into()),
		)
	}

	pub fn load(&self) -> Result<ReferenceTables, ReferenceError> {
		ReferenceTables::load(&self.geo, &self.country_codes)
	}
}

impl Default for ReferencePaths {
	fn default() -> Self {
		Self::new(DEFAULT_GEO_TABLE, DEFAULT_COUNTRY_CODES)
	}
}
