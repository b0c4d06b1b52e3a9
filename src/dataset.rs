use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use csv::StringRecord;

use chrono::NaiveDate;

use super::aggregate::aggregate_countries;
use super::config::ReferencePaths;
use super::daily::{load_day, parse_day};
use super::error::{DatasetError, DayError};
use super::ioutil::is_report_file;
use super::model::{CountryAggregate, DayReport};
use super::progress::ProgressSink;
use super::reference::ReferenceTables;


#[derive(Debug)]
pub struct SkippedFile {
	pub source: String,
	pub error: DayError,
}


#[derive(Debug, Clone)]
struct ProcessedDay {
	source: String,
	report: DayReport,
	countries: Vec<CountryAggregate>,
}


/// All days of a run, with their country aggregates.
#[derive(Debug)]
pub struct Dataset {
	references: ReferenceTables,
	days: Vec<ProcessedDay>,
	skipped: Vec<SkippedFile>,
	global_max_confirmed: u64,
}

impl Dataset {
	fn new(references: ReferenceTables) -> Self {
		Self{
			references,
			days: Vec::new(),
			skipped: Vec::new(),
			global_max_confirmed: 0,
		}
	}

	fn submit(&mut self, source: String, result: Result<DayReport, DayError>) {
		match result {
			Ok(report) => {
				if let Some(max) = report.max_confirmed() {
					self.global_max_confirmed = self.global_max_confirmed.max(max);
				}
				let countries = aggregate_countries(&report);
				self.days.push(ProcessedDay{source, report, countries});
			},
			Err(error) => {
				warn!("skipping {}: {}", source, error);
				self.skipped.push(SkippedFile{source, error});
			},
		}
	}

	/// Build from rows already in memory, in the given order.
	pub fn from_sources<I: IntoIterator<Item = (String, Vec<StringRecord>)>>(references: ReferenceTables, sources: I) -> Self {
		let mut result = Self::new(references);
		for (source, rows) in sources {
			let day = parse_day(&source, &rows, &result.references);
			result.submit(source, day);
		}
		result
	}

	/// Load every report file in `origin`, in directory order.
	pub fn load<P: AsRef<Path>, S: ProgressSink + ?Sized>(
		progress: &mut S,
		origin: P,
		references: ReferenceTables,
	) -> Result<Self, DatasetError> {
		let origin = origin.as_ref();
		let read_dir_err = |source: io::Error| DatasetError::ReadDir{
			path: origin.to_path_buf(),
			source,
		};
		let mut files: Vec<PathBuf> = Vec::new();
		for entry in fs::read_dir(origin).map_err(read_dir_err)? {
			let entry = entry.map_err(read_dir_err)?;
			let path = entry.path();
			if path.is_file() && is_report_file(&path) {
				files.push(path);
			}
		}
		info!("found {} report files in {}", files.len(), origin.display());

		let mut result = Self::new(references);
		progress.start(Some(files.len()));
		for (i, path) in files.iter().enumerate() {
			let day = load_day(path, &result.references);
			result.submit(path.display().to_string(), day);
			progress.update(i + 1);
		}
		progress.finish(files.len());
		info!("{}", result.summary());
		Ok(result)
	}

	/// Load the reference tables from `paths`, then every report file in `origin`.
	pub fn open<P: AsRef<Path>, S: ProgressSink + ?Sized>(
		progress: &mut S,
		origin: P,
		paths: &ReferencePaths,
	) -> Result<Self, DatasetError> {
		let references = paths.load()?;
		Self::load(progress, origin, references)
	}

	pub fn references(&self) -> &ReferenceTables {
		&self.references
	}

	/// Stable sort of the days by report date.
	pub fn sort_by_date(&mut self) {
		self.days.sort_by_key(|d| d.report.date());
	}

	pub fn all_day_reports(&self) -> impl Iterator<Item = &DayReport> + '_ {
		self.days.iter().map(|d| &d.report)
	}

	/// Country aggregates per date. Of several days sharing a date, the first wins.
	pub fn all_country_aggregates(&self) -> BTreeMap<NaiveDate, &[CountryAggregate]> {
		let mut result = BTreeMap::new();
		for day in self.days.iter() {
			let date = day.report.date();
			if result.contains_key(&date) {
				warn!("{} duplicates the date {}, its country aggregates are ignored", day.source, date);
				continue
			}
			result.insert(date, &day.countries[..]);
		}
		result
	}

	/// Day reports paired with their country aggregates and source names.
	pub fn days(&self) -> impl Iterator<Item = (&str, &DayReport, &[CountryAggregate])> + '_ {
		self.days.iter().map(|d| (d.source.as_str(), &d.report, &d.countries[..]))
	}

	/// Largest single-region confirmed count across all days; fixed at load time.
	#[inline(always)]
	pub fn global_max_confirmed(&self) -> u64 {
		self.global_max_confirmed
	}

	pub fn skipped(&self) -> &[SkippedFile] {
		&self.skipped[..]
	}

	pub fn summary(&self) -> LoadSummary {
		let mut skipped_by_kind: BTreeMap<&'static str, usize> = BTreeMap::new();
		for s in self.skipped.iter() {
			*skipped_by_kind.entry(s.error.kind()).or_insert(0) += 1;
		}
		LoadSummary{
			processed: self.days.len(),
			total: self.days.len() + self.skipped.len(),
			rejected_rows: self.days.iter().map(|d| d.report.rejected().len()).sum(),
			skipped_by_kind,
		}
	}
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
	pub processed: usize,
	pub total: usize,
	pub rejected_rows: usize,
	pub skipped_by_kind: BTreeMap<&'static str, usize>,
}

impl fmt::Display for LoadSummary {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} of {} days processed", self.processed, self.total)?;
		let skipped = self.total - self.processed;
		if skipped > 0 {
			write!(f, ", {} skipped:", skipped)?;
			for (i, (kind, n)) in self.skipped_by_kind.iter().enumerate() {
				if i > 0 {
					f.write_str(",")?;
				}
				write!(f, " {} {}", n, kind)?;
			}
		}
		write!(f, " ({} rows rejected)", self.rejected_rows)
	}
}
