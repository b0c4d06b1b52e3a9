use std::io;
use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum ReferenceError {
	#[error("missing reference file {}: {source}", path.display())]
	MissingReferenceFile {
		path: PathBuf,
		source: io::Error,
	},
	#[error("failed to read reference table {}: {source}", path.display())]
	Csv {
		path: PathBuf,
		source: csv::Error,
	},
}


/// Failure which causes a whole day file to be skipped.
#[derive(Debug, Error)]
pub enum DayError {
	#[error("failed to open day file: {0}")]
	Open(#[from] io::Error),
	#[error("failed to read day file: {0}")]
	Csv(#[from] csv::Error),
	#[error("day file contains no data rows")]
	NoRows,
	#[error("unparsable date {0:?}")]
	UnparsableDate(String),
}

impl DayError {
	/// Short category name, used when summarising skipped files.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Open(_) | Self::Csv(_) => "unreadable",
			Self::NoRows => "empty",
			Self::UnparsableDate(_) => "dates unparsable",
		}
	}
}


/// Reason a single row was rejected. Never fatal to the file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
	#[error("row has only {0} fields")]
	TooFewFields(usize),
	#[error("malformed {field} count {value:?}")]
	MalformedCount {
		field: &'static str,
		value: String,
	},
	#[error("no coordinates in row or geo table")]
	MissingGeolocation,
	#[error("unknown country {0:?}")]
	UnknownCountry(String),
	#[error("inconsistent counts: confirmed {confirmed} < recovered {recovered} + deaths {deaths}")]
	InconsistentCounts {
		confirmed: u64,
		recovered: u64,
		deaths: u64,
	},
}


#[derive(Debug, Error)]
pub enum DatasetError {
	#[error(transparent)]
	Reference(#[from] ReferenceError),
	#[error("failed to list {}: {source}", path.display())]
	ReadDir {
		path: PathBuf,
		source: io::Error,
	},
}
