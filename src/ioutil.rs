use std::io;
use std::io::Read;
use std::fs;
use std::path::Path;

use csv::StringRecord;

use flate2;


/// Open a file for reading, decompressing on the fly if it ends in `.gz`.
pub fn magic_open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Read>> {
	let path = path.as_ref();
	let f = fs::File::open(path)?;
	match path.extension() {
		Some(x) if x == "gz" => Ok(Box::new(flate2::read::GzDecoder::new(f))),
		_ => Ok(Box::new(io::BufReader::new(f))),
	}
}

/// Whether a path names a daily report file (`*.csv`, optionally gzipped).
pub fn is_report_file<P: AsRef<Path>>(path: P) -> bool {
	let name = match path.as_ref().file_name().and_then(|n| n.to_str()) {
		Some(n) => n.to_ascii_lowercase(),
		None => return false,
	};
	name.ends_with(".csv") || name.ends_with(".csv.gz")
}


/// Trimmed field `i` of a record, `None` if absent or blank.
pub(crate) fn field<'r>(rec: &'r StringRecord, i: usize) -> Option<&'r str> {
	let s = rec.get(i)?.trim();
	if s.is_empty() {
		None
	} else {
		Some(s)
	}
}
