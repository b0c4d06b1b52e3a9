use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::Env;

use covidmap::{CountryTable, Dataset, ReferencePaths, RegionTable};


fn write_day_tables(
	destination: &Path,
	region_table: &RegionTable,
	country_table: &CountryTable,
) -> Result<(), csv::Error> {
	let date = region_table.date;
	region_table.write_csv(File::create(destination.join(format!("regions-{}.csv", date)))?)?;
	country_table.write_csv(File::create(destination.join(format!("countries-{}.csv", date)))?)?;
	Ok(())
}


fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let argv: Vec<String> = std::env::args().collect();
	if argv.len() != 3 {
		eprintln!("usage: {} <origin-dir> <destination-dir>", argv.get(0).map(|s| s.as_str()).unwrap_or("daily_tables"));
		return Err(Box::new(io::Error::new(io::ErrorKind::InvalidInput, "wrong number of arguments")))
	}
	let origin = &argv[1];
	let destination = Path::new(&argv[2]);
	let paths = ReferencePaths::from_env();

	println!("loading daily reports from {} ...", origin);
	let mut dataset = Dataset::open(&mut *covidmap::default_output(), origin, &paths)?;
	dataset.sort_by_date();

	println!("writing tables to {} ...", destination.display());
	std::fs::create_dir_all(destination)?;
	for (_, day, countries) in dataset.days() {
		write_day_tables(
			destination,
			&RegionTable::from_day(day),
			&CountryTable::from_aggregates(day.date(), countries),
		)?;
	}

	println!("{}", dataset.summary());
	println!("global max confirmed: {}", dataset.global_max_confirmed());
	Ok(())
}
