use std::io;

use env_logger::Env;

use covidmap::{magic_open, read_rows, write_geo_table};


fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let argv: Vec<String> = std::env::args().collect();
	if argv.len() != 3 {
		eprintln!("usage: {} <day-file-with-coordinates> <output>", argv.get(0).map(|s| s.as_str()).unwrap_or("geo_locations"));
		return Err(Box::new(io::Error::new(io::ErrorKind::InvalidInput, "wrong number of arguments")))
	}
	let input = &argv[1];
	let output = &argv[2];

	println!("reading {} ...", input);
	let rows = read_rows(magic_open(input)?)?;
	let n = {
		let w = std::fs::File::create(output)?;
		write_geo_table(&rows, w)?
	};
	println!("{} geo locations written to {}", n, output);
	Ok(())
}
