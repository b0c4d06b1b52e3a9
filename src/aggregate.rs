use std::collections::HashMap;

use super::metrics::Counts;
use super::model::{CountryAggregate, DayReport, Iso3};


/// Sum region rows into one aggregate per ISO-3 code, in first-seen order.
///
/// Rows without an ISO-3 code are left out. Metrics are derived from the
/// summed counts, never from per-region metrics.
pub fn aggregate_countries(day: &DayReport) -> Vec<CountryAggregate> {
	let mut index: HashMap<&Iso3, usize> = HashMap::new();
	let mut partial: Vec<(&Iso3, &str, Counts)> = Vec::new();
	for region in day.regions().iter() {
		let iso3 = match region.iso3.as_ref() {
			Some(code) => code,
			None => continue,
		};
		match index.get(iso3) {
			Some(i) => {
				partial[*i].2 += region.counts;
			},
			None => {
				index.insert(iso3, partial.len());
				partial.push((iso3, region.country.as_str(), region.counts));
			},
		}
	}
	partial.into_iter().map(|(iso3, name, counts)| {
		CountryAggregate{
			iso3: iso3.clone(),
			country_name: name.into(),
			counts,
			metrics: counts.metrics(),
		}
	}).collect()
}


#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use crate::model::{Coordinates, RegionRow};

	fn region(province: Option<&str>, country: &str, iso3: Option<&str>, confirmed: u64, deaths: u64, recovered: u64) -> RegionRow {
		RegionRow{
			province_or_state: province.map(Into::into),
			country: country.into(),
			region_label: crate::model::region_label(province, country),
			counts: Counts::new(confirmed, deaths, recovered),
			coordinates: Coordinates{latitude: 0., longitude: 0.},
			iso3: iso3.map(Into::into),
		}
	}

	fn day(regions: Vec<RegionRow>) -> DayReport {
		DayReport::new(NaiveDate::from_ymd_opt(2020, 3, 16).unwrap(), regions, Vec::new())
	}

	#[test]
	fn sums_per_iso3_in_first_seen_order() {
		let d = day(vec![
			region(Some("Hubei"), "Mainland China", Some("CHN"), 100, 10, 50),
			region(None, "Italy", Some("ITA"), 20, 2, 1),
			region(Some("Anhui"), "China", Some("CHN"), 10, 0, 5),
		]);
		let aggregates = aggregate_countries(&d);
		assert_eq!(aggregates.len(), 2);
		assert_eq!(aggregates[0].iso3.as_str(), "CHN");
		assert_eq!(aggregates[0].country_name.as_str(), "Mainland China");
		assert_eq!(aggregates[0].counts, Counts::new(110, 10, 55));
		assert_eq!(aggregates[0].metrics.active, 45);
		assert_eq!(aggregates[1].iso3.as_str(), "ITA");
		assert_eq!(aggregates[1].counts, Counts::new(20, 2, 1));
	}

	#[test]
	fn death_rate_is_recomputed_from_totals() {
		let d = day(vec![
			region(Some("A"), "X", Some("XXX"), 10, 5, 0),
			region(Some("B"), "X", Some("XXX"), 90, 0, 0),
		]);
		let aggregates = aggregate_countries(&d);
		// mean of per-region rates would be 0.25
		assert!((aggregates[0].metrics.death_rate - 0.05).abs() < 1e-12);
	}

	#[test]
	fn unattributed_rows_are_excluded() {
		let d = day(vec![
			region(Some("Diamond Princess"), "Cruise Ship", None, 700, 7, 300),
			region(None, "Italy", Some("ITA"), 20, 2, 1),
		]);
		let aggregates = aggregate_countries(&d);
		assert_eq!(aggregates.len(), 1);
		assert_eq!(aggregates[0].iso3.as_str(), "ITA");
		// still present at region level
		assert_eq!(d.len(), 2);
	}

	#[test]
	fn empty_day() {
		assert!(aggregate_countries(&day(Vec::new())).is_empty());
	}
}
