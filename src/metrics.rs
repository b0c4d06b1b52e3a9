use std::ops::AddAssign;


/// Cumulative counters as reported for one region (or a sum of regions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
	pub confirmed: u64,
	pub deaths: u64,
	pub recovered: u64,
}

impl Counts {
	pub fn new(confirmed: u64, deaths: u64, recovered: u64) -> Self {
		Self{confirmed, deaths, recovered}
	}

	pub fn is_consistent(&self) -> bool {
		// widened, so bogus inputs cannot overflow the check itself
		self.confirmed as u128 >= self.recovered as u128 + self.deaths as u128
	}

	pub fn metrics(&self) -> Metrics {
		derive_metrics(self.confirmed, self.recovered, self.deaths)
	}
}

impl AddAssign for Counts {
	fn add_assign(&mut self, other: Self) {
		self.confirmed = self.confirmed.saturating_add(other.confirmed);
		self.deaths = self.deaths.saturating_add(other.deaths);
		self.recovered = self.recovered.saturating_add(other.recovered);
	}
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
	/// May be negative; sums of individually consistent rows are not re-checked.
	/// Saturates at the bounds of `i64`.
	pub active: i64,
	pub death_rate: f64,
}

pub fn derive_metrics(confirmed: u64, recovered: u64, deaths: u64) -> Metrics {
	let active = confirmed as i128 - recovered as i128 - deaths as i128;
	let active = active.max(i64::MIN as i128).min(i64::MAX as i128) as i64;
	let death_rate = if confirmed != 0 {
		deaths as f64 / confirmed as f64
	} else {
		0.
	};
	Metrics{active, death_rate}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn active_subtracts_recovered_and_deaths() {
		let m = derive_metrics(100, 30, 5);
		assert_eq!(m.active, 65);
		assert!((m.death_rate - 0.05).abs() < 1e-12);
	}

	#[test]
	fn zero_confirmed_has_zero_death_rate() {
		let m = derive_metrics(0, 0, 0);
		assert_eq!(m.active, 0);
		assert_eq!(m.death_rate, 0.);
	}

	#[test]
	fn active_is_not_clamped() {
		assert_eq!(derive_metrics(5, 3, 4).active, -2);
	}

	#[test]
	fn death_rate_stays_in_unit_interval_for_consistent_counts() {
		for &(c, r, d) in &[(1u64, 0u64, 1u64), (10, 9, 1), (7, 0, 0), (1000, 1, 999)] {
			let counts = Counts::new(c, d, r);
			assert!(counts.is_consistent());
			let m = counts.metrics();
			assert!(m.death_rate >= 0. && m.death_rate <= 1.);
			assert_eq!(m.active, c as i64 - r as i64 - d as i64);
		}
	}

	#[test]
	fn consistency_check() {
		assert!(Counts::new(10, 3, 7).is_consistent());
		assert!(!Counts::new(5, 4, 3).is_consistent());
	}

	#[test]
	fn counts_accumulate() {
		let mut total = Counts::default();
		total += Counts::new(3, 1, 1);
		total += Counts::new(4, 0, 2);
		assert_eq!(total, Counts::new(7, 1, 3));
	}

	#[test]
	fn accumulation_saturates_instead_of_overflowing() {
		let mut total = Counts::new(10_000_000_000_000_000_000, 1, 2);
		total += Counts::new(10_000_000_000_000_000_000, 3, 4);
		assert_eq!(total, Counts::new(u64::MAX, 4, 6));
	}

	#[test]
	fn active_does_not_wrap_on_huge_counts() {
		assert_eq!(derive_metrics(u64::MAX, 0, 0).active, i64::MAX);
		assert_eq!(derive_metrics(0, u64::MAX, u64::MAX).active, i64::MIN);
		assert_eq!(derive_metrics(i64::MAX as u64, 0, 0).active, i64::MAX);
		assert_eq!(derive_metrics(i64::MAX as u64, 1, 1).active, i64::MAX - 2);
	}
}
