use std::io;
use std::io::Write;
use std::time;

use isatty::stdout_isatty;


pub trait ProgressSink {
	fn start(&mut self, n: Option<usize>);
	fn update(&mut self, inow: usize);
	fn finish(&mut self, inow: usize);
}


/// Writes a carriage-return progress line to stdout.
pub struct ProgressMeter {
	t0: time::Instant,
	tprev: time::Instant,
	iprev: usize,
	n: Option<usize>,
}

impl ProgressMeter {
	pub fn new() -> Self {
		let now = time::Instant::now();
		Self{
			t0: now,
			tprev: now,
			iprev: 0,
			n: None,
		}
	}

	fn print(&self, inow: usize, rate: f64, end: &str) {
		match self.n {
			Some(n) if n > 0 => {
				let done = (inow as f64) / (n as f64);
				print!("{:6.0}% [{:6.2}/s]{}", done * 100.0, rate, end);
			},
			_ => {
				print!("{:12} [{:6.2}/s]{}", inow, rate, end);
			},
		}
		// progress output is best-effort
		let _ = io::stdout().flush();
	}
}

impl Default for ProgressMeter {
	fn default() -> Self {
		Self::new()
	}
}

impl ProgressSink for ProgressMeter {
	fn start(&mut self, n: Option<usize>) {
		let now = time::Instant::now();
		self.t0 = now;
		self.tprev = now;
		self.iprev = 0;
		self.n = n;
		self.print(0, 0., "\r");
	}

	fn update(&mut self, inow: usize) {
		let now = time::Instant::now();
		let dt = (now - self.tprev).as_secs_f64();
		let rate = if dt > 0. {
			inow.saturating_sub(self.iprev) as f64 / dt
		} else {
			0.
		};
		self.print(inow, rate, "\r");
		self.iprev = inow;
		self.tprev = now;
	}

	fn finish(&mut self, inow: usize) {
		let dt = (time::Instant::now() - self.t0).as_secs_f64();
		let rate = if dt > 0. {
			inow as f64 / dt
		} else {
			0.
		};
		self.print(inow, rate, "\n");
	}
}


pub struct NullProgress;

impl ProgressSink for NullProgress {
	fn start(&mut self, _n: Option<usize>) {}
	fn update(&mut self, _inow: usize) {}
	fn finish(&mut self, _inow: usize) {}
}


/// A progress meter if stdout is a terminal, silence otherwise.
pub fn default_output() -> Box<dyn ProgressSink> {
	if stdout_isatty() {
		Box::new(ProgressMeter::new())
	} else {
		Box::new(NullProgress)
	}
}
