/// Optional instrumentation hooks.
///
/// Parse and fingerprint durations can be handed to an external metrics
/// collaborator through [`TimingSink`]. Nothing here affects parse results.
/// Measuring needs a clock, so [`timed`] is only available with the `std`
/// feature; sinks themselves are `no_std`.
use core::sync::atomic::{AtomicU32, Ordering};
use core::time::Duration;

pub const TAGGED_PARAMS_PARSE_TIMING: &str = "dot11.tagged_params.parse.timing";
pub const TAGGED_PARAMS_FINGERPRINT_TIMING: &str = "dot11.tagged_params.fingerprint.timing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ParseTiming,
    FingerprintTiming,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::ParseTiming => TAGGED_PARAMS_PARSE_TIMING,
            Metric::FingerprintTiming => TAGGED_PARAMS_FINGERPRINT_TIMING,
        }
    }
}

/// Receives elapsed-time samples. Shared across worker threads, so `&self`.
pub trait TimingSink {
    fn record(&self, metric: Metric, elapsed: Duration);
}

/// Lock-free sample count and worst-case duration per metric.
pub struct TimingStats {
    parse_samples: AtomicU32,
    parse_max_micros: AtomicU32,
    fingerprint_samples: AtomicU32,
    fingerprint_max_micros: AtomicU32,
}

impl TimingStats {
    pub const fn new() -> Self {
        Self {
            parse_samples: AtomicU32::new(0),
            parse_max_micros: AtomicU32::new(0),
            fingerprint_samples: AtomicU32::new(0),
            fingerprint_max_micros: AtomicU32::new(0),
        }
    }

    pub fn samples(&self, metric: Metric) -> u32 {
        self.counters(metric).0.load(Ordering::Relaxed)
    }

    pub fn max_micros(&self, metric: Metric) -> u32 {
        self.counters(metric).1.load(Ordering::Relaxed)
    }

    fn counters(&self, metric: Metric) -> (&AtomicU32, &AtomicU32) {
        match metric {
            Metric::ParseTiming => (&self.parse_samples, &self.parse_max_micros),
            Metric::FingerprintTiming => {
                (&self.fingerprint_samples, &self.fingerprint_max_micros)
            }
        }
    }
}

impl Default for TimingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSink for TimingStats {
    fn record(&self, metric: Metric, elapsed: Duration) {
        let (samples, max) = self.counters(metric);
        let micros = u32::try_from(elapsed.as_micros()).unwrap_or(u32::MAX);
        samples.fetch_add(1, Ordering::Relaxed);
        max.fetch_max(micros, Ordering::Relaxed);
    }
}

/// Run `f`, reporting its wall-clock duration to `sink`.
#[cfg(feature = "std")]
pub fn timed<T>(sink: &dyn TimingSink, metric: Metric, f: impl FnOnce() -> T) -> T {
    let start = std::time::Instant::now();
    let result = f();
    sink.record(metric, start.elapsed());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names() {
        assert_eq!(Metric::ParseTiming.name(), "dot11.tagged_params.parse.timing");
        assert_eq!(
            Metric::FingerprintTiming.name(),
            "dot11.tagged_params.fingerprint.timing"
        );
    }

    #[test]
    fn stats_track_count_and_max() {
        let stats = TimingStats::new();
        stats.record(Metric::ParseTiming, Duration::from_micros(40));
        stats.record(Metric::ParseTiming, Duration::from_micros(15));
        stats.record(Metric::FingerprintTiming, Duration::from_micros(7));

        assert_eq!(stats.samples(Metric::ParseTiming), 2);
        assert_eq!(stats.max_micros(Metric::ParseTiming), 40);
        assert_eq!(stats.samples(Metric::FingerprintTiming), 1);
        assert_eq!(stats.max_micros(Metric::FingerprintTiming), 7);
    }

    #[test]
    fn oversized_duration_saturates() {
        let stats = TimingStats::new();
        stats.record(Metric::ParseTiming, Duration::from_secs(1_000_000));
        assert_eq!(stats.max_micros(Metric::ParseTiming), u32::MAX);
    }

    #[cfg(feature = "std")]
    #[test]
    fn timed_records_one_sample() {
        let stats = TimingStats::new();
        let value = timed(&stats, Metric::FingerprintTiming, || 42);
        assert_eq!(value, 42);
        assert_eq!(stats.samples(Metric::FingerprintTiming), 1);
        assert_eq!(stats.samples(Metric::ParseTiming), 0);
    }
}
