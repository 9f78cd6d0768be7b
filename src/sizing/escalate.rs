//! Single-then-parallel catalog search shared by trays, busbars and the main cable.

/// Upper bound on parallel runs tried before falling back to the strongest entry.
pub const MAX_PARALLEL_RUNS: u32 = 20;

/// Outcome of an escalating catalog search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escalation<T> {
    pub item: T,
    pub runs: u32,
    /// No run count up to the limit matched; `item` is the fallback entry.
    pub exhausted: bool,
}

/// Finds the smallest run count `r` in `1..=max_runs` for which
/// `lookup(demand / r)` yields an entry.
///
/// When nothing matches, returns `fallback` with
/// `ceil(demand / fallback_capacity)` runs. Never fails.
pub fn escalate<T, F>(
    demand: f64,
    max_runs: u32,
    mut lookup: F,
    fallback: T,
    fallback_capacity: f64,
) -> Escalation<T>
where
    F: FnMut(f64) -> Option<T>,
{
    if let Some(item) = lookup(demand) {
        return Escalation {
            item,
            runs: 1,
            exhausted: false,
        };
    }

    for runs in 2..=max_runs {
        if let Some(item) = lookup(demand / f64::from(runs)) {
            return Escalation {
                item,
                runs,
                exhausted: false,
            };
        }
    }

    Escalation {
        item: fallback,
        runs: runs_needed(demand, fallback_capacity),
        exhausted: true,
    }
}

/// `ceil(demand / capacity)`, at least 1; saturates instead of overflowing.
pub fn runs_needed(demand: f64, capacity: f64) -> u32 {
    if capacity.is_nan() || capacity <= 0.0 || !demand.is_finite() || demand <= 0.0 {
        return 1;
    }
    // `as` saturates at u32::MAX for out-of-range floats.
    ((demand / capacity).ceil() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATINGS: [u32; 3] = [100, 250, 400];

    fn first_rated(amps: f64) -> Option<u32> {
        RATINGS.iter().copied().find(|r| f64::from(*r) >= amps)
    }

    #[test]
    fn single_match_uses_one_run() {
        let e = escalate(180.0, MAX_PARALLEL_RUNS, first_rated, 400, 400.0);
        assert_eq!(e.item, 250);
        assert_eq!(e.runs, 1);
        assert!(!e.exhausted);
    }

    #[test]
    fn picks_smallest_run_count() {
        // 1000 / 2 = 500 > 400; 1000 / 3 = 333.3 -> 400
        let e = escalate(1000.0, MAX_PARALLEL_RUNS, first_rated, 400, 400.0);
        assert_eq!((e.item, e.runs), (400, 3));
    }

    #[test]
    fn exhausted_search_falls_back() {
        // 8000 / 20 = 400 still fits on the last permitted run count.
        let e = escalate(8_000.0, 20, first_rated, 400, 400.0);
        assert_eq!((e.runs, e.exhausted), (20, false));
        let e = escalate(10_000.0, 20, first_rated, 400, 400.0);
        assert!(e.exhausted);
        assert_eq!((e.item, e.runs), (400, 25));
    }

    #[test]
    fn max_runs_one_skips_search() {
        let e = escalate(1000.0, 1, first_rated, 400, 400.0);
        assert!(e.exhausted);
        assert_eq!(e.runs, 3);
    }

    #[test]
    fn runs_needed_guards_degenerate_values() {
        assert_eq!(runs_needed(100.0, 0.0), 1);
        assert_eq!(runs_needed(0.0, 50.0), 1);
        assert_eq!(runs_needed(f64::INFINITY, 50.0), 1);
        assert_eq!(runs_needed(f64::NAN, 50.0), 1);
        assert_eq!(runs_needed(100.0, f64::NAN), 1);
        assert_eq!(runs_needed(101.0, 50.0), 3);
        assert_eq!(runs_needed(1e30, 1.0), u32::MAX);
    }

    #[test]
    fn run_count_is_monotonic_in_demand() {
        let mut last = 0;
        for step in 0..200 {
            let demand = f64::from(step) * 50.0;
            let e = escalate(demand, MAX_PARALLEL_RUNS, first_rated, 400, 400.0);
            assert!(e.runs >= last, "runs decreased at {demand}");
            last = e.runs;
        }
    }
}
