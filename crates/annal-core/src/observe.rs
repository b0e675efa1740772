//! Optional metrics instrumentation for Annal.
//!
//! When the `observe` feature is enabled, key operations emit counters and
//! histograms via the [`metrics`] crate. A downstream application must
//! install a metrics recorder (e.g. `metrics-exporter-prometheus`) to
//! collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record an event append (counter + latency histogram).
///
/// - `annal.store.appends_total` – incremented on every stored event
/// - `annal.store.append_duration_seconds` – histogram of append latency
#[inline]
pub fn record_append(duration: std::time::Duration) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("annal.store.appends_total").increment(1);
        metrics::histogram!("annal.store.append_duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = duration;
    }
}

/// Record a query over the stored sequence.
///
/// - `annal.store.queries_total` – counter
/// - `annal.store.query_matches` – histogram of result sizes
#[inline]
pub fn record_query(matches: usize) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("annal.store.queries_total").increment(1);
        metrics::histogram!("annal.store.query_matches").record(matches as f64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = matches;
    }
}

/// Record a full clear of the store.
///
/// - `annal.store.clears_total` – counter
/// - `annal.store.cleared_events_total` – counter of discarded events
#[inline]
pub fn record_clear(removed: usize) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("annal.store.clears_total").increment(1);
        metrics::counter!("annal.store.cleared_events_total").increment(removed as u64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = removed;
    }
}

/// Record a login attempt outcome.
///
/// - `annal.auth.logins_total` – counter with `outcome` label (`ok` / `fail`)
#[inline]
pub fn record_login(success: bool) {
    #[cfg(feature = "observe")]
    {
        let outcome = if success { "ok" } else { "fail" };
        metrics::counter!("annal.auth.logins_total", "outcome" => outcome).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = success;
    }
}
