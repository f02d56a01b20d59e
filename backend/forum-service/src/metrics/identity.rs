use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};
use std::time::Duration;

lazy_static! {
    /// Identity lookups by kind (one/many) and outcome (ok/timeout/error).
    pub static ref IDENTITY_LOOKUP_TOTAL: IntCounterVec = register_int_counter_vec!(
        "forum_identity_lookup_total",
        "Identity service lookups segmented by kind and outcome",
        &["kind", "outcome"]
    )
    .expect("failed to register forum_identity_lookup_total");

    /// Wall time of identity lookups, including timed-out ones.
    pub static ref IDENTITY_LOOKUP_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "forum_identity_lookup_duration_seconds",
        "Identity service lookup latency segmented by kind",
        &["kind"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("failed to register forum_identity_lookup_duration_seconds");
}

pub fn record_lookup(kind: &str, outcome: &str, elapsed: Duration) {
    IDENTITY_LOOKUP_TOTAL
        .with_label_values(&[kind, outcome])
        .inc();
    IDENTITY_LOOKUP_DURATION_SECONDS
        .with_label_values(&[kind])
        .observe(elapsed.as_secs_f64());
}
