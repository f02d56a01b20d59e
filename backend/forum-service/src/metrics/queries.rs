use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// List queries executed per entity.
    pub static ref LIST_QUERY_TOTAL: IntCounterVec = register_int_counter_vec!(
        "forum_list_query_total",
        "List queries executed segmented by entity",
        &["entity"]
    )
    .expect("failed to register forum_list_query_total");
}

pub fn record_list(entity: &str) {
    LIST_QUERY_TOTAL.with_label_values(&[entity]).inc();
}
