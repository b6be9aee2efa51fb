use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_int_counter, CounterVec, IntCounter};

lazy_static! {
    pub static ref CALENDAR_ENTRIES_CREATED: IntCounter = register_int_counter!(
        "mealplan_calendar_entries_created_total",
        "Calendar entries created"
    ).unwrap();

    pub static ref CALENDAR_ENTRIES_DELETED: IntCounter = register_int_counter!(
        "mealplan_calendar_entries_deleted_total",
        "Calendar entries deleted"
    ).unwrap();

    pub static ref DANGLING_REFERENCES: IntCounter = register_int_counter!(
        "mealplan_calendar_dangling_references_total",
        "Calendar entries dropped because their menu no longer exists"
    ).unwrap();

    pub static ref STORE_FAILURES: CounterVec = register_counter_vec!(
        "mealplan_store_failures_total",
        "Document store operations that failed, by operation",
        &["operation"]
    ).unwrap();
}

pub fn store_failure(operation: &str) {
    STORE_FAILURES.with_label_values(&[operation]).inc();
}
