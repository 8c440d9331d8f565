use std::sync::LazyLock;

use crate::foodlink_version;
use crate::{
    modules::{context::Initialize, error::FoodLinkResult},
    utc_now,
};
use prometheus::{
    register_gauge, register_gauge_vec, register_histogram, register_histogram_vec,
    register_int_counter, register_int_counter_vec, Gauge, GaugeVec, Histogram, HistogramVec,
    IntCounter, IntCounterVec,
};

pub mod endpoint;

// Metric name constants
pub const METRIC_REQUEST_DURATION_BY_STATUS: &str = "foodlink_request_duration_seconds_by_status";
pub const METRIC_REQUEST_DURATION_BY_METHOD_AND_OPERATION: &str =
    "foodlink_request_duration_seconds_by_method_and_operation";
pub const METRIC_REQUEST_TOTAL_BY_METHOD_AND_OPERATION: &str =
    "foodlink_request_total_by_method_and_operation";
pub const METRIC_DONATIONS_CREATED_TOTAL: &str = "foodlink_donations_created_total";
pub const METRIC_DONATION_TRANSITIONS_TOTAL: &str = "foodlink_donation_transitions_total";
pub const METRIC_DONATIONS_EXPIRED_TOTAL: &str = "foodlink_donations_expired_total";
pub const METRIC_SWEEP_DURATION: &str = "foodlink_expiry_sweep_duration_seconds";
pub const METRIC_BUILD_INFO: &str = "foodlink_build_info";
pub const METRIC_START_TIMESTAMP: &str = "foodlink_start_timestamp";

pub static FOODLINK_BUILD_INFO: LazyLock<GaugeVec> = LazyLock::new(|| {
    register_gauge_vec!(
        METRIC_BUILD_INFO,
        "Build information including version and commit hash",
        &["version", "commit"]
    )
    .expect("Failed to register foodlink_build_info")
});

pub static FOODLINK_START_TIMESTAMP: LazyLock<Gauge> = LazyLock::new(|| {
    register_gauge!(METRIC_START_TIMESTAMP, "Unix timestamp when FoodLink started")
        .expect("Failed to register foodlink_start_timestamp")
});

pub static FOODLINK_REQUEST_DURATION_BY_STATUS: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        METRIC_REQUEST_DURATION_BY_STATUS,
        "Distribution of HTTP request durations, measured in seconds, grouped by response status code",
        &["status"]
    )
    .expect("Failed to register request_duration_seconds_by_status")
});

pub static FOODLINK_REQUEST_DURATION_BY_METHOD_AND_OPERATION: LazyLock<HistogramVec> =
    LazyLock::new(|| {
        register_histogram_vec!(
            METRIC_REQUEST_DURATION_BY_METHOD_AND_OPERATION,
            "Distribution of HTTP request durations, measured in seconds, grouped by method, operation ID, and status code",
            &["method", "operation_id", "status"]
        )
        .expect("Failed to register request_duration_seconds_by_method_and_operation")
    });

pub static FOODLINK_REQUEST_TOTAL_BY_METHOD_AND_OPERATION: LazyLock<IntCounterVec> =
    LazyLock::new(|| {
        register_int_counter_vec!(
            METRIC_REQUEST_TOTAL_BY_METHOD_AND_OPERATION,
            "Total number of HTTP requests, grouped by method, operation ID, and status code",
            &["method", "operation_id", "status"]
        )
        .expect("Failed to register request_total_by_method_and_operation")
    });

pub static FOODLINK_DONATIONS_CREATED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter!(
        METRIC_DONATIONS_CREATED_TOTAL,
        "Total number of donation listings created"
    )
    .expect("Failed to register foodlink_donations_created_total")
});

pub static FOODLINK_DONATION_TRANSITIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        METRIC_DONATION_TRANSITIONS_TOTAL,
        "Total number of donation status transitions, grouped by target status",
        &["target"]
    )
    .expect("Failed to register foodlink_donation_transitions_total")
});

pub static FOODLINK_DONATIONS_EXPIRED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter!(
        METRIC_DONATIONS_EXPIRED_TOTAL,
        "Total number of donation listings expired by the sweeper"
    )
    .expect("Failed to register foodlink_donations_expired_total")
});

pub static FOODLINK_SWEEP_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    register_histogram!(
        METRIC_SWEEP_DURATION,
        "Distribution of expiry sweep durations, measured in seconds"
    )
    .expect("Failed to register foodlink_expiry_sweep_duration_seconds")
});

pub struct MetricsService;

impl Initialize for MetricsService {
    async fn initialize() -> FoodLinkResult<()> {
        FOODLINK_BUILD_INFO
            .with_label_values(&[foodlink_version!(), env!("GIT_HASH")])
            .set(1.0);
        FOODLINK_START_TIMESTAMP.set(utc_now!() as f64 / 1000.0);
        Ok(())
    }
}
