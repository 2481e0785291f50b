//! Prometheus metrics for the template service.

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "herald";

lazy_static! {
    /// Entities created, by entity type
    pub static ref ENTITIES_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_entities_created_total", METRIC_PREFIX),
        "Total entities created",
        &["entity"]
    ).unwrap();

    /// Messages rendered from templates
    pub static ref MESSAGES_RENDERED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_messages_rendered_total", METRIC_PREFIX),
        "Total messages rendered from notification templates"
    ).unwrap();

    /// Placeholder tags registered in the global registry
    pub static ref TAGS_REGISTERED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_tags_registered_total", METRIC_PREFIX),
        "Total placeholder tags registered"
    ).unwrap();

    /// Integrity violations rejected, by kind
    pub static ref INTEGRITY_REJECTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_integrity_rejections_total", METRIC_PREFIX),
        "Mutations rejected by entity integrity rules",
        &["kind"]
    ).unwrap();
}

/// Encode all registered metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_metrics() {
        ENTITIES_CREATED_TOTAL.with_label_values(&["application"]).inc();
        let output = encode_metrics().unwrap();
        assert!(output.contains("herald_entities_created_total"));
    }
}
