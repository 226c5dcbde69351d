use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Sizing metrics
    pub static ref ORDERS_COMPUTED: IntCounter = IntCounter::new(
        "orders_computed_total",
        "Total number of orders sized successfully"
    ).expect("valid metric definition");

    pub static ref ORDERS_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("orders_rejected_total", "Total number of sizing requests rejected"),
        &["reason"]
    ).expect("valid metric definition");

    pub static ref SIZING_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sizing_latency_seconds",
            "Order sizing latency"
        ).buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005])
    ).expect("valid metric definition");

    // State metrics
    pub static ref BOOK_REFRESHES: IntCounter = IntCounter::new(
        "book_refreshes_total",
        "Total number of order book replacements and level updates"
    ).expect("valid metric definition");

    pub static ref BALANCE_UPDATES: IntCounter = IntCounter::new(
        "balance_updates_total",
        "Total number of accepted balance updates"
    ).expect("valid metric definition");
}

pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(ORDERS_COMPUTED.clone()))?;
    REGISTRY.register(Box::new(ORDERS_REJECTED.clone()))?;
    REGISTRY.register(Box::new(SIZING_LATENCY.clone()))?;
    REGISTRY.register(Box::new(BOOK_REFRESHES.clone()))?;
    REGISTRY.register(Box::new(BALANCE_UPDATES.clone()))?;
    Ok(())
}

/// Text exposition of everything in [`REGISTRY`].
pub fn render_metrics() -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_metrics_are_rendered() {
        register_metrics().unwrap();
        ORDERS_REJECTED.with_label_values(&["crossed_book"]).inc();

        let text = render_metrics().unwrap();
        assert!(text.contains("orders_rejected_total{reason=\"crossed_book\"}"));
        assert!(register_metrics().is_err());
    }
}
