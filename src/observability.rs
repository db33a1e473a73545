//! Structured logging hooks for the recipe engine.
//!
//! The `log_metric!` macro emits one `key=value` event per call through the `log`
//! facade at debug level. Arguments are only formatted when debug logging is
//! enabled, so calls on the hot pipeline path cost a level check otherwise.

/// Logs a structured key-value metric string at debug level.
///
/// # Example
/// ```
/// use decodex::log_metric;
/// let step = 2;
/// log_metric!("event"="pipeline_step", "module"="hexencode", "position"=&step);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if log::log_enabled!(target: "decodex::metric", log::Level::Debug) {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!(target: "decodex::metric", "DECODEX_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
