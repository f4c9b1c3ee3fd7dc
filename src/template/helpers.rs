// ABOUTME: Handlebars helper functions available to signature templates
// ABOUTME: Implements case conversion, fallback values, and the current timestamp

use chrono::Utc;
use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value as JsonValue;

handlebars_helper!(upper_helper: |s: str| s.to_uppercase());

handlebars_helper!(lower_helper: |s: str| s.to_lowercase());

// Empty strings and nulls both fall back
handlebars_helper!(default_helper: |value: Json, fallback: Json| {
    match value {
        JsonValue::Null => fallback.clone(),
        JsonValue::String(s) if s.is_empty() => fallback.clone(),
        other => other.clone(),
    }
});

handlebars_helper!(timestamp_helper: |*args| {
    let format = args
        .first()
        .and_then(|v| v.as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");
    Utc::now().format(format).to_string()
});

/// Register all built-in helpers
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("default", Box::new(default_helper));
    handlebars.register_helper("timestamp", Box::new(timestamp_helper));
}
