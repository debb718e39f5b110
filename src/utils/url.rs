// src/utils/url.rs

//! Provider URL templates.

use url::form_urlencoded::byte_serialize;

/// Percent-encode a value for use inside a query string.
pub fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Substitute `{name}` placeholders in `template`, percent-encoding each value.
///
/// Placeholders without a value are left as they are.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |url, (name, value)| {
            url.replace(&format!("{{{name}}}"), &encode_component(value))
        })
}
