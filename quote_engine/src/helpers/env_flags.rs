use log::*;

/// Parse a boolean flag from an (environment variable) string value, or return the given default value otherwise.
///
/// Accepts `1`, `true`, `yes`, `on` and `0`, `false`, `no`, `off`, ignoring case and surrounding whitespace.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            warn!("🪛️ '{other}' is not a valid boolean flag. Using the default, {default}, instead.");
            default
        },
    }
}
