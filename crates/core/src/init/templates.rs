//! Template files compiled into the binary.

/// Default `.research-kit/config.toml`, with every setting documented.
pub const CONFIG_TEMPLATE: &str = include_str!("../../templates/config.toml");
