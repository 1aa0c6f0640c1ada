//! Scene server endpoint resolution

/// Shorthand for the default local scene server
pub const CLASSICAL_TOKEN: &str = "classical";

/// Default local scene server address
pub const CLASSICAL_URL: &str = "ws://127.0.0.1:7000";

/// Translate the `classical` shorthand; other urls are used verbatim
pub fn resolve_endpoint(url: &str) -> &str {
    if url == CLASSICAL_TOKEN {
        CLASSICAL_URL
    } else {
        url
    }
}
