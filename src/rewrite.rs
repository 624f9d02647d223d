// Path rewrite rule for forwarding /api requests to the backend

/// Path prefix reserved for the backend API
pub const API_PREFIX: &str = "/api";

/// Maps `/api/:path*` onto `{destination_base}/api/:path*`.
///
/// Construction is pure: no network I/O, no validation of the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    source_prefix: &'static str,
    destination_base: String,
}

impl RewriteRule {
    pub fn new(destination_base: impl Into<String>) -> Self {
        Self {
            source_prefix: API_PREFIX,
            destination_base: destination_base.into(),
        }
    }

    pub fn source_prefix(&self) -> &str {
        self.source_prefix
    }

    pub fn destination_base(&self) -> &str {
        &self.destination_base
    }

    /// True for the bare prefix and anything below it, never for `/apis` and friends.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.source_prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Destination URL for `path`, or `None` when the rule does not apply.
    pub fn rewrite(&self, path: &str, query: Option<&str>) -> Option<String> {
        if !self.matches(path) {
            return None;
        }

        let query = query
            .filter(|q| !q.is_empty())
            .map(|q| format!("?{}", q))
            .unwrap_or_default();

        Some(format!("{}{}{}", self.destination_base, path, query))
    }
}
