//! Origin allow-list and the CORS header set attached to every response.
//!
//! Disallowed origins get an empty `Access-Control-Allow-Origin` value
//! rather than a 403: the relay still answers, and the browser refuses to
//! expose the reply to script.

pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
pub const ALLOW_METHODS: &str = "access-control-allow-methods";
pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
pub const MAX_AGE: &str = "access-control-max-age";

pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";
pub const MAX_AGE_SECS: &str = "86400";

/// Origin sent by browsers for pages opened from a local file.
const NULL_ORIGIN: &str = "null";

/// Allow-list computed once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    allow_any: bool,
    allow_null: bool,
    origins: Vec<String>,
}

impl OriginPolicy {
    /// Parse a comma-separated allow-list. A blank list allows everything.
    pub fn from_list(list: &str) -> Self {
        let entries: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();

        if entries.is_empty() {
            return Self::allow_all();
        }

        Self {
            allow_any: entries.iter().any(|e| e == "*"),
            allow_null: entries.iter().any(|e| e == NULL_ORIGIN),
            origins: entries
                .into_iter()
                .filter(|e| e != "*" && e != NULL_ORIGIN)
                .collect(),
        }
    }

    pub fn allow_all() -> Self {
        Self {
            allow_any: true,
            allow_null: true,
            origins: Vec::new(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        if self.allow_any {
            return true;
        }
        if origin == NULL_ORIGIN {
            return self.allow_null;
        }
        self.origins.iter().any(|o| o == origin)
    }

    /// Value for `Access-Control-Allow-Origin`.
    ///
    /// Allowed origins are echoed verbatim; callers without an `Origin`
    /// header (not a browser) get `*`; everything else gets an empty value.
    pub fn allow_origin_value(&self, origin: Option<&str>) -> String {
        match origin {
            None | Some("") => "*".to_string(),
            Some(origin) if self.is_allowed(origin) => origin.to_string(),
            Some(_) => String::new(),
        }
    }

    /// Full header set for a response to a request with the given origin.
    pub fn headers(&self, origin: Option<&str>) -> CorsHeaders {
        CorsHeaders {
            allow_origin: self.allow_origin_value(origin),
        }
    }
}

/// CORS headers for one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_origin: String,
}

impl CorsHeaders {
    /// Header name/value pairs in a fixed order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (ALLOW_ORIGIN, self.allow_origin.as_str()),
            (ALLOW_METHODS, ALLOWED_METHODS),
            (ALLOW_HEADERS, ALLOWED_HEADERS),
            (MAX_AGE, MAX_AGE_SECS),
        ]
    }
}
