//! Page window parsed from raw limit/offset values.
//!
//! Invalid input is coerced rather than rejected so listing endpoints stay
//! usable with sloppy clients.

use serde::de::IgnoredAny;
use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    /// Bools, arrays, objects: treated as absent
    Other(IgnoredAny),
}

impl Scalar {
    fn into_string(self) -> Option<String> {
        match self {
            Scalar::Int(v) => Some(v.to_string()),
            Scalar::Float(v) => Some(v.to_string()),
            Scalar::Text(v) => Some(v),
            Scalar::Other(_) => None,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_string))
}

/// Integer parse that saturates on overflow; `None` for non-integers
fn parse_saturating(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Raw `limit` / `offset` as extracted by the transport layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "lenient_string")]
    pub limit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    /// Clamp into `limit ∈ [1, MAX_PAGE_SIZE]`, `offset ≥ 0`
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }

    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit.and_then(parse_saturating).unwrap_or(DEFAULT_LIMIT);
        let offset = offset.and_then(parse_saturating).unwrap_or(DEFAULT_OFFSET);

        Self::new(limit, offset)
    }

    pub fn from_params(params: &PaginationParams) -> Self {
        Self::parse(params.limit.as_deref(), params.offset.as_deref())
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Reported back to callers; equals the requested limit
    pub fn page_size(&self) -> i64 {
        self.limit
    }
}
