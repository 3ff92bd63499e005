//! Paging parameters shared by the list endpoints

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page size used when `limit` is missing, zero or unparsable
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a caller may request
pub const MAX_LIMIT: u64 = 100;

/// Clamped `limit`/`skip` pair
///
/// `limit` lies in `[1, MAX_LIMIT]`, `skip` in `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub limit: u64,
    pub skip: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl PageParams {
    /// Clamp already-parsed values
    pub fn new(limit: Option<i64>, skip: Option<i64>) -> Self {
        let limit = match limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(l) => l.clamp(1, MAX_LIMIT as i64) as u64,
        };
        let skip = skip.unwrap_or(0).max(0) as u64;
        Self { limit, skip }
    }

    /// Parse raw query-string values
    ///
    /// Anything that is not a finite number falls back to the default, and
    /// fractional values are truncated.
    pub fn from_raw(limit: Option<&str>, skip: Option<&str>) -> Self {
        Self::new(limit.and_then(parse_number), skip.and_then(parse_number))
    }

    /// Index range of this page within a sequence of `total` items
    ///
    /// Empty when `skip` is past the end.
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = usize::try_from(self.skip).unwrap_or(usize::MAX).min(total);
        let end = start
            .saturating_add(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .min(total);
        start..end
    }
}

fn parse_number(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageParams::new(None, None).limit, DEFAULT_LIMIT);
        assert_eq!(PageParams::new(Some(0), None).limit, DEFAULT_LIMIT);
        assert_eq!(PageParams::new(Some(-4), None).limit, 1);
        assert_eq!(PageParams::new(Some(500), None).limit, MAX_LIMIT);
        assert_eq!(PageParams::new(Some(25), None).limit, 25);
    }

    #[test]
    fn skip_is_never_negative() {
        assert_eq!(PageParams::new(None, Some(-10)).skip, 0);
        assert_eq!(PageParams::new(None, Some(30)).skip, 30);
    }

    #[test]
    fn raw_values_fall_back_to_defaults() {
        let params = PageParams::from_raw(Some("abc"), Some("NaN"));
        assert_eq!(params, PageParams::default());

        let params = PageParams::from_raw(Some("12.9"), Some(" 20 "));
        assert_eq!(params, PageParams { limit: 12, skip: 20 });
    }

    #[test]
    fn window_slices_within_bounds() {
        let params = PageParams { limit: 10, skip: 10 };
        assert_eq!(params.window(15), 10..15);
        assert_eq!(params.window(5), 5..5);
        assert_eq!(PageParams::default().window(3), 0..3);
    }
}
