use reqwest::header::HeaderMap;

/// Rate-limit headroom as reported by response headers. Logged only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimitStatus {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Unix timestamp at which the window resets.
    pub reset: Option<u64>,
}

impl RateLimitStatus {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_number(headers, "x-ratelimit-limit"),
            remaining: header_number(headers, "x-ratelimit-remaining"),
            reset: header_number(headers, "x-ratelimit-reset"),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Seconds until the window resets, measured from `now` (unix seconds).
    pub fn seconds_until_reset(&self, now: u64) -> u64 {
        self.reset.map(|r| r.saturating_sub(now)).unwrap_or(0)
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("5000"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000060"));

        let status = RateLimitStatus::from_headers(&headers);
        assert_eq!(status.limit, Some(5000));
        assert!(status.is_exhausted());
        assert_eq!(status.seconds_until_reset(1_700_000_000), 60);
        assert_eq!(status.seconds_until_reset(1_800_000_000), 0);
    }

    #[test]
    fn test_missing_headers() {
        let status = RateLimitStatus::from_headers(&HeaderMap::new());
        assert_eq!(status, RateLimitStatus::default());
        assert!(!status.is_exhausted());
    }
}
