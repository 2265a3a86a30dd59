// crates/shipping-rpc/src/context.rs
//
// Per-call context handed to every service operation.
//
// Carries the caller's deadline, taken from the standard `grpc-timeout`
// request header. Operations check it before touching the repository so an
// expired call never appends.

use std::time::{Duration, Instant};

use http::HeaderMap;

use shipping_core::error::ShippingError;

/// Header carrying the client's remaining time budget.
pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Cancellation/deadline information for a single RPC call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context with no deadline.
    pub fn background() -> Self {
        Self { deadline: None }
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Build a context from request headers.
    ///
    /// A missing or malformed `grpc-timeout` header yields a context with no
    /// deadline.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let timeout = headers
            .get(GRPC_TIMEOUT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_grpc_timeout);

        match timeout {
            Some(t) => Self::with_timeout(t),
            None => Self::background(),
        }
    }

    /// Whether the deadline has already passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail with `DeadlineExceeded` if the call is no longer wanted.
    pub fn check(&self) -> Result<(), ShippingError> {
        if self.is_expired() {
            return Err(ShippingError::DeadlineExceeded);
        }
        Ok(())
    }
}

/// Parse a `grpc-timeout` value: up to 8 ASCII digits followed by one unit
/// character (`H`, `M`, `S`, `m`, `u`, `n`).
pub fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let duration = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_parse_grpc_timeout_units() {
        assert_eq!(parse_grpc_timeout("2H"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_grpc_timeout("3M"), Some(Duration::from_secs(180)));
        assert_eq!(parse_grpc_timeout("10S"), Some(Duration::from_secs(10)));
        assert_eq!(parse_grpc_timeout("250m"), Some(Duration::from_millis(250)));
        assert_eq!(parse_grpc_timeout("7u"), Some(Duration::from_micros(7)));
        assert_eq!(parse_grpc_timeout("99n"), Some(Duration::from_nanos(99)));
    }

    #[test]
    fn test_parse_grpc_timeout_rejects_malformed() {
        assert_eq!(parse_grpc_timeout(""), None);
        assert_eq!(parse_grpc_timeout("S"), None);
        assert_eq!(parse_grpc_timeout("10"), None);
        assert_eq!(parse_grpc_timeout("10x"), None);
        assert_eq!(parse_grpc_timeout("-5S"), None);
        assert_eq!(parse_grpc_timeout("123456789S"), None);
        assert_eq!(parse_grpc_timeout("5\u{e9}"), None);
    }

    #[test]
    fn test_background_context_never_expires() {
        let ctx = CallContext::background();
        assert!(ctx.deadline.is_none());
        assert!(!ctx.is_expired());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_expired() {
        let ctx = CallContext::with_timeout(Duration::ZERO);
        assert!(ctx.is_expired());
        assert!(matches!(ctx.check(), Err(ShippingError::DeadlineExceeded)));
    }

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(CallContext::from_headers(&headers).deadline.is_none());

        headers.insert(GRPC_TIMEOUT_HEADER, HeaderValue::from_static("30S"));
        let ctx = CallContext::from_headers(&headers);
        assert!(ctx.deadline.is_some());
        assert!(!ctx.is_expired());

        headers.insert(GRPC_TIMEOUT_HEADER, HeaderValue::from_static("soon"));
        assert!(CallContext::from_headers(&headers).deadline.is_none());
    }
}
