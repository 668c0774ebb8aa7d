use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::RETRY_AFTER, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter shared by the search routes. Health checks are not
/// counted.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<Window>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(Window {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }

    #[must_use]
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Counts one request against the current window.
    ///
    /// Returns the time left in the window when the budget is spent.
    async fn try_acquire(&self) -> Result<(), Duration> {
        let mut current = self.current.lock().await;
        let elapsed = current.started_at.elapsed();

        if elapsed >= self.window {
            current.started_at = Instant::now();
            current.count = 0;
        } else if current.count >= self.max_requests {
            return Err(self.window - elapsed);
        }

        current.count += 1;
        Ok(())
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// A caller-supplied `x-request-id` is reused when it is short printable
/// ASCII; otherwise a new `UUIDv4` is generated. The ID is stored as a
/// [`RequestId`] extension and echoed on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    res
}

/// Rejects requests over the window budget with 429 and `Retry-After`.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    match rate_limit.try_acquire().await {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            let request_id = req
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.clone())
                .unwrap_or_default();
            tracing::warn!(%request_id, retry_after_secs = retry_after.as_secs(), "rate limit exceeded");

            let mut res =
                ApiError::new(request_id, "rate_limited", "rate limit exceeded").into_response();
            // Round up so clients never retry inside the same window.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            res.headers_mut().insert(RETRY_AFTER, HeaderValue::from(secs));
            res
        }
    }
}
