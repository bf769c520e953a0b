use std::io::Read;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::error::TransportError;
use crate::{util, Config};

/// Status and unread body of an HTTP response. Any status, including
/// non-success ones, is a response rather than an error.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self { status, body: Box::new(body) }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP GET capability.
///
/// Deadlines and retries are the transport's business; the catalog fetcher
/// issues exactly one `get` per fetch.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a [`ureq::Agent`].
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.bot_name)
            .build();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        log::debug!("GET {} (host {:?})", url, util::get_host(url));
        match self.agent.get(url).call() {
            Ok(response) => Ok(HttpResponse::new(response.status(), response.into_reader())),
            // ureq reports 4xx/5xx as errors; hand them back as responses so
            // the caller sees the status.
            Err(ureq::Error::Status(code, response)) => {
                Ok(HttpResponse::new(code, response.into_reader()))
            }
            Err(ureq::Error::Transport(e)) => {
                log::error!("{}", e);
                Err(TransportError::Ureq(Box::new(e)))
            }
        }
    }
}

/// Retries transport errors and 5xx responses with exponential backoff and
/// random jitter.
pub struct RetryingTransport<T> {
    inner: T,
    max_retries: u32,
    base_delay: Duration,
}

impl<T: Transport> RetryingTransport<T> {
    pub fn new(inner: T, max_retries: u32, base_delay: Duration) -> Self {
        Self { inner, max_retries, base_delay }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.saturating_mul(2u32.saturating_pow(attempt - 1));
        let max_jitter = delay.as_millis() as u64 / 2;
        let jitter = rand::thread_rng().gen_range(0..=max_jitter);
        delay.saturating_add(Duration::from_millis(jitter))
    }
}

impl<T: Transport> Transport for RetryingTransport<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut attempt = 0;
        loop {
            let result = self.inner.get(url);
            let reason = match &result {
                Ok(response) if response.status >= 500 => Some(format!("status {}", response.status)),
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };
            let reason = match reason {
                Some(reason) if attempt < self.max_retries => reason,
                _ => return result,
            };
            attempt += 1;
            let delay = self.backoff(attempt);
            log::warn!(
                "{} failed ({}), retry {}/{} in {:?}",
                url,
                reason,
                attempt,
                self.max_retries,
                delay,
            );
            thread::sleep(delay);
        }
    }
}

/// Transport used when the caller does not supply one.
pub fn default_transport(config: &Config) -> RetryingTransport<UreqTransport> {
    RetryingTransport::new(
        UreqTransport::new(config),
        config.max_retries,
        Duration::from_millis(config.retry_delay_ms),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::{self, Cursor};
    use std::sync::Mutex;

    use super::*;

    /// Replays a fixed script of outcomes, one per call.
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<u16, &'static str>>>,
        calls: Mutex<usize>,
    }

    impl Scripted {
        fn new(outcomes: Vec<Result<u16, &'static str>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl Transport for &Scripted {
        fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            *self.calls.lock().unwrap() += 1;
            match self.outcomes.lock().unwrap().pop_front().expect("script exhausted") {
                Ok(status) => Ok(HttpResponse::new(status, Cursor::new(Vec::new()))),
                Err(msg) => Err(TransportError::Other(msg.to_owned())),
            }
        }
    }

    fn retrying(script: &Scripted, max_retries: u32) -> RetryingTransport<&Scripted> {
        RetryingTransport::new(script, max_retries, Duration::ZERO)
    }

    #[test]
    fn success_is_not_retried() {
        let script = Scripted::new(vec![Ok(200)]);
        let resp = retrying(&script, 3).get("http://x/").unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(script.calls(), 1);
    }

    #[test]
    fn client_errors_are_not_retried() {
        let script = Scripted::new(vec![Ok(404)]);
        let resp = retrying(&script, 3).get("http://x/").unwrap();
        assert_eq!(resp.status, 404);
        assert_eq!(script.calls(), 1);
    }

    #[test]
    fn retries_until_success() {
        let script = Scripted::new(vec![Err("connection reset"), Ok(503), Ok(200)]);
        let resp = retrying(&script, 3).get("http://x/").unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(script.calls(), 3);
    }

    #[test]
    fn gives_up_after_max_retries() {
        let script = Scripted::new(vec![Ok(503), Ok(502), Ok(500)]);
        let resp = retrying(&script, 2).get("http://x/").unwrap();
        assert_eq!(resp.status, 500);
        assert_eq!(script.calls(), 3);

        let script = Scripted::new(vec![Err("dns")]);
        let err = retrying(&script, 0).get("http://x/").err().unwrap();
        assert_eq!(err.to_string(), "dns");
    }

    #[test]
    fn backoff_doubles() {
        let script = Scripted::new(vec![]);
        let t = RetryingTransport::new(&script, 3, Duration::from_millis(100));
        for attempt in 1..=3u32 {
            let base = 100u64 * 2u64.pow(attempt - 1);
            let delay = t.backoff(attempt).as_millis() as u64;
            assert!(delay >= base && delay <= base + base / 2, "attempt {}: {}", attempt, delay);
        }
    }

    #[test]
    fn backoff_saturates_on_huge_delay() {
        let script = Scripted::new(vec![]);
        let t = RetryingTransport::new(&script, 5, Duration::from_millis(u64::MAX));
        for attempt in 1..=5u32 {
            assert!(t.backoff(attempt) >= Duration::from_millis(u64::MAX));
        }
    }

    #[test]
    fn success_range() {
        let ok = HttpResponse::new(204, io::empty());
        assert!(ok.is_success());
        assert!(!HttpResponse::new(301, io::empty()).is_success());
    }
}
