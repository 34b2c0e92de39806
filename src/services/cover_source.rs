use crate::error::FetchError;
use crate::models::FetchConfig;
use async_trait::async_trait;
use reqwest::redirect;
use reqwest::Url;
use std::sync::Arc;

const MAX_REDIRECTS: usize = 10;

/// Trait for retrieving encoded cover bytes
#[async_trait]
pub trait CoverSource: Send + Sync {
    /// Fetch the encoded image at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Which cover URLs may be fetched: http(s) only, optionally restricted to
/// a set of hosts and their subdomains
#[derive(Debug, Clone, Default)]
struct UrlPolicy {
    allowed_hosts: Vec<String>,
}

impl UrlPolicy {
    fn new(allowed_hosts: &[String]) -> Self {
        Self {
            allowed_hosts: allowed_hosts
                .iter()
                .map(|host| host.trim().trim_end_matches('.').to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    fn permits(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        if self.allowed_hosts.is_empty() {
            return true;
        }
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn check(&self, url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::Disallowed(url.to_string()))?;
        if self.permits(&parsed) {
            Ok(parsed)
        } else {
            Err(FetchError::Disallowed(url.to_string()))
        }
    }
}

/// Fetches covers over HTTP(S) with a timeout and a body size cap
pub struct HttpCoverSource {
    client: reqwest::Client,
    max_bytes: usize,
    policy: Arc<UrlPolicy>,
}

impl HttpCoverSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let policy = Arc::new(UrlPolicy::new(&config.allowed_hosts));

        // Redirects are held to the same policy as the requested URL
        let redirect_policy = Arc::clone(&policy);
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cover-ambient/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::custom(move |attempt| {
                if attempt.previous().len() >= MAX_REDIRECTS
                    || !redirect_policy.permits(attempt.url())
                {
                    attempt.stop()
                } else {
                    attempt.follow()
                }
            }))
            .build()?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
            policy,
        })
    }
}

#[async_trait]
impl CoverSource for HttpCoverSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let target = self.policy.check(url)?;
        let mut response = self.client.get(target).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let limit = self.max_bytes;
        if response
            .content_length()
            .is_some_and(|len| len > limit as u64)
        {
            return Err(FetchError::TooLarge { limit });
        }

        // Content-Length may be absent or wrong; enforce the cap while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url, bytes = body.len(), "Fetched cover");
        Ok(body)
    }
}
