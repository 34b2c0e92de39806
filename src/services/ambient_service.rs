use cover_palette::{Analysis, CoverAnalyzer};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ExtractError;
use crate::models::{AmbientRequest, AmbientResponse, AppConfig};
use crate::services::decoder::{decode_base64, decode_cover};
use crate::services::palette_cache::compute_cache_key;
use crate::services::request_fence::Ticket;
use crate::services::{CoverSource, PaletteCache, RequestFence};

/// Owns the extraction pipeline for every book shown by the host.
///
/// One instance serves all requests: it resolves cover bytes, memoizes
/// analyses by image identity and fences concurrent requests per book so a
/// slow, older extraction can never overwrite a newer one.
pub struct AmbientService {
    config: Arc<AppConfig>,
    analyzer: Arc<CoverAnalyzer>,
    source: Arc<dyn CoverSource>,
    cache: PaletteCache,
    fence: RequestFence,
    /// Last committed response per book
    committed: RwLock<HashMap<String, AmbientResponse>>,
}

impl AmbientService {
    pub fn new(config: Arc<AppConfig>, source: Arc<dyn CoverSource>) -> Self {
        Self {
            analyzer: Arc::new(config.analyzer()),
            cache: PaletteCache::new(config.cache.max_entries),
            fence: RequestFence::new(),
            committed: RwLock::new(HashMap::new()),
            config,
            source,
        }
    }

    pub fn analyzer(&self) -> &CoverAnalyzer {
        &self.analyzer
    }

    pub fn cache(&self) -> &PaletteCache {
        &self.cache
    }

    pub fn fence(&self) -> &RequestFence {
        &self.fence
    }

    /// Run an extraction and commit it as the book's current state.
    ///
    /// Cover fetch and decode failures degrade to the genre fallback. The
    /// only failure a well-formed request can see is
    /// [`ExtractError::Superseded`]: a newer request for the same book was
    /// issued while this one was running, and this result was discarded.
    pub async fn extract(&self, request: AmbientRequest) -> Result<AmbientResponse, ExtractError> {
        let book_id = request.book_id.trim();
        if book_id.is_empty() {
            return Err(ExtractError::InvalidRequest(
                "book_id is required".to_string(),
            ));
        }

        let ticket = self.fence.issue(book_id);
        tracing::debug!(book_id, request_id = ticket.request_id, "Extraction started");

        let title = request.title.as_deref();
        let author = request.author.as_deref();

        let (analysis, cached) = match self.resolve_cover(&request).await {
            Some(bytes) => self.analyze_cover(bytes, title, author).await?,
            None => (self.analyzer.analyze(None, title, author), false),
        };

        let canvas = request
            .canvas
            .map(Into::into)
            .unwrap_or_else(|| self.config.default_canvas());
        let gradient = self.analyzer.render_spec(
            &analysis,
            canvas,
            request.accessibility(),
            request.color_scheme.unwrap_or_default(),
        );

        let response = AmbientResponse::new(
            ticket.request_id,
            book_id.to_string(),
            &analysis,
            gradient,
            cached,
        );

        if !self.commit(&ticket, response.clone()).await {
            tracing::info!(
                book_id,
                request_id = ticket.request_id,
                latest = ?self.fence.latest(book_id),
                "Discarding superseded extraction"
            );
            return Err(ExtractError::Superseded {
                book_id: ticket.book_id,
                request_id: ticket.request_id,
            });
        }

        tracing::info!(
            book_id,
            request_id = ticket.request_id,
            genre = %response.genre,
            pattern = %response.pattern,
            fallback = response.fallback,
            cached,
            "Ambient state committed"
        );
        Ok(response)
    }

    /// Last committed state for a book
    pub async fn current(&self, book_id: &str) -> Option<AmbientResponse> {
        self.committed.read().await.get(book_id).cloned()
    }

    /// Encoded cover bytes from the request, if any could be obtained
    async fn resolve_cover(&self, request: &AmbientRequest) -> Option<Vec<u8>> {
        if let Some(payload) = request.image_base64.as_deref() {
            match decode_base64(payload) {
                Ok(bytes) => return Some(bytes),
                Err(e) => {
                    tracing::warn!(book_id = %request.book_id, %e, "Invalid inline cover");
                    return None;
                }
            }
        }

        let url = request.image_url.as_deref()?;
        match self.source.fetch(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(book_id = %request.book_id, url, %e, "Cover fetch failed");
                None
            }
        }
    }

    /// Analyze encoded bytes, consulting the palette cache first.
    ///
    /// Decoding and analysis run on the blocking pool.
    async fn analyze_cover(
        &self,
        bytes: Vec<u8>,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Result<(Analysis, bool), ExtractError> {
        let key = compute_cache_key(&bytes, title, author);
        if let Some(analysis) = self.cache.get(&key) {
            return Ok((analysis, true));
        }

        let analyzer = self.analyzer.clone();
        let title = title.map(str::to_owned);
        let author = author.map(str::to_owned);

        let analysis = tokio::task::spawn_blocking(move || {
            analyzer.analyze_decoded(decode_cover(&bytes), title.as_deref(), author.as_deref())
        })
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))?;

        self.cache.store(key, analysis.clone());
        Ok((analysis, false))
    }

    /// Store `response` if `ticket` is still the newest for its book.
    ///
    /// The fence check and the store happen under the same write lock, so
    /// a stale result cannot slip in after a newer one was committed.
    async fn commit(&self, ticket: &Ticket, response: AmbientResponse) -> bool {
        let mut committed = self.committed.write().await;
        if !self.fence.is_current(ticket) {
            return false;
        }
        committed.insert(ticket.book_id.clone(), response);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use cover_palette::{Genre, PaletteFormula};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tokio::sync::Notify;

    fn png_bytes(pixel: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(32, 48, Rgba(pixel));
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    /// Serves fixed bytes; URLs containing "missing" 404
    struct StaticSource(Vec<u8>);

    #[async_trait]
    impl CoverSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            if url.contains("missing") {
                return Err(FetchError::Status {
                    status: 404,
                    url: url.to_string(),
                });
            }
            Ok(self.0.clone())
        }
    }

    /// Blocks fetches of "slow" until released
    struct GatedSource {
        bytes: Vec<u8>,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CoverSource for GatedSource {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            if url == "slow" {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(self.bytes.clone())
        }
    }

    fn service(source: Arc<dyn CoverSource>) -> AmbientService {
        AmbientService::new(Arc::new(AppConfig::default()), source)
    }

    fn request(book_id: &str, url: Option<&str>, title: Option<&str>) -> AmbientRequest {
        AmbientRequest {
            book_id: book_id.to_string(),
            image_url: url.map(str::to_string),
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_extract_from_url_commits() {
        let service = service(Arc::new(StaticSource(png_bytes([204, 26, 26, 255]))));

        let response = service
            .extract(request("b1", Some("http://covers/b1.png"), Some("Thriller Title")))
            .await
            .unwrap();

        assert_eq!(response.book_id, "b1");
        assert_eq!(response.genre, Genre::Thriller);
        assert!(!response.fallback);
        assert!(!response.cached);
        assert!(response.profile.is_some());

        let current = service.current("b1").await.unwrap();
        assert_eq!(current.request_id, response.request_id);
    }

    #[tokio::test]
    async fn test_second_extract_hits_cache() {
        let service = service(Arc::new(StaticSource(png_bytes([30, 60, 200, 255]))));

        let first = service
            .extract(request("b1", Some("http://covers/b1.png"), None))
            .await
            .unwrap();
        let second = service
            .extract(request("b1", Some("http://covers/b1.png"), None))
            .await
            .unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert!(second.request_id > first.request_id);
        assert_eq!(first.palette.hex, second.palette.hex);
        assert_eq!(service.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_inline_base64_cover() {
        let service = service(Arc::new(StaticSource(Vec::new())));
        let mut req = request("b1", None, None);
        req.image_base64 = Some(STANDARD.encode(png_bytes([250, 250, 250, 255])));

        let response = service.extract(req).await.unwrap();

        assert!(!response.fallback);
        assert_eq!(response.palette.formula, PaletteFormula::WhiteCover);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_genre_palette() {
        let service = service(Arc::new(StaticSource(Vec::new())));

        let response = service
            .extract(request("b1", Some("http://covers/missing.png"), Some("Dune")))
            .await
            .unwrap();

        assert!(response.fallback);
        assert_eq!(response.genre, Genre::SciFi);
        assert_eq!(response.palette.formula, PaletteFormula::GenreFallback);
    }

    #[tokio::test]
    async fn test_undecodable_cover_degrades() {
        let service = service(Arc::new(StaticSource(b"not an image".to_vec())));

        let response = service
            .extract(request("b1", Some("http://covers/b1.png"), None))
            .await
            .unwrap();

        assert!(response.fallback);
        assert!(response.profile.is_none());
    }

    #[tokio::test]
    async fn test_invalid_base64_degrades() {
        let service = service(Arc::new(StaticSource(Vec::new())));
        let mut req = request("b1", None, Some("Emma"));
        req.image_base64 = Some("%%%".to_string());

        let response = service.extract(req).await.unwrap();
        assert!(response.fallback);
    }

    #[tokio::test]
    async fn test_blank_book_id_rejected() {
        let service = service(Arc::new(StaticSource(Vec::new())));
        let err = service.extract(request("  ", None, None)).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let source = Arc::new(GatedSource {
            bytes: png_bytes([40, 160, 60, 255]),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let service = Arc::new(service(source.clone()));

        let slow = {
            let service = service.clone();
            tokio::spawn(async move { service.extract(request("book", Some("slow"), None)).await })
        };
        source.entered.notified().await;

        let fast = service
            .extract(request("book", Some("fast"), None))
            .await
            .unwrap();

        source.release.notify_one();
        let stale = slow.await.unwrap();

        match stale {
            Err(ExtractError::Superseded { book_id, request_id }) => {
                assert_eq!(book_id, "book");
                assert!(request_id < fast.request_id);
            }
            other => panic!("expected Superseded, got {other:?}"),
        }
        let current = service.current("book").await.unwrap();
        assert_eq!(current.request_id, fast.request_id);
    }

    #[tokio::test]
    async fn test_books_do_not_fence_each_other() {
        let service = service(Arc::new(StaticSource(png_bytes([200, 120, 20, 255]))));

        let a = service.extract(request("a", Some("u"), None)).await.unwrap();
        let b = service.extract(request("b", Some("u"), None)).await.unwrap();

        assert_eq!(service.current("a").await.unwrap().request_id, a.request_id);
        assert_eq!(service.current("b").await.unwrap().request_id, b.request_id);
        assert!(service.current("c").await.is_none());
    }
}
