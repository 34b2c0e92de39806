use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use cover_palette::{GenreClassifier, GradientPattern};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AmbientRequest, AmbientResponse, GenreQuery, GenreResponse};
use crate::services::AmbientService;

/// Extract the ambient palette and gradient for a cover
///
/// The cover is taken from `image_base64` when present, otherwise fetched
/// from `image_url`. When neither yields a readable image the genre
/// fallback palette is returned with `fallback: true`.
#[utoipa::path(
    post,
    path = "/api/ambient",
    request_body = AmbientRequest,
    responses(
        (status = 200, description = "Ambient state committed", body = AmbientResponse),
        (status = 400, description = "Missing book_id"),
        (status = 409, description = "A newer request for the same book superseded this one"),
    ),
    tag = "Ambient"
)]
pub async fn handle_extract(
    State(service): State<Arc<AmbientService>>,
    JsonExtractor(request): JsonExtractor<AmbientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        book_id = %request.book_id,
        has_url = request.image_url.is_some(),
        has_inline = request.image_base64.is_some(),
        "Extraction request received"
    );

    let response = service.extract(request).await?;
    Ok(Json(response))
}

/// Current ambient state for a book
#[utoipa::path(
    get,
    path = "/api/ambient/{book_id}",
    responses(
        (status = 200, description = "Last committed state", body = AmbientResponse),
        (status = 404, description = "Nothing extracted for this book yet"),
    ),
    params(
        ("book_id" = String, Path, description = "Book identity used in the extraction request"),
    ),
    tag = "Ambient"
)]
pub async fn handle_current(
    State(service): State<Arc<AmbientService>>,
    Path(book_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let response = service.current(&book_id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(response))
}

/// Genre, gradient pattern and fallback palette for a title/author
#[utoipa::path(
    get,
    path = "/api/genre",
    params(GenreQuery),
    responses(
        (status = 200, description = "Classification result", body = GenreResponse),
    ),
    tag = "Genre"
)]
pub async fn handle_genre(Query(query): Query<GenreQuery>) -> Json<GenreResponse> {
    let title = query.title.as_deref();
    let genre = GenreClassifier::new().classify(title, query.author.as_deref());
    let pattern = GradientPattern::select(genre, title);

    tracing::debug!(%genre, %pattern, "Genre lookup");
    Json(GenreResponse::new(genre, pattern))
}
