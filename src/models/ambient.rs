use chrono::{DateTime, Utc};
use cover_palette::{
    AccessibilitySettings, Analysis, CanvasSize, ColorScheme, CoverProfile, Genre, GradientPattern,
    GradientSpec, Palette, PaletteFormula, Rgb, Temperature,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for ambient extraction
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AmbientRequest {
    /// Identity of the book whose cover is being shown
    pub book_id: String,

    /// Cover image URL, fetched by the server
    #[serde(default)]
    pub image_url: Option<String>,

    /// Base64-encoded cover image; takes precedence over `image_url`
    #[serde(default)]
    pub image_base64: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Target canvas; the configured default when absent
    #[serde(default)]
    pub canvas: Option<CanvasRequest>,

    /// "light" (default) or "dark"
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub color_scheme: Option<ColorScheme>,

    #[serde(default)]
    pub reduce_transparency: bool,

    #[serde(default)]
    pub differentiate_without_color: bool,
}

impl AmbientRequest {
    pub fn accessibility(&self) -> AccessibilitySettings {
        AccessibilitySettings {
            reduce_transparency: self.reduce_transparency,
            differentiate_without_color: self.differentiate_without_color,
        }
    }
}

/// Canvas size in points
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct CanvasRequest {
    pub width: f64,
    pub height: f64,
}

impl From<CanvasRequest> for CanvasSize {
    fn from(c: CanvasRequest) -> Self {
        CanvasSize::new(c.width, c.height)
    }
}

/// Palette as served over the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaletteView {
    /// RGB in 0..1
    #[schema(value_type = Vec<f64>)]
    pub primary: Rgb,
    #[schema(value_type = Vec<f64>)]
    pub secondary: Rgb,
    #[schema(value_type = Vec<f64>)]
    pub tertiary: Rgb,
    #[schema(value_type = Vec<f64>)]
    pub accent: Rgb,
    #[schema(value_type = Vec<f64>)]
    pub highlight: Rgb,
    /// The five role colors as #RRGGBB, in role order
    pub hex: Vec<String>,
    /// Per-role layer opacity, in role order
    pub layer_opacity: Vec<f64>,
    pub is_monochrome: bool,
    pub dominant_hue: f64,
    #[schema(value_type = String)]
    pub temperature: Temperature,
    #[schema(value_type = String)]
    pub formula: PaletteFormula,
}

impl From<&Palette> for PaletteView {
    fn from(p: &Palette) -> Self {
        let [primary, secondary, tertiary, accent, highlight] = p.rgb();
        Self {
            primary,
            secondary,
            tertiary,
            accent,
            highlight,
            hex: p.rgb().iter().map(|c| c.to_hex()).collect(),
            layer_opacity: p.layer_opacity.to_vec(),
            is_monochrome: p.is_monochrome,
            dominant_hue: p.dominant_hue,
            temperature: p.temperature,
            formula: p.formula,
        }
    }
}

/// Response for a completed extraction
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmbientResponse {
    /// Fencing token; higher ids supersede lower ones for the same book
    pub request_id: u64,
    pub book_id: String,
    #[schema(value_type = String)]
    pub genre: Genre,
    #[schema(value_type = String)]
    pub pattern: GradientPattern,
    /// Cover statistics; null when the cover could not be read
    #[schema(value_type = Option<Object>)]
    pub profile: Option<CoverProfile>,
    pub palette: PaletteView,
    /// Orbs, stops, blend modes and composition parameters
    #[schema(value_type = Object)]
    pub gradient: GradientSpec,
    /// True when the genre fallback palette was used
    pub fallback: bool,
    /// True when the analysis came from the palette cache
    pub cached: bool,
    #[schema(value_type = String)]
    pub generated_at: DateTime<Utc>,
}

impl AmbientResponse {
    pub fn new(
        request_id: u64,
        book_id: String,
        analysis: &Analysis,
        gradient: GradientSpec,
        cached: bool,
    ) -> Self {
        Self {
            request_id,
            book_id,
            genre: analysis.genre,
            pattern: analysis.pattern,
            profile: analysis.profile,
            palette: PaletteView::from(&analysis.palette),
            gradient,
            fallback: analysis.is_fallback(),
            cached,
            generated_at: Utc::now(),
        }
    }
}

/// Query for the genre preview endpoint
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenreQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Genre, pattern and fallback palette for a title/author
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreResponse {
    #[schema(value_type = String)]
    pub genre: Genre,
    #[schema(value_type = String)]
    pub pattern: GradientPattern,
    /// The genre's four fallback colors as #RRGGBB
    pub fallback_colors: Vec<String>,
    /// The genre's mood color as #RRGGBB
    pub mood_color: String,
    pub palette: PaletteView,
}

impl GenreResponse {
    pub fn new(genre: Genre, pattern: GradientPattern) -> Self {
        Self {
            genre,
            pattern,
            fallback_colors: genre.fallback_palette().iter().map(|c| c.to_hex()).collect(),
            mood_color: genre.mood_color().to_hex(),
            palette: PaletteView::from(&Palette::for_genre(genre)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: AmbientRequest = serde_json::from_str(r#"{"book_id": "b1"}"#).unwrap();

        assert_eq!(request.book_id, "b1");
        assert!(request.image_url.is_none());
        assert!(request.color_scheme.is_none());
        assert_eq!(request.accessibility(), AccessibilitySettings::default());
    }

    #[test]
    fn test_request_full() {
        let request: AmbientRequest = serde_json::from_str(
            r#"{
                "book_id": "b1",
                "image_url": "http://covers/b1.png",
                "title": "Dune",
                "canvas": {"width": 800, "height": 600},
                "color_scheme": "dark",
                "reduce_transparency": true
            }"#,
        )
        .unwrap();

        assert_eq!(request.color_scheme, Some(ColorScheme::Dark));
        assert!(request.accessibility().reduce_transparency);
        let canvas: CanvasSize = request.canvas.unwrap().into();
        assert_eq!(canvas.width, 800.0);
    }

    #[test]
    fn test_palette_view_serialization() {
        let view = PaletteView::from(&Palette::for_genre(Genre::Romance));
        let json = serde_json::to_value(&view).unwrap();

        assert!(json["primary"].is_array());
        assert_eq!(json["primary"].as_array().unwrap().len(), 3);
        assert_eq!(json["hex"].as_array().unwrap().len(), 5);
        assert_eq!(json["formula"], "genre-fallback");
        assert!(json["temperature"].is_string());
    }

    #[test]
    fn test_genre_response() {
        let response = GenreResponse::new(Genre::SciFi, GradientPattern::RadialBurst);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["genre"], "sci-fi");
        assert_eq!(json["pattern"], "radial-burst");
        assert_eq!(json["fallback_colors"].as_array().unwrap().len(), 4);
        assert_eq!(json["fallback_colors"][0], "#00ACC1");
    }
}
