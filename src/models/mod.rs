pub mod ambient;
pub mod config;

pub use ambient::{
    AmbientRequest, AmbientResponse, CanvasRequest, GenreQuery, GenreResponse, PaletteView,
};
pub use config::{AppConfig, CacheConfig, CanvasConfig, FetchConfig, SamplingConfig};
