pub mod ambient_service;
pub mod cover_source;
pub mod decoder;
pub mod palette_cache;
pub mod request_fence;

pub use ambient_service::AmbientService;
pub use cover_source::{CoverSource, HttpCoverSource};
pub use decoder::{decode_base64, decode_cover};
pub use palette_cache::{compute_cache_key, PaletteCache};
pub use request_fence::{RequestFence, Ticket};
