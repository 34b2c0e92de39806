pub mod ambient;

pub use ambient::{__path_handle_current, __path_handle_extract, __path_handle_genre};
pub use ambient::{handle_current, handle_extract, handle_genre};
