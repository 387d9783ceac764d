pub mod api;
pub mod client;
pub mod genres;

pub use client::JikanClient;
pub use genres::GenreCache;
