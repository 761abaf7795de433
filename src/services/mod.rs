//! Pure services used by the hosting layer
//!
//! - `embed`: social-preview redirect page rendering
//! - `expiry`: expiry detection for signed Instagram CDN links

pub mod embed;
pub mod expiry;

pub use embed::{EmbedData, escape_html, generate_embed_html};
pub use expiry::{is_instagram_url_expired, is_instagram_url_expired_at};
