//! CLI command implementations

mod config_management;
mod link_management;

pub use config_management::config_generate;
pub use link_management::{
    check_expiry, parse_meta_pairs, render_embed, resolve_link, show_metadata, shorten_link,
    update_link,
};
