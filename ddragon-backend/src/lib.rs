mod api;
mod catalog;
mod client;
mod config;
mod errors;
mod selector;
mod text;
mod uri;

pub use api::Image;
pub use api::champions::Champion;
pub use api::items::{BOOTS_MIN_GOLD, Gold, Item, LEGENDARY_MIN_DEPTH, LEGENDARY_MIN_GOLD};
pub use api::runes::{Rune, RuneSlot, RuneTree};
pub use catalog::Catalog;
pub use client::{DDragonClient, default_client};
pub use config::{DDragonConfig, DEFAULT_BASE_URL, DEFAULT_LOCALE, FALLBACK_VERSION, SUMMONERS_RIFT};
pub use errors::{Category, DDragonError, Result};
pub use selector::{Build, MAX_LEGENDARY_ITEMS, select_build};
pub use text::strip_markup;
pub use uri::DDragonUri;
