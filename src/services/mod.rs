// src/services/mod.rs

//! Scraping services: fetching, element location, attribute decoding,
//! and per-item record extraction.

pub mod codec;
pub mod extract;
pub mod fetcher;
pub mod locate;

pub use codec::{AltFields, MalformedAlt, decode_alt, decode_image_src};
pub use extract::{ListingParse, ProductExtractor, parse_listing};
pub use fetcher::PageFetcher;
pub use locate::Selectors;
