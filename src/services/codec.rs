// src/services/codec.rs

//! Attribute decoders.
//!
//! The alt attribute of a product thumbnail encodes three pipe-delimited
//! segments, `name | category | brand`. Image tags carry their reference
//! in a lazy-load attribute or the plain source attribute.

use scraper::ElementRef;
use thiserror::Error;

/// Lazy-load source attribute, preferred over `src` when present.
const LAZY_SRC_ATTR: &str = "data-src";
const SRC_ATTR: &str = "src";

/// Accepted image reference suffixes, matched case-insensitively.
const VALID_IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Canonical product fields decoded from a thumbnail alt attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltFields {
    pub name: String,
    pub category: String,
    pub brand: String,
}

/// Alt attribute with fewer than the three expected segments.
///
/// Carries the segments that were present so callers can keep the record
/// and substitute empty strings for the rest.
#[derive(Debug, Clone, Error)]
#[error("alt attribute has {segments} of 3 expected segments")]
pub struct MalformedAlt {
    pub segments: usize,
    pub partial: AltFields,
}

/// Decode `name | category | brand` from an alt attribute value.
///
/// Segments are trimmed of surrounding whitespace; segments beyond the
/// third are ignored. Fewer than three segments is an error carrying the
/// partially decoded fields.
pub fn decode_alt(alt: &str) -> Result<AltFields, MalformedAlt> {
    let mut segments = alt.split('|').map(str::trim);
    let fields = AltFields {
        name: segments.next().unwrap_or("").to_string(),
        category: segments.next().unwrap_or("").to_string(),
        brand: segments.next().unwrap_or("").to_string(),
    };

    let count = alt.split('|').count();
    if count < 3 {
        Err(MalformedAlt {
            segments: count,
            partial: fields,
        })
    } else {
        Ok(fields)
    }
}

/// Decode an image reference from an `img` element.
///
/// Prefers the lazy-load attribute over the source attribute and accepts
/// the result only if it ends with an allowed extension. Anything else is
/// dropped, never substituted.
pub fn decode_image_src(element: ElementRef<'_>) -> Option<String> {
    let src = element
        .value()
        .attr(LAZY_SRC_ATTR)
        .or_else(|| element.value().attr(SRC_ATTR))?;

    let lowered = src.to_ascii_lowercase();
    VALID_IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lowered.ends_with(ext))
        .then(|| src.to_string())
}
