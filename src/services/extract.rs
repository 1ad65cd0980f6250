// src/services/extract.rs

//! Per-item record extraction.
//!
//! Listing items are parsed synchronously into owned [`ListingItem`]s
//! first; the detail fetch and final assembly happen afterwards so no
//! document handle outlives its page. Every item with an anchor yields
//! exactly one record, whatever happens to its detail page.

use scraper::Html;
use url::Url;

use crate::models::{NO_DESCRIPTION, ProductRecord};
use crate::services::codec::{AltFields, decode_alt, decode_image_src};
use crate::services::fetcher::PageFetcher;
use crate::services::locate::Selectors;
use crate::utils::resolve_url;

/// Listing-side fields of one product item, captured before any detail fetch.
#[derive(Debug, Clone)]
pub struct ListingItem {
    /// 1-based position among anchored items on the listing page
    pub id: u32,

    /// Detail link exactly as found in the anchor
    pub href: String,

    /// `href` resolved against the listing URL, used for the detail fetch
    pub detail_url: String,

    /// Thumbnail reference (empty when absent or filtered out)
    pub thumbnail: String,

    /// Fields decoded from the thumbnail alt attribute
    pub fields: AltFields,
}

/// Items parsed from one listing page, with per-page counters.
#[derive(Debug, Default)]
pub struct ListingParse {
    pub items: Vec<ListingItem>,
    pub item_total: usize,
    pub dropped_items: usize,
    pub malformed_attributes: usize,
}

/// Parse all product items out of a listing document.
///
/// Items without an anchor (or without an href on it) are dropped with a
/// notice. Every other field is freshly resolved per item; nothing carries
/// over from a previous iteration.
pub fn parse_listing(document: &Html, base: &Url, selectors: &Selectors) -> ListingParse {
    let mut parse = ListingParse::default();

    for element in document.select(&selectors.item) {
        parse.item_total += 1;

        let href = element
            .select(&selectors.anchor)
            .next()
            .and_then(|a| a.value().attr("href"));
        let Some(href) = href else {
            log::warn!("No anchor found in listing item, skipping");
            parse.dropped_items += 1;
            continue;
        };

        let thumbnail_elem = element.select(&selectors.thumbnail).next();

        let fields = match thumbnail_elem.and_then(|img| img.value().attr("alt")) {
            Some(alt) => decode_alt(alt).unwrap_or_else(|e| {
                log::warn!("Malformed alt attribute {alt:?}: {e}");
                parse.malformed_attributes += 1;
                e.partial
            }),
            None => {
                log::warn!("No thumbnail alt attribute in listing item");
                parse.malformed_attributes += 1;
                AltFields::default()
            }
        };

        let thumbnail = thumbnail_elem.and_then(decode_image_src).unwrap_or_default();

        parse.items.push(ListingItem {
            id: parse.items.len() as u32 + 1,
            href: href.to_string(),
            detail_url: resolve_url(base, href),
            thumbnail,
            fields,
        });
    }

    parse
}

/// Assembles final records by enriching listing items with detail pages.
pub struct ProductExtractor<'a> {
    fetcher: &'a PageFetcher,
    selectors: &'a Selectors,
}

impl<'a> ProductExtractor<'a> {
    pub fn new(fetcher: &'a PageFetcher, selectors: &'a Selectors) -> Self {
        Self { fetcher, selectors }
    }

    /// Fetch the item's detail page and assemble its record.
    ///
    /// An unreachable detail page degrades the description and gallery to
    /// their fallbacks; the record is still produced. The returned flag
    /// reports whether the detail fetch failed.
    pub async fn assemble(&self, item: ListingItem) -> (ProductRecord, bool) {
        let (description, mut product_images, detail_failed) =
            match self.fetcher.fetch(&item.detail_url).await {
                Ok(document) => (
                    self.description(&document),
                    self.gallery(&document),
                    false,
                ),
                Err(e) => {
                    log::warn!("Failed to fetch detail page {}: {e}", item.detail_url);
                    (NO_DESCRIPTION.to_string(), Vec::new(), true)
                }
            };

        // The thumbnail reference goes last in the gallery.
        if !item.thumbnail.is_empty() {
            product_images.push(item.thumbnail.clone());
        }

        let record = ProductRecord {
            id: item.id,
            href: item.href,
            thumbnail: item.thumbnail,
            name: item.fields.name,
            product_images,
            description,
            brand: item.fields.brand,
            category: item.fields.category,
        };
        (record, detail_failed)
    }

    /// First description span's text, or the sentinel when none matches.
    fn description(&self, document: &Html) -> String {
        document
            .select(&self.selectors.description)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }

    /// Gallery image references in document order, extension-filtered.
    fn gallery(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selectors.gallery)
            .filter_map(decode_image_src)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::SelectorConfig;

    use super::*;

    fn selectors() -> Selectors {
        Selectors::from_config(&SelectorConfig::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://shop.example/catalog/shoes").unwrap()
    }

    #[test]
    fn anchored_items_get_sequential_ids() {
        let document = Html::parse_document(
            r#"<ul>
                <li class="product-overview"><a href="/p/1">one</a></li>
                <li class="product-overview"><a href="/p/2">two</a></li>
                <li class="product-overview"><a href="/p/3">three</a></li>
            </ul>"#,
        );

        let parse = parse_listing(&document, &base(), &selectors());
        let ids: Vec<_> = parse.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(parse.item_total, 3);
        assert_eq!(parse.dropped_items, 0);
    }

    #[test]
    fn item_without_anchor_is_dropped() {
        let document = Html::parse_document(
            r#"<ul>
                <li class="product-overview"><a href="/p/1">one</a></li>
                <li class="product-overview"><span>no link</span></li>
                <li class="product-overview"><a href="/p/3">three</a></li>
            </ul>"#,
        );

        let parse = parse_listing(&document, &base(), &selectors());
        assert_eq!(parse.dropped_items, 1);
        let hrefs: Vec<_> = parse.items.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/p/1", "/p/3"]);
        // Ids count anchored items only.
        assert_eq!(parse.items[1].id, 2);
    }

    #[test]
    fn detail_url_is_resolved_against_listing() {
        let document = Html::parse_document(
            r#"<li class="product-overview"><a href="/p/9">nine</a></li>"#,
        );

        let parse = parse_listing(&document, &base(), &selectors());
        assert_eq!(parse.items[0].href, "/p/9");
        assert_eq!(parse.items[0].detail_url, "https://shop.example/p/9");
    }

    #[test]
    fn fields_decode_from_thumbnail_alt() {
        let document = Html::parse_document(
            r#"<li class="product-overview">
                <a href="/p/1">one</a>
                <img alt="Red Shoe | Footwear | Acme" src="/thumb.jpg">
            </li>"#,
        );

        let parse = parse_listing(&document, &base(), &selectors());
        let item = &parse.items[0];
        assert_eq!(item.fields.name, "Red Shoe");
        assert_eq!(item.fields.category, "Footwear");
        assert_eq!(item.fields.brand, "Acme");
        assert_eq!(item.thumbnail, "/thumb.jpg");
        assert_eq!(parse.malformed_attributes, 0);
    }

    #[test]
    fn missing_thumbnail_never_inherits_previous_item() {
        let document = Html::parse_document(
            r#"<ul>
                <li class="product-overview">
                    <a href="/p/1">one</a>
                    <img alt="Red Shoe | Footwear | Acme" src="/thumb.jpg">
                </li>
                <li class="product-overview"><a href="/p/2">two</a></li>
            </ul>"#,
        );

        let parse = parse_listing(&document, &base(), &selectors());
        let second = &parse.items[1];
        assert_eq!(second.fields, AltFields::default());
        assert_eq!(second.thumbnail, "");
        assert_eq!(parse.malformed_attributes, 1);
    }

    #[test]
    fn non_matching_thumbnail_extension_leaves_reference_empty() {
        let document = Html::parse_document(
            r#"<li class="product-overview">
                <a href="/p/1">one</a>
                <img alt="A | B | C" src="/thumb.webp">
            </li>"#,
        );

        let parse = parse_listing(&document, &base(), &selectors());
        assert_eq!(parse.items[0].thumbnail, "");
        assert_eq!(parse.items[0].fields.name, "A");
    }
}
