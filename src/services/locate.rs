// src/services/locate.rs

//! Pre-parsed CSS selectors for the configured product markup.
//!
//! Selectors are built once at startup; a class name that does not form a
//! valid selector is a configuration error, raised before any fetch.
//! Matching is tag kind + class membership, in document order. An empty
//! match set is a normal outcome, not a fault.

use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::SelectorConfig;

/// Selector set used across listing and detail pages.
pub struct Selectors {
    /// Product item elements on a listing page
    pub item: Selector,

    /// Anchor within a listing item
    pub anchor: Selector,

    /// Thumbnail image within a listing item
    pub thumbnail: Selector,

    /// Description span on a detail page
    pub description: Selector,

    /// Gallery images on a detail page
    pub gallery: Selector,
}

impl Selectors {
    /// Build the selector set from configured class names.
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            item: parse_selector(&format!("li.{}", config.item_class))?,
            anchor: parse_selector("a")?,
            thumbnail: parse_selector("img")?,
            description: parse_selector(&format!("span.{}", config.description_class))?,
            gallery: parse_selector(&format!("img.{}", config.image_class))?,
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn builds_from_default_config() {
        assert!(Selectors::from_config(&SelectorConfig::default()).is_ok());
    }

    #[test]
    fn rejects_malformed_class_name() {
        let config = SelectorConfig {
            item_class: "[[invalid".to_string(),
            ..SelectorConfig::default()
        };
        assert!(Selectors::from_config(&config).is_err());
    }

    #[test]
    fn matches_by_class_membership_in_document_order() {
        let selectors = Selectors::from_config(&SelectorConfig::default()).unwrap();
        let document = Html::parse_document(
            r#"<ul>
                <li class="product-overview first"><a href="/a">A</a></li>
                <li class="unrelated">skip</li>
                <li class="second product-overview"><a href="/b">B</a></li>
            </ul>"#,
        );

        let hrefs: Vec<_> = document
            .select(&selectors.item)
            .filter_map(|item| item.select(&selectors.anchor).next())
            .filter_map(|a| a.value().attr("href"))
            .collect();
        assert_eq!(hrefs, vec!["/a", "/b"]);
    }

    #[test]
    fn empty_match_set_is_not_an_error() {
        let selectors = Selectors::from_config(&SelectorConfig::default()).unwrap();
        let document = Html::parse_document("<div>no products here</div>");
        assert_eq!(document.select(&selectors.item).count(), 0);
    }
}
