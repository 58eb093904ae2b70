//! Outfit analysis data model

use serde::{Deserialize, Serialize};

/// Prompt sent alongside every uploaded photo.
///
/// The numbered headings are what [`crate::HeadingParser`] keys on.
pub const OUTFIT_PROMPT: &str = "Analyze this outfit and provide a structured response with the following:
1. Description: Overall style and vibe
2. Color Tones: Main colors and their combinations
3. Core Apparel: Main clothing pieces
4. Accessories: Any accessories or additional items
5. Fashion Tips: Styling suggestions and recommendations
6. Similar Items: Suggest 3 similar items that could be found on Nordstrom, including name, brief description, and estimated price range";

/// Free-text summary fields of an outfit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSummary {
    pub description: String,
    pub color_tones: String,
    pub core_apparel: String,
    pub accessories: String,
}

/// A shoppable item similar to something in the photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub product_url: String,
}

impl SuggestedItem {
    /// Create an item whose lookup URLs are derived from its name
    pub fn named(name: impl Into<String>, catalog_search_url: &str) -> Self {
        let name = name.into();
        let url = format!("{}{}", catalog_search_url, slug(&name));
        Self {
            name,
            description: String::new(),
            image_url: url.clone(),
            product_url: url,
        }
    }
}

/// Structured result of one outfit analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitAnalysis {
    pub analysis: StyleSummary,
    pub fashion_tips: Vec<String>,
    pub suggested_items: Vec<SuggestedItem>,
}

/// Lowercase and replace spaces with hyphens
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Silk Wrap Blouse"), "silk-wrap-blouse");
        assert_eq!(slug("tote"), "tote");
    }

    #[test]
    fn test_named_item_urls() {
        let item = SuggestedItem::named("Leather Tote", "https://shop.test/s/");
        assert_eq!(item.image_url, "https://shop.test/s/leather-tote");
        assert_eq!(item.product_url, item.image_url);
        assert!(item.description.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(OutfitAnalysis::default()).unwrap();
        assert!(value["analysis"].get("colorTones").is_some());
        assert!(value["analysis"].get("coreApparel").is_some());
        assert!(value.get("fashionTips").is_some());
        assert!(value.get("suggestedItems").is_some());
    }
}
