//! Heading-based parser for free-text vision model replies
//!
//! The model is asked for six numbered sections but its phrasing is not
//! guaranteed. This parser splits on markdown `###` headings and classifies
//! each section by keyword or ordinal. It is a heuristic, kept behind
//! [`ResponseParser`] so callers do not depend on its details.

use tracing::debug;

use crate::outfit::{OutfitAnalysis, SuggestedItem};

/// Base URL that item slugs are appended to
pub const CATALOG_SEARCH_URL: &str = "https://www.nordstrom.com/s/";

const SECTION_MARKER: &str = "###";
const PRICE_MARKERS: &[&str] = &["Price Range", "Estimated Price"];

/// Turns a model reply into an [`OutfitAnalysis`]
pub trait ResponseParser: Send + Sync {
    fn parse(&self, text: &str) -> OutfitAnalysis;
}

/// The six sections the prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Description,
    ColorTones,
    CoreApparel,
    Accessories,
    FashionTips,
    SimilarItems,
}

impl SectionKind {
    /// Classification order; the first match wins
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Description,
        SectionKind::ColorTones,
        SectionKind::CoreApparel,
        SectionKind::Accessories,
        SectionKind::FashionTips,
        SectionKind::SimilarItems,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Description => &["description"],
            SectionKind::ColorTones => &["color"],
            SectionKind::CoreApparel => &["core", "apparel"],
            SectionKind::Accessories => &["accessories"],
            SectionKind::FashionTips => &["fashion tips"],
            SectionKind::SimilarItems => &["similar items"],
        }
    }

    fn ordinal(&self) -> &'static str {
        match self {
            SectionKind::Description => "1.",
            SectionKind::ColorTones => "2.",
            SectionKind::CoreApparel => "3.",
            SectionKind::Accessories => "4.",
            SectionKind::FashionTips => "5.",
            SectionKind::SimilarItems => "6.",
        }
    }

    /// Classify a section title, case-insensitively
    pub fn classify(title: &str) -> Option<SectionKind> {
        let title = title.to_lowercase();
        Self::ALL.into_iter().find(|kind| {
            kind.keywords().iter().any(|keyword| title.contains(keyword))
                || title.contains(kind.ordinal())
        })
    }
}

/// Parser keyed on `###` headings
#[derive(Debug, Clone)]
pub struct HeadingParser {
    catalog_search_url: String,
}

impl Default for HeadingParser {
    fn default() -> Self {
        Self {
            catalog_search_url: CATALOG_SEARCH_URL.to_string(),
        }
    }
}

impl HeadingParser {
    /// Create a parser with the default catalog URL
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different catalog search URL for suggested items
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_search_url = url.into();
        self
    }

    fn parse_items(&self, content: &str) -> Vec<SuggestedItem> {
        let mut items = Vec::new();
        let mut current: Option<SuggestedItem> = None;

        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let unbolded = line.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
            if let Some(rest) = strip_ordinal(unbolded) {
                if let Some(item) = current.take() {
                    items.push(item);
                }
                let ordinal_in_bold = unbolded.len() != line.len();
                current = Some(SuggestedItem::named(
                    item_name(rest, ordinal_in_bold),
                    &self.catalog_search_url,
                ));
            } else if line.starts_with('-') {
                let Some(item) = current.as_mut() else {
                    continue;
                };
                let text = strip_bullet(line);
                if mentions_price(text) {
                    continue;
                }
                let description = match text.split_once("Description:") {
                    Some((_, rest)) => rest,
                    None => text,
                };
                item.description = description.replace('*', "").trim().to_string();
            }
        }

        // Only committed once the section ends
        if let Some(item) = current {
            items.push(item);
        }

        items
    }
}

impl ResponseParser for HeadingParser {
    fn parse(&self, text: &str) -> OutfitAnalysis {
        let mut result = OutfitAnalysis::default();

        for section in text.split(SECTION_MARKER) {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }

            let (title, content) = match section.split_once('\n') {
                Some((title, rest)) => (title.trim(), rest.trim()),
                None => (section, ""),
            };

            let Some(kind) = SectionKind::classify(title) else {
                debug!(title, "Dropping unrecognized section");
                continue;
            };

            match kind {
                SectionKind::Description => result.analysis.description = strip_markdown(content),
                SectionKind::ColorTones => result.analysis.color_tones = strip_markdown(content),
                SectionKind::CoreApparel => result.analysis.core_apparel = strip_markdown(content),
                SectionKind::Accessories => result.analysis.accessories = strip_markdown(content),
                SectionKind::FashionTips => result.fashion_tips = parse_tips(content),
                SectionKind::SimilarItems => result.suggested_items = self.parse_items(content),
            }
        }

        result
    }
}

/// Parse with the default [`HeadingParser`]
pub fn parse(text: &str) -> OutfitAnalysis {
    HeadingParser::default().parse(text)
}

fn strip_markdown(content: &str) -> String {
    content.replace('*', "").replace("---", "").trim().to_string()
}

fn strip_bullet(line: &str) -> &str {
    line.trim_matches(|c: char| c == '-' || c == ' ').trim()
}

fn parse_tips(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-'))
        .map(|line| strip_bullet(line).replace('*', "").trim().to_string())
        .filter(|tip| !tip.is_empty())
        .collect()
}

/// `"2. Foo"` -> `Some(" Foo")`
fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}

/// Name from the text after an ordinal.
///
/// `ordinal_in_bold` means the line opened with `**`, so the first closing
/// `**` either ends a bold ordinal (`**1.** Name`) or a bold name
/// (`**1. Name**`).
fn item_name(rest: &str, ordinal_in_bold: bool) -> String {
    if ordinal_in_bold {
        let rest = rest.trim_start();
        return match rest.strip_prefix("**") {
            Some(after) => item_name(after, false),
            None => plain_name(rest.split("**").next().unwrap_or(rest)),
        };
    }
    match bold_span(rest) {
        Some(bold) => bold.to_string(),
        None => plain_name(rest),
    }
}

fn plain_name(text: &str) -> String {
    let plain = text.split('.').next().unwrap_or(text);
    plain.replace('*', "").trim().to_string()
}

fn bold_span(text: &str) -> Option<&str> {
    let (_, after) = text.split_once("**")?;
    let inner = after.split("**").next().unwrap_or(after).trim();
    (!inner.is_empty()).then_some(inner)
}

fn mentions_price(text: &str) -> bool {
    PRICE_MARKERS.iter().any(|marker| text.contains(marker))
        || text.to_lowercase().contains("price range")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "### 1. Description
A relaxed weekend look with a **minimalist** edge.
### 2. Color Tones
Cream, camel and soft grey.
### 3. Core Apparel
Oversized knit sweater and straight-leg jeans.
### 4. Accessories
Gold hoops and a leather tote.
### 5. Fashion Tips
- Tuck the front of the sweater for shape.
- Add white sneakers to keep it casual.
Not a bullet, ignored.
### 6. Similar Items
1. **Chunky Knit Sweater** - cozy oversized fit
   - Description: A cream cable-knit pullover
   - Price Range: $80 - $120";

    #[test]
    fn test_well_formed_reply() {
        let result = parse(WELL_FORMED);

        assert_eq!(
            result.analysis.description,
            "A relaxed weekend look with a minimalist edge."
        );
        assert_eq!(result.analysis.color_tones, "Cream, camel and soft grey.");
        assert_eq!(
            result.analysis.core_apparel,
            "Oversized knit sweater and straight-leg jeans."
        );
        assert_eq!(result.analysis.accessories, "Gold hoops and a leather tote.");

        assert_eq!(result.fashion_tips.len(), 2);
        assert_eq!(result.fashion_tips[0], "Tuck the front of the sweater for shape.");

        assert_eq!(result.suggested_items.len(), 1);
        let item = &result.suggested_items[0];
        assert_eq!(item.name, "Chunky Knit Sweater");
        assert_eq!(item.description, "A cream cable-knit pullover");
        assert_eq!(
            item.image_url,
            "https://www.nordstrom.com/s/chunky-knit-sweater"
        );
        assert_eq!(item.product_url, item.image_url);
    }

    #[test]
    fn test_plain_item_names() {
        let text = "### 6. Similar Items
1. Test Item
   - Description: Test description
2. Wide Leg Trousers. Flowing and tailored
- High-rise waist
3. Loafers";
        let items = parse(text).suggested_items;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Test Item");
        assert_eq!(items[0].description, "Test description");
        assert_eq!(items[1].name, "Wide Leg Trousers");
        assert_eq!(items[1].description, "High-rise waist");
        assert_eq!(items[2].name, "Loafers");
        assert!(items[2].description.is_empty());
    }

    #[test]
    fn test_bold_ordinal_items() {
        let text = "### 6. Similar Items
**1. Chunky Knit Sweater**
- Description: Cream pullover
**2. Wide Leg Jeans** - relaxed fit
- Relaxed denim
**3.** **Suede Loafers** - slip-on
**4.** Canvas Tote";
        let items = parse(text).suggested_items;

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].name, "Chunky Knit Sweater");
        assert_eq!(items[0].description, "Cream pullover");
        assert_eq!(items[0].product_url, "https://www.nordstrom.com/s/chunky-knit-sweater");
        assert_eq!(items[1].name, "Wide Leg Jeans");
        assert_eq!(items[1].description, "Relaxed denim");
        assert_eq!(items[2].name, "Suede Loafers");
        assert_eq!(items[3].name, "Canvas Tote");
    }

    #[test]
    fn test_price_lines_filtered() {
        let text = "### Similar Items
1. **Trench Coat**
- Classic belted silhouette
- Estimated Price: $200
- approx. PRICE RANGE $150-$250";
        let items = parse(text).suggested_items;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Classic belted silhouette");
    }

    #[test]
    fn test_bullets_before_first_item_ignored() {
        let text = "### 6. Similar Items
- Stray bullet
1. Beret";
        let items = parse(text).suggested_items;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Beret");
        assert!(items[0].description.is_empty());
    }

    #[test]
    fn test_unmatched_sections_dropped() {
        let text = "Intro text before any heading
### Overall Verdict
Looks great.
### Color Palette
Navy and white.";
        let result = parse(text);

        assert_eq!(result.analysis.color_tones, "Navy and white.");
        assert!(result.analysis.description.is_empty());
        assert!(result.fashion_tips.is_empty());
    }

    #[test]
    fn test_classify_keywords_and_ordinals() {
        assert_eq!(SectionKind::classify("1. Description"), Some(SectionKind::Description));
        assert_eq!(SectionKind::classify("COLOR TONES"), Some(SectionKind::ColorTones));
        assert_eq!(SectionKind::classify("Apparel"), Some(SectionKind::CoreApparel));
        assert_eq!(SectionKind::classify("4. Extras"), Some(SectionKind::Accessories));
        assert_eq!(SectionKind::classify("Fashion Tips"), Some(SectionKind::FashionTips));
        assert_eq!(SectionKind::classify("6."), Some(SectionKind::SimilarItems));
        assert_eq!(SectionKind::classify("Summary"), None);
    }

    #[test]
    fn test_empty_reply() {
        assert_eq!(parse(""), OutfitAnalysis::default());
        assert_eq!(parse("### \n###"), OutfitAnalysis::default());
    }

    #[test]
    fn test_custom_catalog_url() {
        let parser = HeadingParser::new().with_catalog_url("https://shop.test/find/");
        let result = parser.parse("### 6. Similar Items\n1. Silk Scarf");

        assert_eq!(
            result.suggested_items[0].product_url,
            "https://shop.test/find/silk-scarf"
        );
    }

    #[test]
    fn test_strip_ordinal() {
        assert_eq!(strip_ordinal("12. Foo"), Some(" Foo"));
        assert_eq!(strip_ordinal("1 Foo"), None);
        assert_eq!(strip_ordinal("- 1. Foo"), None);
    }
}
