//! Website customization documents and the defaults merger.
//!
//! A store's customization is a JSON document in which every key is optional.
//! [`WebsiteCustomization::from_document`] reads the recognized keys and
//! ignores everything else; [`merge_customization`] fills each missing key from
//! [`ResolvedCustomization::defaults`].
//!
//! The merge is shallow: a persisted `heroSection` replaces the default hero
//! section as a whole, it is never combined field by field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest number of products a section may request.
pub const MIN_SECTION_LIMIT: u32 = 1;
/// Largest number of products a section may request.
pub const MAX_SECTION_LIMIT: u32 = 48;
/// Products per section when the descriptor does not say.
pub const DEFAULT_SECTION_LIMIT: u32 = 4;

/// Brand color palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

/// Font choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
}

/// Hero banner copy and image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub background_image: Option<String>,
}

/// "About us" block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutSection {
    pub title: String,
    pub content: String,
}

/// Public contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Social network profile links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

/// Banner shown above the page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncementBar {
    pub enabled: bool,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// How a product section lays out its products.
///
/// Unknown styles deserialize as [`SectionStyle::Grid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SectionStyle {
    #[default]
    Grid,
    Carousel,
    List,
}

impl From<String> for SectionStyle {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "carousel" => Self::Carousel,
            "list" => Self::List,
            _ => Self::Grid,
        }
    }
}

/// Which products a section shows.
///
/// Serialized as the category name, or `"all"` for no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// The category to filter on, or `None` for every category.
    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(c) => Some(c),
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(c) if !c.trim().is_empty() && !c.trim().eq_ignore_ascii_case("all") => {
                Self::Category(c.trim().to_string())
            }
            _ => Self::All,
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Category(c) => c,
        }
    }
}

/// A titled slice of the catalog shown on a storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default = "default_section_limit")]
    pub limit: u32,
    #[serde(default)]
    pub style: SectionStyle,
}

const fn default_section_limit() -> u32 {
    DEFAULT_SECTION_LIMIT
}

impl ProductSection {
    /// Copy of this section with its limit clamped to the supported range.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            limit: self.limit.clamp(MIN_SECTION_LIMIT, MAX_SECTION_LIMIT),
            ..self.clone()
        }
    }
}

/// Recognized keys of the free-form `config` blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationConfig {
    pub product_sections: Option<Vec<ProductSection>>,
}

/// A store's persisted customization. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteCustomization {
    pub logo: Option<String>,
    pub favicon: Option<String>,
    pub brand_colors: Option<BrandColors>,
    pub typography: Option<Typography>,
    pub hero_section: Option<HeroSection>,
    pub about_section: Option<AboutSection>,
    pub contact_info: Option<ContactInfo>,
    pub social_links: Option<SocialLinks>,
    pub announcement_bar: Option<AnnouncementBar>,
    pub product_sections: Option<Vec<ProductSection>>,
    pub config: Option<CustomizationConfig>,
}

/// Result of reading a customization document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Recognized keys that parsed.
    pub customization: WebsiteCustomization,
    /// Recognized keys whose value had the wrong shape and was dropped.
    pub rejected: Vec<&'static str>,
}

impl WebsiteCustomization {
    /// Read a customization document.
    ///
    /// Unrecognized keys are ignored. A recognized key with a malformed value
    /// is dropped (so the default applies) and listed in
    /// [`ParsedDocument::rejected`]. Malformed entries inside a product
    /// section list are skipped individually. A non-object document yields an
    /// empty customization.
    #[must_use]
    pub fn from_document(doc: &Value) -> ParsedDocument {
        let mut rejected = Vec::new();
        let mut reader = KeyReader {
            doc,
            rejected: &mut rejected,
        };

        let customization = Self {
            logo: reader.field("logo"),
            favicon: reader.field("favicon"),
            brand_colors: reader.field("brandColors"),
            typography: reader.field("typography"),
            hero_section: reader.field("heroSection"),
            about_section: reader.field("aboutSection"),
            contact_info: reader.field("contactInfo"),
            social_links: reader.field("socialLinks"),
            announcement_bar: reader.field("announcementBar"),
            product_sections: reader.sections(doc, "productSections", "productSections"),
            config: reader.config(),
        };

        ParsedDocument {
            customization,
            rejected,
        }
    }

    /// Sections from the top-level key, falling back to `config.productSections`.
    #[must_use]
    pub fn effective_sections(&self) -> Option<&[ProductSection]> {
        self.product_sections
            .as_deref()
            .or_else(|| self.config.as_ref()?.product_sections.as_deref())
    }
}

struct KeyReader<'a> {
    doc: &'a Value,
    rejected: &'a mut Vec<&'static str>,
}

impl KeyReader<'_> {
    fn field<T: DeserializeOwned>(&mut self, key: &'static str) -> Option<T> {
        let doc = self.doc;
        let value = doc.get(key).filter(|v| !v.is_null())?;
        serde_json::from_value(value.clone())
            .inspect_err(|_| self.rejected.push(key))
            .ok()
    }

    fn sections(
        &mut self,
        doc: &Value,
        key: &str,
        report_as: &'static str,
    ) -> Option<Vec<ProductSection>> {
        let value = doc.get(key).filter(|v| !v.is_null())?;
        let Some(items) = value.as_array() else {
            self.rejected.push(report_as);
            return None;
        };

        let sections = items
            .iter()
            .filter_map(|item| serde_json::from_value::<ProductSection>(item.clone()).ok())
            .collect::<Vec<_>>();

        if sections.len() != items.len() {
            self.rejected.push(report_as);
        }
        Some(sections)
    }

    fn config(&mut self) -> Option<CustomizationConfig> {
        let doc = self.doc;
        let config = doc.get("config").filter(|v| !v.is_null())?;
        if !config.is_object() {
            self.rejected.push("config");
            return None;
        }

        Some(CustomizationConfig {
            product_sections: self.sections(config, "productSections", "config.productSections"),
        })
    }
}

/// The final configuration consumed by page rendering. Nothing is optional
/// except genuinely absent assets and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCustomization {
    pub logo: Option<String>,
    pub favicon: Option<String>,
    pub brand_colors: BrandColors,
    pub typography: Typography,
    pub hero_section: HeroSection,
    pub about_section: AboutSection,
    pub contact_info: ContactInfo,
    pub social_links: SocialLinks,
    pub announcement_bar: AnnouncementBar,
    pub product_sections: Vec<ProductSection>,
}

impl ResolvedCustomization {
    /// Built-in defaults applied to every store.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            logo: None,
            favicon: None,
            brand_colors: BrandColors {
                primary: "#000000".to_string(),
                secondary: "#666666".to_string(),
                accent: "#ff6b6b".to_string(),
            },
            typography: Typography {
                heading_font: "Inter".to_string(),
                body_font: "Inter".to_string(),
            },
            hero_section: HeroSection {
                title: "Welcome to Our Store".to_string(),
                subtitle: "Discover amazing products".to_string(),
                background_image: None,
            },
            about_section: AboutSection {
                title: "About Us".to_string(),
                content: "We are passionate about bringing you the best products.".to_string(),
            },
            contact_info: ContactInfo::default(),
            social_links: SocialLinks::default(),
            announcement_bar: AnnouncementBar::default(),
            product_sections: vec![ProductSection {
                id: "featured".to_string(),
                title: "Featured Products".to_string(),
                subtitle: None,
                category: CategoryFilter::All,
                limit: DEFAULT_SECTION_LIMIT,
                style: SectionStyle::Grid,
            }],
        }
    }
}

impl Default for ResolvedCustomization {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Merge a persisted customization over defaults.
///
/// Each top-level field comes from `persisted` when present, else from
/// `defaults`. Section limits are clamped to
/// [`MIN_SECTION_LIMIT`]..=[`MAX_SECTION_LIMIT`].
#[must_use]
pub fn merge_customization(
    persisted: Option<&WebsiteCustomization>,
    defaults: &ResolvedCustomization,
) -> ResolvedCustomization {
    let Some(p) = persisted else {
        return normalize(defaults.clone());
    };

    normalize(ResolvedCustomization {
        logo: p.logo.clone().or_else(|| defaults.logo.clone()),
        favicon: p.favicon.clone().or_else(|| defaults.favicon.clone()),
        brand_colors: pick(p.brand_colors.as_ref(), &defaults.brand_colors),
        typography: pick(p.typography.as_ref(), &defaults.typography),
        hero_section: pick(p.hero_section.as_ref(), &defaults.hero_section),
        about_section: pick(p.about_section.as_ref(), &defaults.about_section),
        contact_info: pick(p.contact_info.as_ref(), &defaults.contact_info),
        social_links: pick(p.social_links.as_ref(), &defaults.social_links),
        announcement_bar: pick(p.announcement_bar.as_ref(), &defaults.announcement_bar),
        product_sections: p
            .effective_sections()
            .map_or_else(|| defaults.product_sections.clone(), <[_]>::to_vec),
    })
}

fn pick<T: Clone>(persisted: Option<&T>, default: &T) -> T {
    persisted.unwrap_or(default).clone()
}

fn normalize(mut resolved: ResolvedCustomization) -> ResolvedCustomization {
    resolved.product_sections = resolved
        .product_sections
        .iter()
        .map(ProductSection::normalized)
        .collect();
    resolved
}
