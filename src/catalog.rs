//! Catalog of selectable items.
//!
//! Items are immutable and externally supplied; the core only reads them. The built-in
//! catalog mirrors the curated ecosystem list shipped with the product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod data;

/// Stable catalog identifier (e.g. `meridian-dex`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ecosystem category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "DeFi")]
    DeFi,
    #[serde(rename = "DEX")]
    Dex,
    #[serde(rename = "Lending")]
    Lending,
    #[serde(rename = "NFT")]
    Nft,
    #[serde(rename = "Gaming")]
    Gaming,
    #[serde(rename = "Infrastructure")]
    Infrastructure,
    #[serde(rename = "RWA")]
    Rwa,
    #[serde(rename = "Bridge")]
    Bridge,
    #[serde(rename = "Social")]
    Social,
    #[serde(rename = "DAO")]
    Dao,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Dex,
        Category::DeFi,
        Category::Lending,
        Category::Nft,
        Category::Gaming,
        Category::Infrastructure,
        Category::Bridge,
        Category::Rwa,
        Category::Social,
        Category::Dao,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::DeFi => "DeFi",
            Category::Dex => "DEX",
            Category::Lending => "Lending",
            Category::Nft => "NFT",
            Category::Gaming => "Gaming",
            Category::Infrastructure => "Infrastructure",
            Category::Rwa => "RWA",
            Category::Bridge => "Bridge",
            Category::Social => "Social",
            Category::Dao => "DAO",
        }
    }

    /// Parse a category filter; `All` (any case) means no filter.
    pub fn parse_filter(value: &str) -> Result<Option<Category>, String> {
        if value.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// One catalog entry eligible for selection and generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form context handed to the generator alongside the user's prompt
    pub skill_context: String,
}

impl CatalogItem {
    /// Case-insensitive keyword match over name, description and tags.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Catalog filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: Option<Category>,
    pub keyword: Option<String>,
}

impl CatalogQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        let category_ok = self.category.map_or(true, |c| item.category == c);
        let keyword_ok = self
            .keyword
            .as_deref()
            .map_or(true, |k| item.matches_keyword(k));
        category_ok && keyword_ok
    }
}

/// Filtered view of the catalog in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total: usize,
    pub filtered: usize,
}

/// Read-only catalog collaborator.
pub trait CatalogSource: Send + Sync {
    fn query(&self, query: &CatalogQuery) -> CatalogPage;

    fn get(&self, id: &ItemId) -> Option<CatalogItem>;
}

/// In-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// The curated ecosystem catalog.
    pub fn builtin() -> Self {
        Self::new(data::builtin_items())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogSource for StaticCatalog {
    fn query(&self, query: &CatalogQuery) -> CatalogPage {
        let items: Vec<CatalogItem> = self
            .items
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect();
        CatalogPage {
            filtered: items.len(),
            total: self.items.len(),
            items,
        }
    }

    fn get(&self, id: &ItemId) -> Option<CatalogItem> {
        self.items.iter().find(|item| &item.id == id).cloned()
    }
}
