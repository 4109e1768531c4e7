use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest budget offered by the budget slider
pub const MIN_BUDGET: u64 = 1_000;
/// Highest budget offered by the budget slider
pub const MAX_BUDGET: u64 = 50_000;
/// Slider increment
pub const BUDGET_STEP: u64 = 1_000;
/// Budget a fresh session starts with
pub const DEFAULT_BUDGET: u64 = 10_000;

/// The fixed wardrobe slots an outfit is composed of.
///
/// Variant order is the order in which a full outfit consumes the budget,
/// and the order outfits are displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Headgear,
    Upper,
    Lower,
    Footwear,
}

impl Category {
    /// Selection and display order
    pub const SELECTION_ORDER: [Category; 4] = [
        Category::Headgear,
        Category::Upper,
        Category::Lower,
        Category::Footwear,
    ];

    /// Returns the lower-case name used in the catalog's type column
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Headgear => "headgear",
            Category::Upper => "upper",
            Category::Lower => "lower",
            Category::Footwear => "footwear",
        }
    }

    /// Parse a free-text type value, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "headgear" => Some(Category::Headgear),
            "upper" => Some(Category::Upper),
            "lower" => Some(Category::Lower),
            "footwear" => Some(Category::Footwear),
            _ => None,
        }
    }

    /// Returns all categories in selection order
    pub fn all() -> &'static [Category] {
        &Self::SELECTION_ORDER
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One apparel item from the catalog.
///
/// Serialized with the catalog's column names so API consumers see the same
/// field names as the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "product link")]
    pub product_link: String,
    #[serde(rename = "apparel name")]
    pub name: String,
    #[serde(rename = "apparel image")]
    pub image_ref: String,
    #[serde(rename = "item-price", deserialize_with = "non_negative_price")]
    pub price: f64,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub brand: String,
}

impl CatalogItem {
    /// Price rounded to the nearest whole currency unit.
    ///
    /// This is what the budget ledger and every displayed total use; the
    /// stored `price` is never rounded.
    pub fn rounded_price(&self) -> u64 {
        round_price(self.price)
    }
}

/// Rejects prices a catalog load could never produce
fn non_negative_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = f64::deserialize(deserializer)?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(de::Error::custom(format!(
            "item-price must be a non-negative number, got {price}"
        )))
    }
}

/// Round a price to the nearest whole unit, halves away from zero.
/// Negative and non-finite values count as zero.
pub fn round_price(price: f64) -> u64 {
    if price.is_finite() && price > 0.0 {
        price.round() as u64
    } else {
        0
    }
}

/// Catalog items partitioned by category, each list in source order.
///
/// All four categories are always present, possibly with empty lists.
/// Only built through [`CategoryIndex::push`], so it serializes but never
/// deserializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryIndex {
    buckets: BTreeMap<Category, Vec<CatalogItem>>,
}

impl Default for CategoryIndex {
    fn default() -> Self {
        let buckets = Category::all().iter().map(|c| (*c, Vec::new())).collect();
        Self { buckets }
    }
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the bucket of its own category
    pub fn push(&mut self, item: CatalogItem) {
        self.buckets.entry(item.category).or_default().push(item);
    }

    /// Items in a category, in source order
    pub fn items(&self, category: Category) -> &[CatalogItem] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of indexed items
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-category item counts in selection order
    pub fn counts(&self) -> BTreeMap<Category, usize> {
        Category::all()
            .iter()
            .map(|c| (*c, self.items(*c).len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CatalogItem])> {
        self.buckets.iter().map(|(c, items)| (*c, items.as_slice()))
    }
}

/// The outfit currently on display: at most one item per category.
/// Categories without an affordable item are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOutfit {
    slots: BTreeMap<Category, CatalogItem>,
}

impl SelectedOutfit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&CatalogItem> {
        self.slots.get(&category)
    }

    /// Put an item into its category's slot, returning the item it replaced
    pub fn insert(&mut self, item: CatalogItem) -> Option<CatalogItem> {
        self.slots.insert(item.category, item)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when every category has an item
    pub fn is_complete(&self) -> bool {
        self.slots.len() == Category::all().len()
    }

    /// Selected items in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CatalogItem)> {
        self.slots.iter().map(|(c, item)| (*c, item))
    }

    /// Sum of the rounded per-item prices
    pub fn total_price(&self) -> u64 {
        self.slots.values().map(CatalogItem::rounded_price).sum()
    }
}

impl FromIterator<CatalogItem> for SelectedOutfit {
    /// Later items replace earlier ones of the same category
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        let mut outfit = SelectedOutfit::new();
        for item in iter {
            outfit.insert(item);
        }
        outfit
    }
}
