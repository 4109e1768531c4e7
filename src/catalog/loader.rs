//! Builds a [`CategoryIndex`] from catalog rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

use super::field_parsers::{classify_type, read_price_field, PriceField};
use crate::error::{DripcheckError, Result};
use crate::models::{CatalogItem, Category, CategoryIndex};

/// Column that must be present in the header row
const TYPE_COLUMN: &str = "type";

/// Prices logged per category after a load
const SAMPLE_PRICES: usize = 3;

/// One untyped catalog row as it appears in the source file.
///
/// Every column is optional so ragged or sparse rows still deserialize;
/// coercion happens in [`load_records`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "product link", default)]
    pub product_link: Option<String>,
    #[serde(rename = "apparel name", default)]
    pub name: Option<String>,
    #[serde(rename = "apparel image", default)]
    pub image_ref: Option<String>,
    #[serde(rename = "item-price", default)]
    pub item_price: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(rename = "type", default)]
    pub type_field: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Non-fatal problem found while loading a row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogWarning {
    /// Row dropped: its type is none of the four categories
    UnknownCategory { category: String, item_name: String },
    /// Row kept with price 0: the price text was not a number
    MalformedPrice { item_name: String, raw: String },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::UnknownCategory {
                category,
                item_name,
            } => write!(f, "Unknown category: {category} for item: {item_name}"),
            CatalogWarning::MalformedPrice { item_name, raw } => {
                write!(f, "Malformed price '{raw}' for item: {item_name}, using 0")
            }
        }
    }
}

/// Result of a successful catalog load
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub index: CategoryIndex,
    pub warnings: Vec<CatalogWarning>,
}

impl CatalogLoad {
    /// Number of rows dropped for an unknown category
    pub fn dropped_rows(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, CatalogWarning::UnknownCategory { .. }))
            .count()
    }
}

fn text(field: Option<String>) -> String {
    field.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Coerce and classify raw rows into a category index.
///
/// Never fails: unknown types are dropped and malformed prices become zero,
/// both reported through the returned warnings.
pub fn load_records<I>(records: I) -> CatalogLoad
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut load = CatalogLoad::default();

    for record in records {
        let name = text(record.name);
        let price = read_price_field(record.item_price.as_deref(), record.price.as_deref());
        let (type_name, category) = classify_type(record.type_field.as_deref().unwrap_or(""));

        let Some(category) = category else {
            let warning = CatalogWarning::UnknownCategory {
                category: type_name,
                item_name: name,
            };
            log::warn!("{}", warning);
            load.warnings.push(warning);
            continue;
        };

        match &price {
            PriceField::Malformed(raw) => {
                let warning = CatalogWarning::MalformedPrice {
                    item_name: name.clone(),
                    raw: raw.clone(),
                };
                log::warn!("{}", warning);
                load.warnings.push(warning);
            }
            PriceField::Missing => log::debug!("No price for item: {}, using 0", name),
            PriceField::Parsed(_) => {}
        }

        load.index.push(CatalogItem {
            product_link: text(record.product_link),
            name,
            image_ref: text(record.image_ref),
            price: price.value(),
            category,
            brand: text(record.brand),
        });
    }

    load
}

/// Read a CSV catalog from any reader.
///
/// The first line must be a header row naming the columns. Fails with
/// [`DripcheckError::CatalogUnavailable`] when the data cannot be read as CSV;
/// in that case nothing is returned, not even the rows read so far.
pub fn load_from_reader<R: Read>(origin: &str, reader: R) -> Result<CatalogLoad> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| DripcheckError::catalog_unavailable(origin, e))?
        .clone();

    if !headers.is_empty() && !headers.iter().any(|h| h == TYPE_COLUMN) {
        return Err(DripcheckError::catalog_unavailable(
            origin,
            format!("missing required column '{TYPE_COLUMN}'"),
        ));
    }

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord =
            result.map_err(|e| DripcheckError::catalog_unavailable(origin, e))?;
        records.push(record);
    }

    log::info!("Parsed {} rows from {}", records.len(), origin);

    let load = load_records(records);
    log_summary(&load);
    Ok(load)
}

/// Read a CSV catalog file
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<CatalogLoad> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    log::info!("Loading catalog from: {}", origin);

    let file =
        std::fs::File::open(path).map_err(|e| DripcheckError::catalog_unavailable(&origin, e))?;
    load_from_reader(&origin, std::io::BufReader::new(file))
}

fn log_summary(load: &CatalogLoad) {
    for category in Category::all() {
        let items = load.index.items(*category);
        let samples: Vec<f64> = items.iter().take(SAMPLE_PRICES).map(|i| i.price).collect();
        log::info!("{}: {} items", category, items.len());
        log::debug!("{} sample prices: {:?}", category, samples);
    }
    if !load.warnings.is_empty() {
        log::warn!(
            "Catalog loaded with {} warnings ({} rows dropped)",
            load.warnings.len(),
            load.dropped_rows()
        );
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
