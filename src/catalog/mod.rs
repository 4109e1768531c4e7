//! Apparel catalog loading: CSV rows in, category index out

pub mod field_parsers;
mod loader;

pub use loader::{
    load_from_path, load_from_reader, load_records, CatalogLoad, CatalogWarning, RawRecord,
};
