//! Dripcheck - Outfit Roulette
//!
//! Loads an apparel catalog from CSV and rolls random outfits (headgear,
//! upper, lower, footwear) whose total price stays within a budget.

pub mod catalog;
pub mod error;
pub mod formatters;
pub mod image_host;
pub mod models;
pub mod selector;
pub mod session;
pub mod web;

pub use catalog::{load_from_path, load_from_reader, CatalogLoad, CatalogWarning};
pub use error::{DripcheckError, Result};
pub use formatters::{format_share_message, share_url};
pub use image_host::ImageHostClient;
pub use models::{CatalogItem, Category, CategoryIndex, SelectedOutfit};
pub use selector::{select_one, select_outfit, select_slot, SlotResult};
pub use session::OutfitSession;
