//! # Settings Commands
//!
//! Catalog replacement. The new catalog must pass the same rules as the
//! settings form: every item named, quantity 1 to 15, price at least 0.01
//! and unique, at least one item.

use std::path::Path;

use tracing::info;
use vending_core::VendingSession;

use crate::catalog;
use crate::error::ApiError;

/// Loads a catalog file, validates it and replaces the session's products.
///
/// On any error the current catalog and session stay as they were.
pub fn load_catalog_file(session: &mut VendingSession, path: &Path) -> Result<Vec<String>, ApiError> {
    let products = catalog::load_catalog(path)?;
    let count = products.len();
    session.replace_catalog(products)?;

    info!(path = %path.display(), products = count, "Catalog saved");
    Ok(vec![format!("Catalog saved: {} products", count)])
}
