//! # Catalog Loading
//!
//! Reads the product list from a JSON file.
//!
//! Accepted shapes:
//! ```json
//! [ { "id": "1", "name": "Water", "quantity": 5, "price": 1.3 } ]
//! { "products": [ { "_id": "1", "name": "Water", "quantity": 5, "price": "1.30" } ] }
//! ```
//!
//! Numeric prices go through serde_json's shortest round-trip formatting
//! (`1.3` prints as `"1.3"`) and are then parsed as a decimal string, so
//! `1.3` becomes exactly 130 cents. Numbers that format in exponent notation
//! (`1e16`) are rejected; quote such prices as strings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;
use vending_core::{Money, Product, ValidationError};

/// Catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Product {id}: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CatalogRecord>),
    Wrapped { products: Vec<CatalogRecord> },
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(alias = "_id")]
    id: JsonScalar,
    name: String,
    quantity: i64,
    price: JsonScalar,
}

/// A JSON value that may be written as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonScalar {
    Number(serde_json::Number),
    Text(String),
}

impl JsonScalar {
    fn into_text(self) -> String {
        match self {
            JsonScalar::Number(n) => n.to_string(),
            JsonScalar::Text(s) => s,
        }
    }
}

impl CatalogRecord {
    fn into_product(self) -> Result<Product, CatalogError> {
        let id = self.id.into_text();
        let invalid = |source| CatalogError::InvalidRecord {
            id: id.clone(),
            source,
        };

        let price = Money::parse_decimal(&self.price.into_text()).map_err(invalid)?;

        if self.quantity < 0 {
            return Err(invalid(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: i64::MAX,
            }));
        }

        Ok(Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price_cents: price.cents(),
        })
    }
}

/// Parses catalog JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let records = match serde_json::from_str::<CatalogFile>(json)? {
        CatalogFile::List(records) => records,
        CatalogFile::Wrapped { products } => products,
    };

    records.into_iter().map(CatalogRecord::into_product).collect()
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let products = parse_catalog(&json)?;
    info!(path = %path.display(), products = products.len(), "Catalog loaded");
    Ok(products)
}
