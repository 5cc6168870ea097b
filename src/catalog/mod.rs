use crate::error::CatalogUnavailable;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

pub mod loader;

/// Product identifier. Catalog files carry numeric or textual ids; both are
/// normalized to text so `1` and `"1"` name the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(number) => Self(number.to_string()),
            RawId::Text(text) => Self(text),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

/// One loaded snapshot of the catalog. Products are shared with the
/// selection through `Arc`, never copied.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogUnavailable> {
        let document: CatalogDocument = serde_json::from_slice(bytes)?;
        Ok(Self::new(document.products))
    }

    #[cfg(test)]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect()
    }
}

/// An entry of the category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub value: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { value: "cleanser", label: "Cleansers" },
    Category { value: "moisturizer", label: "Moisturizers & Treatments" },
    Category { value: "haircare", label: "Haircare" },
    Category { value: "makeup", label: "Makeup" },
    Category { value: "hair color", label: "Hair Color" },
    Category { value: "hair styling", label: "Hair Styling" },
    Category { value: "men's grooming", label: "Men's Grooming" },
    Category { value: "suncare", label: "Suncare" },
    Category { value: "fragrance", label: "Fragrance" },
];

pub fn category_label(value: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|category| category.value == value)
        .map(|category| category.label)
        .unwrap_or(value)
}

#[cfg(test)]
pub(crate) fn fixture_catalog() -> Catalog {
    Catalog::from_json(include_str!("fixture.json").as_bytes())
        .expect("catalog fixture should parse")
}
