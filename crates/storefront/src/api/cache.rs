//! Cache value types for the catalog client.

use super::types::{Product, ProductCategory, ProductPage};

/// Values stored in the catalog cache.
///
/// Large variants are boxed to keep the enum small.
#[derive(Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductPage),
    Category(Box<ProductCategory>),
    Categories(Vec<ProductCategory>),
}
