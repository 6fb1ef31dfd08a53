//! Read-only product and category lookups used by the learner, the scoring
//! engine and the cart advisor.

mod seed;

use crate::domain::product::{Category, CategoryId, Product, ProductId};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self { products, categories }
    }

    /// The storefront's built-in assortment: six categories, twenty-five products.
    pub fn seeded() -> Self {
        Self::new(seed::products(), seed::categories())
    }

    pub fn product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn products_in(&self, category: CategoryId) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter().filter(move |product| product.category == category)
    }

    pub fn category(&self, category: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|candidate| candidate.id == category)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn related_categories(&self, category: CategoryId) -> &[CategoryId] {
        self.category(category).map(|found| found.related_categories.as_slice()).unwrap_or(&[])
    }

    pub fn category_name(&self, category: CategoryId) -> String {
        self.category(category)
            .map(|found| found.name.clone())
            .unwrap_or_else(|| category.as_str().to_owned())
    }
}
