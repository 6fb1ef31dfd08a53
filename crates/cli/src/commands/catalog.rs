use shopwise_core::catalog::Catalog;
use shopwise_core::domain::product::{CategoryId, Product};

use crate::commands::{CommandResult, EXIT_INPUT};

pub fn run(category: Option<&str>) -> CommandResult {
    let catalog = Catalog::seeded();

    let products: Vec<&Product> = match category {
        None => catalog.all_products().iter().collect(),
        Some(raw) => match CategoryId::parse(raw) {
            Some(category) => catalog.products_in(category).collect(),
            None => {
                let known: Vec<&str> = CategoryId::ALL.iter().map(|id| id.as_str()).collect();
                return CommandResult::failure(
                    "catalog",
                    "input",
                    format!("unknown category `{raw}` (expected one of {})", known.join(", ")),
                    EXIT_INPUT,
                );
            }
        },
    };

    CommandResult::json("catalog", &products)
}
