use crate::catalog::Product;
use std::sync::Arc;

/// Shown in place of the routine prompt while the request is in flight.
pub const ROUTINE_PLACEHOLDER: &str = "✨ Generate my personalized routine";

pub const EMPTY_SELECTION_NOTICE: &str = "Please select some products first! 💄✨";

/// Builds the single user turn that asks for a routine covering every
/// selected product, in selection order.
pub fn build_routine_prompt(brand: &str, products: &[Arc<Product>]) -> String {
    let product_details = products
        .iter()
        .map(|product| {
            format!(
                "- {} {} ({}): {}",
                product.brand, product.name, product.category, product.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I've selected these {brand} products for my routine:

{product_details}

Can you help me create a personalized skincare/beauty routine using these products? Please:
1. Explain the correct order to use them (morning and/or evening)
2. Describe how to apply each product
3. Mention any important tips or precautions
4. Explain the benefits of this routine

Please only use the products I've selected above."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixture_catalog;

    #[test]
    fn prompt_lists_every_product_in_order() {
        let catalog = fixture_catalog();
        let products = vec![catalog.products()[2].clone(), catalog.products()[0].clone()];

        let prompt = build_routine_prompt("L'Oréal", &products);

        assert!(prompt.starts_with("I've selected these L'Oréal products for my routine:\n\n"));
        let clay = prompt
            .find("- L'Oréal Paris Pure Clay Detox Cleanser (cleanser): Charcoal clay")
            .expect("clay cleanser line should be present");
        let cerave = prompt
            .find("- CeraVe Hydrating Facial Cleanser (cleanser): Gentle")
            .expect("cerave line should be present");
        assert!(clay < cerave);
        assert!(prompt.ends_with("Please only use the products I've selected above."));
    }
}
