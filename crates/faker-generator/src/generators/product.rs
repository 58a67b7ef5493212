//! The fixed product catalog.

use crate::{GeneratorError, Product};

const PRODUCTS_FIXTURE: &str = include_str!("../../fixtures/products.json");

/// Load every product from the embedded fixture.
///
/// No randomness is involved; every call returns the same list.
pub fn generate_products() -> Result<Vec<Product>, GeneratorError> {
    serde_json::from_str(PRODUCTS_FIXTURE).map_err(GeneratorError::Fixture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_fixture_loads() {
        let products = generate_products().unwrap();

        assert_eq!(products.len(), 50);
        for (i, product) in products.iter().enumerate() {
            assert_eq!(product.id, i as u64 + 1);
        }
    }

    #[test]
    fn test_products_are_stable() {
        assert_eq!(generate_products().unwrap(), generate_products().unwrap());
    }
}
