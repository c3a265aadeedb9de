//! Product identity and line keys.
//!
//! A product id is opaque to the cart: integer and string ids are both
//! accepted and compared strictly, so `1` and `"1"` are different products.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the underlying product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id, e.g. `1`.
    Number(i64),
    /// String id, e.g. `"sku-1"`.
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<i32> for ProductId {
    fn from(n: i32) -> Self {
        ProductId::Number(i64::from(n))
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

/// Identity of one cart line: product plus variant discriminators.
///
/// A missing variant field only equals another missing field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    /// Key for a product with no variant.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            size: None,
            color: None,
        }
    }

    /// Set the size discriminator.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color discriminator.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(size) = &self.size {
            write!(f, " size={}", size)?;
        }
        if let Some(color) = &self.color {
            write!(f, " color={}", color)?;
        }
        Ok(())
    }
}

macro_rules! line_key_from_id {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for LineKey {
                fn from(id: $ty) -> Self {
                    LineKey::new(id)
                }
            }
        )+
    };
}

line_key_from_id!(ProductId, i64, i32, String, &str);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(serde_json::to_string(&ProductId::from(1)).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&ProductId::from("sku-1")).unwrap(),
            r#""sku-1""#
        );

        let n: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(n, ProductId::Number(42));
        let s: ProductId = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(s, ProductId::Text("42".to_string()));
    }

    #[test]
    fn test_number_and_text_are_distinct() {
        assert_ne!(ProductId::from(1), ProductId::from("1"));
    }

    #[test]
    fn test_missing_variant_only_equals_missing() {
        let plain = LineKey::new(2);
        let medium = LineKey::new(2).with_size("M");
        assert_ne!(plain, medium);
        assert_eq!(LineKey::from(2), plain);
    }

    #[test]
    fn test_display() {
        let key = LineKey::new("tee").with_size("L").with_color("red");
        assert_eq!(key.to_string(), "tee size=L color=red");
    }
}
