use serde::{Deserialize, Serialize};

/// One anime purchase row.
///
/// `id` is `None` until the row has been inserted; SQLite assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: Option<i64>,
    pub title: String,
    pub quantity: i32,
    pub price: f64,
}

impl PurchaseRecord {
    /// Create a record that has not been stored yet
    pub fn new(title: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            id: None,
            title: title.into(),
            quantity,
            price,
        }
    }

    /// Create a record read back from storage
    pub fn loaded(id: i64, title: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            quantity,
            price,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn quantity_text(&self) -> String {
        self.quantity.to_string()
    }

    /// Price as shown in the form: shortest round-trip decimal text, never in
    /// exponent form. Finite prices always carry a fractional part (`3.0`).
    pub fn price_text(&self) -> String {
        let text = self.price.to_string();
        if self.price.is_finite() && !text.contains('.') {
            format!("{}.0", text)
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_id() {
        let record = PurchaseRecord::new("Naruto", 3, 9.99);
        assert_eq!(record.id, None);
        assert!(!record.is_persisted());
    }

    #[test]
    fn test_loaded_record_keeps_id() {
        let record = PurchaseRecord::loaded(7, "Akira", 1, 20.0);
        assert_eq!(record.id, Some(7));
        assert!(record.is_persisted());
    }

    #[test]
    fn test_form_text() {
        let record = PurchaseRecord::loaded(1, "Naruto", -2, 12.5);
        assert_eq!(record.quantity_text(), "-2");
        assert_eq!(record.price_text(), "12.5");
        assert_eq!(PurchaseRecord::new("X", 1, 3.0).price_text(), "3.0");
        assert_eq!(PurchaseRecord::new("X", 1, 9.99).price_text(), "9.99");
    }

    #[test]
    fn test_price_text_never_uses_exponent() {
        assert_eq!(
            PurchaseRecord::new("X", 1, 1e16).price_text(),
            "10000000000000000.0"
        );
        assert_eq!(PurchaseRecord::new("X", 1, -2.0).price_text(), "-2.0");
        assert_eq!(
            PurchaseRecord::new("X", 1, 0.0000001).price_text(),
            "0.0000001"
        );
    }
}
