use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, ItemName, Quantity};

/// Items expiring within this many whole days are flagged in the list.
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Persisted shape of one `inventory/<name>` document.
///
/// The item name is not part of the body; it is the document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDocument {
    pub quantity: u32,
    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// How an add should treat the stored expiration date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Keep whatever date the record already has (voice path).
    #[default]
    Preserve,
    /// Overwrite with the caller's value, clearing it on `None` (manual form).
    Replace(Option<DateTime<Utc>>),
}

/// Result of decrementing a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decremented {
    /// Quantity dropped but stays positive; write the new document.
    Write(InventoryDocument),
    /// Quantity would reach zero; the record must be deleted.
    Delete,
}

impl InventoryDocument {
    /// Fresh document for an item that does not exist yet.
    pub fn created(quantity: Quantity, expiry: ExpiryPolicy) -> Self {
        let expiration_date = match expiry {
            ExpiryPolicy::Preserve => None,
            ExpiryPolicy::Replace(date) => date,
        };
        Self {
            quantity: quantity.get(),
            expiration_date,
        }
    }

    /// Document after adding `delta` units to an existing record.
    pub fn added(&self, delta: Quantity, expiry: ExpiryPolicy) -> DomainResult<Self> {
        let quantity = self
            .quantity
            .checked_add(delta.get())
            .ok_or_else(|| DomainError::invariant("quantity overflow"))?;
        let expiration_date = match expiry {
            ExpiryPolicy::Preserve => self.expiration_date,
            ExpiryPolicy::Replace(date) => date,
        };
        Ok(Self {
            quantity,
            expiration_date,
        })
    }

    /// Document after a single-unit increment. The expiration date is kept.
    pub fn incremented(&self) -> DomainResult<Self> {
        self.added(Quantity::ONE, ExpiryPolicy::Preserve)
    }

    /// Decide what a single-unit decrement does to this record.
    pub fn decremented(&self) -> Decremented {
        if self.quantity > 1 {
            Decremented::Write(Self {
                quantity: self.quantity - 1,
                expiration_date: self.expiration_date,
            })
        } else {
            Decremented::Delete
        }
    }
}

/// One row of the pantry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    name: ItemName,
    quantity: u32,
    expiration_date: Option<DateTime<Utc>>,
}

/// Display flags derived from an item at a point in time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub expiring_soon: bool,
    pub needs_restock: bool,
    pub days_until_expiration: Option<i64>,
}

impl InventoryItem {
    pub fn new(
        name: ItemName,
        quantity: u32,
        expiration_date: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invariant(format!(
                "item '{name}' cannot be stored with quantity 0"
            )));
        }
        Ok(Self {
            name,
            quantity,
            expiration_date,
        })
    }

    /// Build a list row from a document key and body.
    pub fn from_document(key: &str, doc: InventoryDocument) -> DomainResult<Self> {
        Self::new(ItemName::new(key)?, doc.quantity, doc.expiration_date)
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    /// Whole days until expiration, truncated toward zero. Negative once expired.
    pub fn days_until_expiration(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiration_date.map(|date| (date - now).num_days())
    }

    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        self.days_until_expiration(now)
            .is_some_and(|days| days <= EXPIRING_SOON_DAYS)
    }

    /// The last unit is on the shelf.
    pub fn needs_restock(&self) -> bool {
        self.quantity == 1
    }

    pub fn status(&self, now: DateTime<Utc>) -> ItemStatus {
        ItemStatus {
            expiring_soon: self.is_expiring_soon(now),
            needs_restock: self.needs_restock(),
            days_until_expiration: self.days_until_expiration(now),
        }
    }
}

impl Entity for InventoryItem {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap()
    }

    fn item(name: &str, quantity: u32, expires: Option<DateTime<Utc>>) -> InventoryItem {
        InventoryItem::new(ItemName::new(name).unwrap(), quantity, expires).unwrap()
    }

    #[test]
    fn created_document_ignores_preserve_policy() {
        let doc = InventoryDocument::created(qty(2), ExpiryPolicy::Preserve);
        assert_eq!(doc.quantity, 2);
        assert_eq!(doc.expiration_date, None);
    }

    #[test]
    fn added_preserves_or_replaces_expiration() {
        let date = now() + Duration::days(30);
        let doc = InventoryDocument {
            quantity: 2,
            expiration_date: Some(date),
        };

        let kept = doc.added(qty(3), ExpiryPolicy::Preserve).unwrap();
        assert_eq!(kept.quantity, 5);
        assert_eq!(kept.expiration_date, Some(date));

        let cleared = doc.added(qty(1), ExpiryPolicy::Replace(None)).unwrap();
        assert_eq!(cleared.quantity, 3);
        assert_eq!(cleared.expiration_date, None);
    }

    #[test]
    fn added_reports_overflow() {
        let doc = InventoryDocument {
            quantity: u32::MAX,
            expiration_date: None,
        };
        match doc.incremented() {
            Err(DomainError::InvariantViolation(msg)) => assert!(msg.contains("overflow")),
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn decrement_at_one_deletes() {
        let doc = InventoryDocument {
            quantity: 1,
            expiration_date: None,
        };
        assert_eq!(doc.decremented(), Decremented::Delete);
    }

    #[test]
    fn decrement_above_one_writes() {
        let doc = InventoryDocument {
            quantity: 3,
            expiration_date: None,
        };
        match doc.decremented() {
            Decremented::Write(next) => assert_eq!(next.quantity, 2),
            Decremented::Delete => panic!("record with quantity 3 must survive a decrement"),
        }
    }

    #[test]
    fn zero_quantity_items_cannot_exist() {
        let err = InventoryItem::new(ItemName::new("eggs").unwrap(), 0, None).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn expiring_soon_window() {
        assert!(item("milk", 2, Some(now() + Duration::days(7))).is_expiring_soon(now()));
        assert!(item("milk", 2, Some(now() - Duration::days(2))).is_expiring_soon(now()));
        // 7 days and 23 hours still truncates to 7 whole days.
        let edge = now() + Duration::days(7) + Duration::hours(23);
        assert!(item("milk", 2, Some(edge)).is_expiring_soon(now()));
        assert!(!item("milk", 2, Some(now() + Duration::days(8))).is_expiring_soon(now()));
        assert!(!item("milk", 2, None).is_expiring_soon(now()));
    }

    #[test]
    fn status_flags_restock_at_one() {
        let status = item("rice", 1, None).status(now());
        assert!(status.needs_restock);
        assert!(!status.expiring_soon);
        assert_eq!(status.days_until_expiration, None);
        assert!(!item("rice", 2, None).needs_restock());
    }

    #[test]
    fn document_wire_shape_uses_expiration_date_key() {
        let date = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let doc = InventoryDocument {
            quantity: 4,
            expiration_date: Some(date),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["quantity"], 4);
        assert!(json.get("expirationDate").is_some());

        let bare: InventoryDocument = serde_json::from_value(serde_json::json!({ "quantity": 2 })).unwrap();
        assert_eq!(bare.expiration_date, None);
        assert!(serde_json::to_value(&bare).unwrap().get("expirationDate").is_none());
    }

    #[test]
    fn negative_stored_quantity_fails_to_decode() {
        let res: Result<InventoryDocument, _> =
            serde_json::from_value(serde_json::json!({ "quantity": -1 }));
        assert!(res.is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a run of adds sums the deltas, and decrementing that many
        /// times ends in deletion exactly on the last step.
        #[test]
        fn adds_then_decrements_reach_deletion(deltas in prop::collection::vec(1u32..50u32, 1..8)) {
            let mut doc = InventoryDocument::created(qty(deltas[0]), ExpiryPolicy::Preserve);
            for d in &deltas[1..] {
                doc = doc.added(qty(*d), ExpiryPolicy::Preserve).unwrap();
            }
            let total: u32 = deltas.iter().sum();
            prop_assert_eq!(doc.quantity, total);

            for remaining in (1..total).rev() {
                match doc.decremented() {
                    Decremented::Write(next) => {
                        prop_assert_eq!(next.quantity, remaining);
                        doc = next;
                    }
                    Decremented::Delete => prop_assert!(false, "deleted too early"),
                }
            }
            prop_assert_eq!(doc.decremented(), Decremented::Delete);
        }
    }
}
