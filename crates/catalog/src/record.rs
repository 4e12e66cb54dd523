use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult, Entity, RecordId, Size, SizeGrid};

/// One sellable variant: a reference code in a specific color, with a
/// per-size stock grid.
///
/// Invariant: `total == stocks.total()` after every mutation. Fields are
/// private so the invariant can only be touched through the methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    id: RecordId,
    reference: String,
    name: String,
    color: String,
    color_hex: Option<String>,
    image_ref: Option<String>,
    stocks: SizeGrid,
    total: u32,
    price_cents: Option<u64>,
}

impl StockRecord {
    /// Create a record. Reference, name, and color must be non-empty.
    pub fn new(
        id: RecordId,
        reference: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        stocks: SizeGrid,
    ) -> DomainResult<Self> {
        let reference = reference.into();
        let name = name.into();
        let color = color.into();

        if reference.trim().is_empty() {
            return Err(DomainError::validation("reference cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if color.trim().is_empty() {
            return Err(DomainError::validation("color cannot be empty"));
        }

        let total = stocks.total();
        Ok(Self {
            id,
            reference,
            name,
            color,
            color_hex: None,
            image_ref: None,
            stocks,
            total,
            price_cents: None,
        })
    }

    pub fn with_color_hex(mut self, hex: impl Into<String>) -> Self {
        self.color_hex = Some(hex.into());
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn with_price_cents(mut self, price_cents: u64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn record_id(&self) -> RecordId {
        self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn color_hex(&self) -> Option<&str> {
        self.color_hex.as_deref()
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    pub fn stocks(&self) -> &SizeGrid {
        &self.stocks
    }

    /// Current quantity for one size (absent = 0).
    pub fn quantity(&self, size: Size) -> u32 {
        self.stocks.quantity(size)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn price_cents(&self) -> Option<u64> {
        self.price_cents
    }

    /// Replace the whole stock grid; the total is recomputed.
    pub fn replace_stocks(&mut self, stocks: SizeGrid) {
        self.total = stocks.total();
        self.stocks = stocks;
    }

    /// Apply an aggregate update carrying its own precomputed total.
    ///
    /// The total must match the grid (it is redundant on the wire but
    /// authoritative in the store), otherwise the update is refused.
    pub fn apply_stock_update(&mut self, stocks: SizeGrid, total: u32) -> DomainResult<()> {
        if stocks.total() != total {
            return Err(DomainError::invariant(format!(
                "aggregate total {total} does not match stock grid sum {}",
                stocks.total()
            )));
        }
        self.stocks = stocks;
        self.total = total;
        Ok(())
    }

    /// Edit the identity fields shown on a reference row.
    pub fn edit_details(
        &mut self,
        reference: impl Into<String>,
        name: impl Into<String>,
        price_cents: Option<u64>,
    ) -> DomainResult<()> {
        let reference = reference.into();
        let name = name.into();
        if reference.trim().is_empty() {
            return Err(DomainError::validation("reference cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.reference = reference;
        self.name = name;
        self.price_cents = price_cents;
        Ok(())
    }

    /// Rename the color of this variant.
    ///
    /// Display names usually embed the color ("Vestido Midi - Preto"), so the
    /// old color name is substituted inside the display name as well.
    pub fn rename_color(
        &mut self,
        color: impl Into<String>,
        color_hex: Option<String>,
    ) -> DomainResult<()> {
        let color = color.into();
        if color.trim().is_empty() {
            return Err(DomainError::validation("color cannot be empty"));
        }
        if !self.color.is_empty() {
            self.name = self.name.replace(&self.color, &color);
        }
        self.color = color;
        self.color_hex = color_hex;
        Ok(())
    }
}

impl Entity for StockRecord {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(entries: &[(Size, u32)]) -> SizeGrid {
        entries.iter().copied().collect()
    }

    fn sample_record() -> StockRecord {
        StockRecord::new(
            RecordId::new(),
            "REF-010",
            "Vestido Midi - Preto",
            "Preto",
            grid(&[(Size::P, 2), (Size::M, 3)]),
        )
        .unwrap()
    }

    #[test]
    fn new_record_derives_total_from_stocks() {
        let record = sample_record();
        assert_eq!(record.total(), 5);
        assert_eq!(record.quantity(Size::P), 2);
        assert_eq!(record.quantity(Size::GG), 0);
    }

    #[test]
    fn new_record_rejects_blank_identity_fields() {
        let err = StockRecord::new(RecordId::new(), "  ", "Nome", "Azul", SizeGrid::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = StockRecord::new(RecordId::new(), "REF-1", "   ", "Azul", SizeGrid::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn replace_stocks_keeps_total_consistent() {
        let mut record = sample_record();
        record.replace_stocks(grid(&[(Size::G1, 7)]));
        assert_eq!(record.total(), 7);
        assert_eq!(record.stocks().total(), record.total());
    }

    #[test]
    fn apply_stock_update_refuses_mismatched_total() {
        let mut record = sample_record();
        let err = record
            .apply_stock_update(grid(&[(Size::P, 1)]), 9)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        // untouched on refusal
        assert_eq!(record.total(), 5);
    }

    #[test]
    fn apply_stock_update_accepts_matching_total() {
        let mut record = sample_record();
        record.apply_stock_update(grid(&[(Size::P, 1)]), 1).unwrap();
        assert_eq!(record.total(), 1);
    }

    #[test]
    fn rename_color_substitutes_display_name() {
        let mut record = sample_record();
        record
            .rename_color("Vinho", Some("#722f37".to_string()))
            .unwrap();
        assert_eq!(record.color(), "Vinho");
        assert_eq!(record.name(), "Vestido Midi - Vinho");
        assert_eq!(record.color_hex(), Some("#722f37"));
    }

    #[test]
    fn edit_details_rejects_blank_reference() {
        let mut record = sample_record();
        let err = record.edit_details("", "Nome", None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(record.reference(), "REF-010");
    }
}
