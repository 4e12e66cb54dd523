//! Derived, read-only grouping views over a record collection.
//!
//! Grouping is not a stored relationship: records that share an image
//! reference form one visual group, and within a group records that share a
//! color form one color block with a merged stock grid. All functions here
//! are pure and order-stable (first-appearance order, never sorted by
//! content).

use std::collections::HashMap;

use atelier_core::{Size, SizeGrid};

use crate::record::StockRecord;

/// Records sharing one image reference.
#[derive(Debug)]
pub struct ImageGroup<'a> {
    pub image_ref: Option<&'a str>,
    pub records: Vec<&'a StockRecord>,
}

/// Records sharing one color (within an image group).
#[derive(Debug)]
pub struct ColorGroup<'a> {
    pub color: &'a str,
    pub color_hex: Option<&'a str>,
    pub records: Vec<&'a StockRecord>,
}

/// Which part of the size set a grid covers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GradeRange {
    /// No sizes at all.
    Empty,
    /// Only `P`..`GG`.
    Standard,
    /// Only `G1`..`G3`.
    Plus,
    /// Both grades.
    Mixed,
}

impl GradeRange {
    pub fn label(&self) -> &'static str {
        match self {
            GradeRange::Empty => "Sem Grade",
            GradeRange::Standard => "P ao GG",
            GradeRange::Plus => "G1 ao G3",
            GradeRange::Mixed => "Mista",
        }
    }
}

/// Classify a grid by which sizes it carries (quantities are irrelevant,
/// an explicit zero row still counts as carrying the size).
pub fn grade_range(grid: &SizeGrid) -> GradeRange {
    let mut has_standard = false;
    let mut has_plus = false;
    for size in grid.sizes() {
        if size.is_plus() {
            has_plus = true;
        } else {
            has_standard = true;
        }
    }
    match (has_standard, has_plus) {
        (false, false) => GradeRange::Empty,
        (true, false) => GradeRange::Standard,
        (false, true) => GradeRange::Plus,
        (true, true) => GradeRange::Mixed,
    }
}

/// Group records by image reference, preserving first-appearance order.
/// Records without an image reference share a single trailing-independent
/// "no image" bucket.
pub fn group_by_image(records: &[StockRecord]) -> Vec<ImageGroup<'_>> {
    let mut groups: Vec<ImageGroup<'_>> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();

    for record in records {
        let key = record.image_ref();
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(ImageGroup {
                    image_ref: key,
                    records: vec![record],
                });
            }
        }
    }

    groups
}

/// Group records by color, preserving first-appearance order.
///
/// The grouping key is the trimmed, lowercased color name plus the hex
/// attribute, so "Preto" and "preto " with the same hex merge.
pub fn group_by_color<'a>(records: &[&'a StockRecord]) -> Vec<ColorGroup<'a>> {
    let mut groups: Vec<ColorGroup<'a>> = Vec::new();
    let mut index: HashMap<(String, Option<&str>), usize> = HashMap::new();

    for &record in records {
        let key = (
            record.color().trim().to_lowercase(),
            record.color_hex(),
        );
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(ColorGroup {
                    color: record.color(),
                    color_hex: record.color_hex(),
                    records: vec![record],
                });
            }
        }
    }

    groups
}

impl<'a> ImageGroup<'a> {
    /// Color blocks inside this group, first-appearance ordered.
    pub fn color_groups(&self) -> Vec<ColorGroup<'a>> {
        group_by_color(&self.records)
    }

    pub fn total_units(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.total())).sum()
    }

    /// Distinct reference codes, in first-appearance order.
    pub fn references(&self) -> Vec<&'a str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.reference()) {
                seen.push(record.reference());
            }
        }
        seen
    }

    pub fn color_count(&self) -> usize {
        self.color_groups().len()
    }

    /// Min/max unit price across records that carry one.
    pub fn price_range_cents(&self) -> Option<(u64, u64)> {
        let mut range: Option<(u64, u64)> = None;
        for record in &self.records {
            if let Some(price) = record.price_cents() {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(price), hi.max(price)),
                    None => (price, price),
                });
            }
        }
        range
    }
}

impl<'a> ColorGroup<'a> {
    /// Per-size sums across all member records.
    pub fn merged_stocks(&self) -> SizeGrid {
        let mut merged = SizeGrid::new();
        for record in &self.records {
            for (size, qty) in record.stocks().iter() {
                merged.set(size, merged.quantity(size) + qty);
            }
        }
        merged
    }

    pub fn total_units(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.total())).sum()
    }

    /// Merged quantity for one size across the color block.
    pub fn quantity(&self, size: Size) -> u32 {
        self.records.iter().map(|r| r.quantity(size)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::RecordId;

    fn record(
        reference: &str,
        name: &str,
        color: &str,
        hex: Option<&str>,
        image: Option<&str>,
        stocks: &[(Size, u32)],
    ) -> StockRecord {
        let mut r = StockRecord::new(
            RecordId::new(),
            reference,
            name,
            color,
            stocks.iter().copied().collect(),
        )
        .unwrap();
        if let Some(hex) = hex {
            r = r.with_color_hex(hex);
        }
        if let Some(image) = image {
            r = r.with_image_ref(image);
        }
        r
    }

    #[test]
    fn groups_by_image_in_first_appearance_order() {
        let records = vec![
            record("R1", "A - Azul", "Azul", None, Some("img-a"), &[(Size::P, 1)]),
            record("R2", "B - Rosa", "Rosa", None, Some("img-b"), &[]),
            record("R3", "A Plus - Azul", "Azul", None, Some("img-a"), &[(Size::G1, 2)]),
            record("R4", "C - Cru", "Cru", None, None, &[]),
        ];

        let groups = group_by_image(&records);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].image_ref, Some("img-a"));
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[0].total_units(), 3);
        assert_eq!(groups[1].image_ref, Some("img-b"));
        assert_eq!(groups[2].image_ref, None);
    }

    #[test]
    fn color_key_ignores_case_and_surrounding_whitespace() {
        let a = record("R1", "A - Preto", "Preto", Some("#000"), None, &[(Size::P, 1)]);
        let b = record("R2", "B - preto", " preto ", Some("#000"), None, &[(Size::M, 2)]);
        let c = record("R3", "C - Preto", "Preto", Some("#111"), None, &[]);

        let refs: Vec<&StockRecord> = vec![&a, &b, &c];
        let groups = group_by_color(&refs);
        // same name+hex merge; a different hex is a different block
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[0].total_units(), 3);
    }

    #[test]
    fn merged_stocks_sums_per_size() {
        let a = record("R1", "A - Azul", "Azul", None, None, &[(Size::P, 2), (Size::M, 1)]);
        let b = record("R2", "B - Azul", "Azul", None, None, &[(Size::P, 3), (Size::G1, 4)]);

        let refs: Vec<&StockRecord> = vec![&a, &b];
        let groups = group_by_color(&refs);
        let merged = groups[0].merged_stocks();
        assert_eq!(merged.quantity(Size::P), 5);
        assert_eq!(merged.quantity(Size::M), 1);
        assert_eq!(merged.quantity(Size::G1), 4);
        assert_eq!(merged.total(), 10);
    }

    #[test]
    fn grade_range_classifies_by_carried_sizes() {
        let standard: SizeGrid = [(Size::P, 0), (Size::GG, 2)].into_iter().collect();
        let plus: SizeGrid = [(Size::G2, 1)].into_iter().collect();
        let mixed: SizeGrid = [(Size::M, 1), (Size::G3, 1)].into_iter().collect();

        assert_eq!(grade_range(&SizeGrid::new()), GradeRange::Empty);
        assert_eq!(grade_range(&standard), GradeRange::Standard);
        assert_eq!(grade_range(&plus), GradeRange::Plus);
        assert_eq!(grade_range(&mixed), GradeRange::Mixed);
        assert_eq!(grade_range(&mixed).label(), "Mista");
    }

    #[test]
    fn image_group_summary_helpers() {
        let records = vec![
            record("R1", "A - Azul", "Azul", None, Some("img"), &[(Size::P, 1)]),
            record("R1", "A Plus - Azul", "Azul", None, Some("img"), &[(Size::G1, 1)]),
            record("R2", "A - Rosa", "Rosa", None, Some("img"), &[]),
        ];
        let records = {
            let mut rs = records;
            rs[0].edit_details("R1", "A - Azul", Some(8900)).unwrap();
            rs[2].edit_details("R2", "A - Rosa", Some(10900)).unwrap();
            rs
        };

        let groups = group_by_image(&records);
        let group = &groups[0];
        assert_eq!(group.references(), vec!["R1", "R2"]);
        assert_eq!(group.color_count(), 2);
        assert_eq!(group.price_range_cents(), Some((8900, 10900)));
    }
}
