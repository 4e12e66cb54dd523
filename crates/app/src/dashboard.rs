//! Overview numbers for the landing screen.

use std::collections::HashMap;

use serde::Serialize;

use atelier_catalog::StockRecord;
use atelier_core::Size;

/// Records with fewer total units than this count as "low stock".
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// How many colors the color ranking keeps.
const TOP_COLOR_COUNT: usize = 5;

/// Units attributed to one color across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorShare {
    pub color: String,
    pub units: u64,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_units: u64,
    pub record_count: usize,
    pub low_stock_count: usize,
    /// Units per size, all seven sizes in canonical order (zeros included).
    pub size_distribution: Vec<(Size, u64)>,
    /// Up to five colors, most units first; ties break alphabetically.
    pub top_colors: Vec<ColorShare>,
}

pub fn summarize(records: &[StockRecord]) -> DashboardSummary {
    let total_units = records.iter().map(|r| u64::from(r.total())).sum();
    let low_stock_count = records
        .iter()
        .filter(|r| r.total() < LOW_STOCK_THRESHOLD)
        .count();

    let mut per_size: HashMap<Size, u64> = HashMap::new();
    let mut per_color: HashMap<String, u64> = HashMap::new();
    for record in records {
        for (size, qty) in record.stocks().iter() {
            *per_size.entry(size).or_default() += u64::from(qty);
        }
        *per_color.entry(record.color().to_string()).or_default() += u64::from(record.total());
    }

    let size_distribution = Size::ALL
        .iter()
        .map(|&size| (size, per_size.get(&size).copied().unwrap_or(0)))
        .collect();

    let mut top_colors: Vec<ColorShare> = per_color
        .into_iter()
        .map(|(color, units)| ColorShare { color, units })
        .collect();
    top_colors.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.color.cmp(&b.color)));
    top_colors.truncate(TOP_COLOR_COUNT);

    DashboardSummary {
        total_units,
        record_count: records.len(),
        low_stock_count,
        size_distribution,
        top_colors,
    }
}
