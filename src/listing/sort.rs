use std::fmt;
use std::str::FromStr;

use crate::catalog::ProductSummary;

/// Direction of the price sort on the listing page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Query string form, `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order `{other}`")),
        }
    }
}

/// Products ordered by price. The sort is stable, so equal prices keep
/// the order the catalog returned them in.
pub fn sort_by_price(products: &[ProductSummary], order: SortOrder) -> Vec<ProductSummary> {
    let mut sorted = products.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
    sorted
}
