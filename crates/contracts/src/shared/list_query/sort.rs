use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header indicator
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

/// One sort option held by a list.
///
/// Several may be kept client-side; single-sort endpoints only read the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: String,
    /// Column label shown in the sort picker
    pub label: String,
    pub direction: SortDirection,
}

impl SortOption {
    pub fn new(field: impl Into<String>, label: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            direction,
        }
    }
}

/// Toggle sorting on a column header click.
///
/// Clicking the current primary column flips its direction, clicking another
/// column makes it primary (ascending) and keeps the rest as secondary sorts.
pub fn toggle_sort(sorts: &[SortOption], field: &str, label: &str) -> Vec<SortOption> {
    match sorts.first() {
        Some(primary) if primary.field == field => {
            let mut next = sorts.to_vec();
            next[0].direction = primary.direction.toggled();
            next
        }
        _ => {
            let mut next = Vec::with_capacity(sorts.len() + 1);
            next.push(SortOption::new(field, label, SortDirection::Asc));
            next.extend(sorts.iter().filter(|s| s.field != field).cloned());
            next
        }
    }
}
