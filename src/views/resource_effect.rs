//! Resource effect view
//!
//! Grid of catalog technologies. Outside comparison mode a click expands a
//! detail panel; in comparison mode two picks open a side-by-side table.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::catalog::{ElectricityCost, ReferenceStore, Technology, Tier};
use crate::state::{SelectOutcome, Selection, SelectionState, StateError, StateResult};

/// Column that wins a comparison row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub left: String,
    pub right: String,
    /// `None` for ties and attributes with no preferred direction
    pub better: Option<Side>,
}

/// Side-by-side attributes of two technologies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub left: String,
    pub right: String,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Rows won by each side
    pub fn score(&self) -> (usize, usize) {
        self.rows.iter().fold((0, 0), |(l, r), row| match row.better {
            Some(Side::Left) => (l + 1, r),
            Some(Side::Right) => (l, r + 1),
            None => (l, r),
        })
    }
}

fn lower_wins(left: f64, right: f64) -> Option<Side> {
    match left.partial_cmp(&right) {
        Some(Ordering::Less) => Some(Side::Left),
        Some(Ordering::Greater) => Some(Side::Right),
        _ => None,
    }
}

fn higher_wins<T: Ord>(left: T, right: T) -> Option<Side> {
    match left.cmp(&right) {
        Ordering::Greater => Some(Side::Left),
        Ordering::Less => Some(Side::Right),
        Ordering::Equal => None,
    }
}

fn lower_tier_wins(left: Tier, right: Tier) -> Option<Side> {
    higher_wins(right, left)
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn cost_row(label: &'static str, left: f64, right: f64) -> ComparisonRow {
    ComparisonRow {
        label,
        left: money(left),
        right: money(right),
        better: lower_wins(left, right),
    }
}

/// Compare two technologies attribute by attribute
///
/// Lower costs, emissions and environmental impact win; higher cost
/// efficiency wins. `N/A` electricity costs are not ranked.
pub fn compare(left: &Technology, right: &Technology) -> Comparison {
    let electricity_better = match (left.electricity_cost, right.electricity_cost) {
        (ElectricityCost::Amount(l), ElectricityCost::Amount(r)) => lower_wins(l, r),
        _ => None,
    };

    let rows = vec![
        ComparisonRow {
            label: "Energy output",
            left: left.energy_output.clone(),
            right: right.energy_output.clone(),
            better: None,
        },
        ComparisonRow {
            label: "Cost efficiency",
            left: left.cost_efficiency.to_string(),
            right: right.cost_efficiency.to_string(),
            better: higher_wins(left.cost_efficiency, right.cost_efficiency),
        },
        ComparisonRow {
            label: "Environmental impact",
            left: left.environmental_impact.to_string(),
            right: right.environmental_impact.to_string(),
            better: lower_tier_wins(left.environmental_impact, right.environmental_impact),
        },
        cost_row("Product cost", left.product_cost, right.product_cost),
        cost_row("Installation cost", left.installation_cost, right.installation_cost),
        cost_row("Maintenance cost", left.maintenance_cost, right.maintenance_cost),
        cost_row("Upfront cost", left.upfront_cost(), right.upfront_cost()),
        ComparisonRow {
            label: "Carbon emissions",
            left: format!("{}", left.carbon_emissions),
            right: format!("{}", right.carbon_emissions),
            better: lower_wins(left.carbon_emissions, right.carbon_emissions),
        },
        ComparisonRow {
            label: "Electricity cost",
            left: left.electricity_cost.to_string(),
            right: right.electricity_cost.to_string(),
            better: electricity_better,
        },
    ];

    Comparison {
        left: left.name.clone(),
        right: right.name.clone(),
        rows,
    }
}

/// Catalog grid with selection state
pub struct ResourceEffectView {
    store: Arc<ReferenceStore>,
    selection: SelectionState,
}

impl ResourceEffectView {
    pub fn mount(store: Arc<ReferenceStore>) -> Self {
        Self {
            store,
            selection: SelectionState::new(),
        }
    }

    pub fn technologies(&self) -> &[Technology] {
        self.store.technologies()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn set_comparison_mode(&mut self, enabled: bool) {
        self.selection.set_comparison_mode(enabled);
    }

    /// Click on the grid cell at `index`
    pub fn select(&mut self, index: usize) -> StateResult<SelectOutcome> {
        let len = self.store.technologies().len();
        if index >= len {
            return Err(StateError::IndexOutOfRange { index, len });
        }
        let outcome = self.selection.select(index);
        tracing::debug!(index, ?outcome, "Technology selection");
        Ok(outcome)
    }

    /// Click on the grid cell for a technology name
    pub fn select_by_name(&mut self, name: &str) -> StateResult<SelectOutcome> {
        let index = self
            .store
            .technology_index(name)
            .ok_or_else(|| StateError::NotFound(format!("technology {}", name)))?;
        self.select(index)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Technology whose detail panel is open
    pub fn expanded_detail(&self) -> Option<&Technology> {
        self.selection
            .expanded()
            .and_then(|i| self.store.technology_at(i))
    }

    /// Technologies picked for comparison, in pick order
    pub fn selected(&self) -> Vec<&Technology> {
        match self.selection.selection() {
            Selection::Idle => Vec::new(),
            Selection::Single(a) => self.store.technology_at(a).into_iter().collect(),
            Selection::Paired(a, b) => [a, b]
                .iter()
                .filter_map(|&i| self.store.technology_at(i))
                .collect(),
        }
    }

    /// Comparison table when two technologies are selected
    pub fn comparison(&self) -> Option<Comparison> {
        if !self.selection.comparison_open() {
            return None;
        }
        let (a, b) = self.selection.selection().pair()?;
        let left = self.store.technology_at(a)?;
        let right = self.store.technology_at(b)?;
        Some(compare(left, right))
    }
}
