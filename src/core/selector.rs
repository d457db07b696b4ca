use crate::core::{Item, SelectionResult};
use crate::utils::error::{CouponError, Result};
use crate::utils::validation::validate_budget;
use rust_decimal::Decimal;

/// Spends a budget across as many items as possible.
///
/// Items are taken cheapest first; equal prices keep their input order. Every
/// item is tried, so a later item that still fits is included even after an
/// earlier one was skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetSelector;

impl BudgetSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select_optimal(&self, items: &[Item], budget: Decimal) -> Result<SelectionResult> {
        if items.is_empty() {
            return Err(CouponError::EmptyCatalogError);
        }
        validate_budget(budget)?;

        let mut ordered: Vec<&Item> = items.iter().collect();
        // sort_by is stable
        ordered.sort_by(|a, b| a.price.cmp(&b.price));

        let mut result = SelectionResult::empty();
        for item in ordered {
            // an overflowing sum can never fit a Decimal budget
            match result.total_spent.checked_add(item.price) {
                Some(candidate) if candidate <= budget => {
                    result.selected_ids.push(item.id.clone());
                    result.total_spent = candidate;
                }
                _ => {
                    tracing::trace!("Skipping {} ({} over remaining budget)", item.id, item.price);
                }
            }
        }

        tracing::debug!(
            "Selected {}/{} items, spent {} of {}",
            result.selected_ids.len(),
            items.len(),
            result.total_spent,
            budget
        );

        Ok(result)
    }
}
