use crate::core::aggregator::CatalogAggregator;
use crate::core::selector::BudgetSelector;
use crate::core::{CatalogSource, ItemId, SelectionResult};
use crate::utils::error::Result;
use crate::utils::validation::validate_budget;
use rust_decimal::Decimal;

/// Resolves a basket of ids, then spends the budget over it.
pub struct CouponPipeline<C: CatalogSource> {
    aggregator: CatalogAggregator<C>,
    selector: BudgetSelector,
}

impl<C: CatalogSource> CouponPipeline<C> {
    pub fn new(aggregator: CatalogAggregator<C>) -> Self {
        Self {
            aggregator,
            selector: BudgetSelector::new(),
        }
    }

    pub async fn apply(&self, ids: &[ItemId], budget: Decimal) -> Result<SelectionResult> {
        validate_budget(budget)?;

        let items = self.aggregator.resolve_all(ids).await?;
        self.selector.select_optimal(&items, budget)
    }
}
