use strata_core::AttributeSet;

/// Collapses a cell's attributes into the scalar that orders the open list.
pub trait CostEstimator {
    /// Cost of an item with attributes `item` under the weight table
    /// `weights`.
    fn calculate(&self, weights: &AttributeSet, item: &AttributeSet) -> f64;
}

impl<F> CostEstimator for F
where
    F: Fn(&AttributeSet, &AttributeSet) -> f64,
{
    fn calculate(&self, weights: &AttributeSet, item: &AttributeSet) -> f64 {
        self(weights, item)
    }
}
