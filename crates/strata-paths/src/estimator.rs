use strata_core::AttributeSet;

use crate::traits::CostEstimator;

/// Default estimator: the weighted sum of an item's attributes.
///
/// The weight table is copied, multiplied element-wise by the item and
/// summed. Keys missing on either side read as zero and drop out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedSum;

impl CostEstimator for WeightedSum {
    #[inline]
    fn calculate(&self, weights: &AttributeSet, item: &AttributeSet) -> f64 {
        let mut w = *weights;
        w.mul_set(item);
        w.sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Attr;

    #[test]
    fn weighted_sum() {
        let weights = AttributeSet::new()
            .with(Attr::Difficulty, 2.0)
            .with(Attr::HValue, 1.0)
            .with(Attr::Temperature, 0.5);
        let item = AttributeSet::new()
            .with(Attr::Difficulty, 3.0)
            .with(Attr::HValue, 10.0)
            .with(Attr::Friction, 99.0);
        assert_eq!(WeightedSum.calculate(&weights, &item), 6.0 + 10.0);
    }

    #[test]
    fn empty_weights_cost_nothing() {
        let item = AttributeSet::splat(4.0);
        assert_eq!(WeightedSum.calculate(&AttributeSet::ZERO, &item), 0.0);
    }

    #[test]
    fn closures_are_estimators() {
        let max = |_: &AttributeSet, item: &AttributeSet| {
            item.iter().map(|(_, v)| v).fold(0.0, f64::max)
        };
        let item = AttributeSet::new().with(Attr::Temperature, 3.0);
        assert_eq!(max.calculate(&AttributeSet::ZERO, &item), 3.0);
    }
}
