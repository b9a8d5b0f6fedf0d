//! Phase grouping and work-breakdown statistics over scored features.

use std::collections::BTreeMap;

use scopewise_shared::{
    Layer, Phase, PriorityClass, Recommendation, RiskLevel, ScoredFeature, Scope, WorkBreakdown,
};

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub by_phase: BTreeMap<Phase, Vec<ScoredFeature>>,
    pub work_breakdown: WorkBreakdown,
    pub recommendation_counts: BTreeMap<Recommendation, usize>,
    pub risk_flags: Vec<String>,
}

/// Group scored features by phase and compute the work breakdown.
///
/// Every phase key is present, even when empty. Features keep catalog order
/// within their phase.
pub fn aggregate(scored: Vec<ScoredFeature>) -> Aggregate {
    let work_breakdown = work_breakdown(&scored);

    let mut recommendation_counts: BTreeMap<Recommendation, usize> =
        Recommendation::ALL.into_iter().map(|r| (r, 0)).collect();
    for feature in &scored {
        *recommendation_counts.entry(feature.recommendation).or_default() += 1;
    }

    let risk_flags = scored
        .iter()
        .filter(|f| f.risk_level == RiskLevel::High && f.recommendation != Recommendation::Exclude)
        .map(|f| f.feature.id.clone())
        .collect();

    let mut by_phase: BTreeMap<Phase, Vec<ScoredFeature>> =
        Phase::ALL.into_iter().map(|p| (p, Vec::new())).collect();
    for feature in scored {
        by_phase.entry(feature.feature.phase).or_default().push(feature);
    }

    Aggregate {
        by_phase,
        work_breakdown,
        recommendation_counts,
        risk_flags,
    }
}

/// Percentages by scope, layer and priority over non-excluded features.
pub fn work_breakdown(scored: &[ScoredFeature]) -> WorkBreakdown {
    let included: Vec<&ScoredFeature> = scored
        .iter()
        .filter(|f| f.recommendation != Recommendation::Exclude)
        .collect();

    // Avoid dividing by zero; every percentage then reads 0.
    let divisor = included.len().max(1);

    WorkBreakdown {
        included: included.len(),
        scope: percentages(&Scope::ALL, divisor, |s| {
            included.iter().filter(|f| f.feature.scope == *s).count()
        }),
        layer: percentages(&Layer::ALL, divisor, |l| {
            included.iter().filter(|f| f.feature.layer == *l).count()
        }),
        priority: percentages(&PriorityClass::ALL, divisor, |p| {
            included.iter().filter(|f| f.feature.priority == *p).count()
        }),
    }
}

fn percentages<K: Copy + Ord>(
    keys: &[K],
    divisor: usize,
    count: impl Fn(&K) -> usize,
) -> BTreeMap<K, u32> {
    keys.iter()
        .map(|k| (*k, percent(count(k), divisor)))
        .collect()
}

/// `count / total` as a whole percentage, rounded to nearest.
fn percent(count: usize, total: usize) -> u32 {
    ((count as f64 * 100.0) / total as f64).round() as u32
}
