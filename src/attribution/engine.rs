use crate::domain::prediction::FeatureAttribution;
use crate::error::ScoringError;
use crate::model::artifact::ScoringModel;
use crate::schema::canonical::CanonicalFeatureVector;

pub fn explain(
    vec: &CanonicalFeatureVector,
    model: &ScoringModel,
    k: usize,
) -> Result<Vec<FeatureAttribution>, ScoringError> {
    let (_baseline, contributions) = model.contributions(vec)?;
    let mut ranked: Vec<FeatureAttribution> = model
        .feature_names()
        .iter()
        .zip(contributions)
        .map(|(name, impact)| FeatureAttribution {
            feature: name.clone(),
            impact,
        })
        .collect();
    rank_attributions(&mut ranked);
    ranked.truncate(k);
    Ok(ranked)
}

// descending absolute impact; exact ties ordered by feature name so the
// ranking is reproducible
pub fn rank_attributions(attributions: &mut [FeatureAttribution]) {
    attributions.sort_by(|a, b| {
        b.impact
            .abs()
            .partial_cmp(&a.impact.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.feature.cmp(&b.feature))
    });
}
