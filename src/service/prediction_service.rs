use crate::attribution::engine::{explain, rank_attributions};
use crate::domain::features::CustomerFeatures;
use crate::domain::prediction::{FeatureAttribution, PredictionResult};
use crate::error::ScoringError;
use crate::model::artifact::ScoringModel;
use crate::schema::canonical::canonicalize;
use crate::scoring::engine::{clamp01, score};
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_TOP_K: usize = 3;
pub const RESULT_DECIMALS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Scored,
    Explained,
    Completed,
}

#[derive(Clone)]
pub struct PredictionService {
    pub model: Arc<ScoringModel>,
}

impl PredictionService {
    pub fn predict(&self, raw: &CustomerFeatures) -> Result<PredictionResult, ScoringError> {
        self.predict_top_k(raw, DEFAULT_TOP_K)
    }

    pub fn predict_top_k(
        &self,
        raw: &CustomerFeatures,
        k: usize,
    ) -> Result<PredictionResult, ScoringError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, stage = ?Stage::Received, "prediction request accepted");

        let vector = canonicalize(raw, self.model.feature_names())
            .map_err(|e| fail(request_id, Stage::Received, e))?;
        tracing::debug!(%request_id, stage = ?Stage::Validated, "payload canonicalized");

        let probability =
            score(&vector, &self.model).map_err(|e| fail(request_id, Stage::Validated, e))?;
        tracing::debug!(%request_id, stage = ?Stage::Scored, probability, "probability computed");

        let ranked =
            explain(&vector, &self.model, k).map_err(|e| fail(request_id, Stage::Scored, e))?;
        tracing::debug!(
            %request_id,
            stage = ?Stage::Explained,
            top_features = ranked.len(),
            "attributions ranked"
        );

        // rounding can merge near-ties, so re-rank on the rounded values
        let mut top_features: Vec<FeatureAttribution> = ranked
            .into_iter()
            .map(|a| FeatureAttribution {
                feature: a.feature,
                impact: round(a.impact),
            })
            .collect();
        rank_attributions(&mut top_features);

        let result = PredictionResult {
            default_probability: round(clamp01(probability)),
            top_features,
        };
        tracing::debug!(%request_id, stage = ?Stage::Completed, "prediction assembled");
        Ok(result)
    }
}

fn fail(request_id: Uuid, stage: Stage, e: ScoringError) -> ScoringError {
    tracing::warn!(%request_id, stage = ?stage, kind = e.code(), error = %e, "prediction failed");
    e
}

pub fn round(value: f64) -> f64 {
    let factor = 10f64.powi(RESULT_DECIMALS as i32);
    (value * factor).round() / factor
}
