use crate::error::ScoringError;
use crate::model::artifact::ScoringModel;
use crate::schema::canonical::CanonicalFeatureVector;

pub fn score(vec: &CanonicalFeatureVector, model: &ScoringModel) -> Result<f64, ScoringError> {
    let margin = model.raw_margin(vec)?;
    Ok(sigmoid(margin))
}

pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

pub fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}
