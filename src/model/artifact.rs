use crate::error::{ScoringError, StartupError};
use crate::schema::canonical::{CanonicalFeatureVector, CANONICAL_FEATURES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        value: f64,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    fn value(&self) -> f64 {
        match self {
            TreeNode::Split { value, .. } => *value,
            TreeNode::Leaf { value } => *value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    pub feature_names: Vec<String>,
    pub base_score: f64,
    pub trees: Vec<DecisionTree>,
}

#[derive(Debug)]
pub struct ScoringModel {
    artifact: ModelArtifact,
}

impl ScoringModel {
    pub fn load(path: &str) -> Result<Self, StartupError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            StartupError::ArtifactUnreadable {
                path: path.to_string(),
                source,
            }
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| StartupError::ArtifactCorrupt(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, StartupError> {
        if artifact.trees.is_empty() {
            return Err(StartupError::ArtifactCorrupt(
                "artifact contains no trees".to_string(),
            ));
        }
        let n_features = artifact.feature_names.len();
        for (tree_idx, tree) in artifact.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(StartupError::ArtifactCorrupt(format!(
                    "tree {tree_idx} has no nodes"
                )));
            }
            for (node_idx, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= n_features {
                        return Err(StartupError::ArtifactCorrupt(format!(
                            "tree {tree_idx} node {node_idx} splits on feature {feature}, model has {n_features}"
                        )));
                    }
                    // children must come after the parent so traversal terminates
                    for child in [*left, *right] {
                        if child >= tree.nodes.len() || child <= node_idx {
                            return Err(StartupError::ArtifactCorrupt(format!(
                                "tree {tree_idx} node {node_idx} has invalid child index {child}"
                            )));
                        }
                    }
                }
            }
        }

        let mut model_columns: Vec<&str> =
            artifact.feature_names.iter().map(String::as_str).collect();
        model_columns.sort_unstable();
        let mut canonical: Vec<&str> = CANONICAL_FEATURES.to_vec();
        canonical.sort_unstable();
        if model_columns != canonical {
            return Err(StartupError::FeatureMismatch {
                model: artifact.feature_names.clone(),
            });
        }

        Ok(Self { artifact })
    }

    pub fn version(&self) -> &str {
        &self.artifact.version
    }

    pub fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    pub fn raw_margin(&self, vec: &CanonicalFeatureVector) -> Result<f64, ScoringError> {
        self.check_shape(vec)?;
        let mut margin = self.artifact.base_score;
        for tree in &self.artifact.trees {
            margin += leaf_value(tree, &vec.values);
        }
        Ok(margin)
    }

    // baseline + sum(contributions) == raw_margin for the same vector
    pub fn contributions(
        &self,
        vec: &CanonicalFeatureVector,
    ) -> Result<(f64, Vec<f64>), ScoringError> {
        self.check_shape(vec)?;
        let mut baseline = self.artifact.base_score;
        let mut contributions = vec![0.0; self.artifact.feature_names.len()];
        for tree in &self.artifact.trees {
            baseline += tree.nodes[0].value();
            path_contributions(tree, &vec.values, &mut contributions);
        }
        Ok((baseline, contributions))
    }

    fn check_shape(&self, vec: &CanonicalFeatureVector) -> Result<(), ScoringError> {
        let expected = self.artifact.feature_names.len();
        if vec.values.len() != expected {
            return Err(ScoringError::Inference(format!(
                "expected {expected} feature values, got {}",
                vec.values.len()
            )));
        }
        Ok(())
    }
}

fn leaf_value(tree: &DecisionTree, values: &[f64]) -> f64 {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                idx = if values[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
            TreeNode::Leaf { value } => return *value,
        }
    }
}

fn path_contributions(tree: &DecisionTree, values: &[f64], contributions: &mut [f64]) {
    let mut idx = 0;
    let mut current = tree.nodes[0].value();
    loop {
        match &tree.nodes[idx] {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                let next = if values[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
                let next_value = tree.nodes[next].value();
                contributions[*feature] += next_value - current;
                current = next_value;
                idx = next;
            }
            TreeNode::Leaf { .. } => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_names() -> Vec<String> {
        CANONICAL_FEATURES.iter().map(|s| s.to_string()).collect()
    }

    fn single_split_tree(feature: usize, threshold: f64) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                    value: 0.1,
                },
                TreeNode::Leaf { value: -0.4 },
                TreeNode::Leaf { value: 0.6 },
            ],
        }
    }

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            version: "test-1".to_string(),
            feature_names: canonical_names(),
            base_score: -2.0,
            trees: vec![single_split_tree(0, 0.7), single_split_tree(1, 40.0)],
        }
    }

    fn vector(values: Vec<f64>) -> CanonicalFeatureVector {
        CanonicalFeatureVector {
            names: canonical_names(),
            values,
        }
    }

    #[test]
    fn margin_sums_base_score_and_leaves() {
        let model = ScoringModel::from_artifact(artifact()).unwrap();
        let vec = vector(vec![0.5, 45.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        // tree 0: 0.5 <= 0.7 -> -0.4; tree 1: 45 > 40 -> 0.6
        assert_eq!(model.raw_margin(&vec).unwrap(), -2.0 - 0.4 + 0.6);
    }

    #[test]
    fn contributions_reconstruct_the_margin() {
        let model = ScoringModel::from_artifact(artifact()).unwrap();
        let vec = vector(vec![0.9, 30.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let margin = model.raw_margin(&vec).unwrap();
        let (baseline, contributions) = model.contributions(&vec).unwrap();
        let reconstructed = baseline + contributions.iter().sum::<f64>();
        assert!((reconstructed - margin).abs() < 1e-12);
        // only the two split features moved
        assert!(contributions[0] != 0.0);
        assert!(contributions[1] != 0.0);
        assert!(contributions[2..].iter().all(|c| *c == 0.0));
    }

    #[test]
    fn wrong_value_count_is_an_inference_error() {
        let model = ScoringModel::from_artifact(artifact()).unwrap();
        let vec = CanonicalFeatureVector {
            names: vec!["age".to_string()],
            values: vec![45.0],
        };
        assert!(matches!(
            model.raw_margin(&vec),
            Err(ScoringError::Inference(_))
        ));
    }

    #[test]
    fn missing_canonical_feature_fails_startup() {
        let mut a = artifact();
        a.feature_names.pop();
        a.feature_names.push("SomethingElse".to_string());
        assert!(matches!(
            ScoringModel::from_artifact(a),
            Err(StartupError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn out_of_bounds_child_fails_startup() {
        let mut a = artifact();
        a.trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 1,
            right: 99,
            value: 0.0,
        };
        assert!(matches!(
            ScoringModel::from_artifact(a),
            Err(StartupError::ArtifactCorrupt(_))
        ));
    }

    #[test]
    fn backward_child_edge_fails_startup() {
        let mut a = artifact();
        a.trees[0].nodes[2] = TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 1,
            right: 1,
            value: 0.0,
        };
        assert!(matches!(
            ScoringModel::from_artifact(a),
            Err(StartupError::ArtifactCorrupt(_))
        ));
    }

    #[test]
    fn split_on_unknown_feature_fails_startup() {
        let mut a = artifact();
        a.trees[0].nodes[0] = TreeNode::Split {
            feature: 10,
            threshold: 0.5,
            left: 1,
            right: 2,
            value: 0.0,
        };
        assert!(matches!(
            ScoringModel::from_artifact(a),
            Err(StartupError::ArtifactCorrupt(_))
        ));
    }

    #[test]
    fn empty_artifact_fails_startup() {
        let mut a = artifact();
        a.trees.clear();
        assert!(matches!(
            ScoringModel::from_artifact(a),
            Err(StartupError::ArtifactCorrupt(_))
        ));
    }
}
