//! Field-weight composition for multimodal indexing.
//!
//! Decides how the selected fields reach the index: independently (one
//! tensor field per source field) when only one modality is present, or
//! blended into a single weighted combination field when both text and
//! image fields are indexed.

use indexmap::IndexMap;
use serde_json::{json, Value};

/// Default name of the synthetic combined field.
pub const COMBINATION_FIELD: &str = "combination";

/// How a batch of documents should be vectorized.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWeightPlan {
    /// Marqo mappings object for the combination field, or `None` when
    /// fields are indexed independently.
    pub mappings: Option<Value>,

    /// Fields to embed: either the original source fields, or the single
    /// combination field.
    pub tensor_fields: Vec<String>,
}

/// Build the weight plan for a set of text and image fields.
///
/// Single-modality inputs pass through unchanged, regardless of budget.
/// When both modalities are present, a group with a zero budget is
/// dropped and the plan degrades to the other group's passthrough;
/// otherwise each group's weight budget is split evenly across its
/// fields and everything is blended into one `multimodal_combination`
/// mapping.
///
/// Pure function, deterministic: text fields keep their order, image
/// fields follow.
pub fn make_mappings(
    combination_field: &str,
    text_fields: &[String],
    image_fields: &[String],
    total_text_weight: f64,
    total_image_weight: f64,
) -> FieldWeightPlan {
    if text_fields.is_empty() {
        return FieldWeightPlan {
            mappings: None,
            tensor_fields: image_fields.to_vec(),
        };
    }
    if image_fields.is_empty() {
        return FieldWeightPlan {
            mappings: None,
            tensor_fields: text_fields.to_vec(),
        };
    }

    // Both modalities present: zero-budget groups drop out of the
    // combination.
    if total_text_weight == 0.0 {
        return FieldWeightPlan {
            mappings: None,
            tensor_fields: image_fields.to_vec(),
        };
    }
    if total_image_weight == 0.0 {
        return FieldWeightPlan {
            mappings: None,
            tensor_fields: text_fields.to_vec(),
        };
    }

    let text_weight = total_text_weight / text_fields.len() as f64;
    let image_weight = total_image_weight / image_fields.len() as f64;

    let mut weights: IndexMap<&str, f64> = IndexMap::new();
    for field in text_fields {
        weights.insert(field, text_weight);
    }
    for field in image_fields {
        weights.insert(field, image_weight);
    }

    FieldWeightPlan {
        mappings: Some(json!({
            combination_field: {
                "type": "multimodal_combination",
                "weights": weights,
            }
        })),
        tensor_fields: vec![combination_field.to_string()],
    }
}
