//! The ingestion pipeline: extract, validate, identify, submit.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::adapter::InstantApiMarqoAdapter;
use crate::error::{AdapterError, Result};
use crate::mappings::make_mappings;
use crate::schema::{matches_schema, validate_flat};
use crate::traits::{IndexEngine, PageExtractor};
use crate::types::{document_id, AddDocumentsParams, IngestOutcome, ID_FIELD, SOURCE_URL_FIELD};

impl<X: PageExtractor, E: IndexEngine> InstantApiMarqoAdapter<X, E> {
    /// Extract every URL in the batch and index the resulting records.
    ///
    /// The target index is created on demand, sized to the field
    /// selection; a pre-existing index must agree on modality. The schema
    /// must be flat, checked before any extraction call is spent. Each URL
    /// is then extracted sequentially: records that fail extraction or
    /// (with `enforce_schema`) don't match the requested structure become
    /// [`IngestOutcome::Failed`] entries and never reach the index. Valid
    /// records get a content-addressed `_id` and the source URL attached,
    /// and are submitted in one logical call, chunked by
    /// `client_batch_size`.
    ///
    /// Failure outcomes come first in the returned list, then one
    /// [`IngestOutcome::Indexed`] entry per submitted document in chunk
    /// order.
    pub async fn add_documents(
        &self,
        webpage_urls: &[String],
        index_name: &str,
        params: &AddDocumentsParams,
    ) -> Result<Vec<IngestOutcome>> {
        if params.text_fields.is_empty() && params.image_fields.is_empty() {
            return Err(AdapterError::NoFieldsSpecified);
        }

        if self.index_exists(index_name).await? {
            self.ensure_modality(index_name, params.wants_images()).await?;
        } else {
            info!(index_name, "Index does not exist, creating it");
            self.create_index_from_fields(index_name, &params.text_fields, &params.image_fields)
                .await?;
        }

        // Fail before the first extraction call: every record from a
        // non-flat schema would be rejected by the engine anyway.
        validate_flat(&params.api_response_structure)?;

        let mut outcomes: Vec<IngestOutcome> = Vec::new();
        let mut documents: Vec<Value> = Vec::new();

        for webpage_url in webpage_urls {
            let response = match self
                .extractor
                .retrieve(
                    webpage_url,
                    &params.api_method_name,
                    &params.api_response_structure,
                )
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(webpage_url = %webpage_url, error = %e, "Extraction failed");
                    outcomes.push(IngestOutcome::Failed {
                        webpage_url: webpage_url.clone(),
                        raw_response: Value::Null,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if params.enforce_schema
                && !matches_schema(&params.api_response_structure, &response)
            {
                warn!(webpage_url = %webpage_url, "Extracted record does not match the requested structure");
                outcomes.push(IngestOutcome::Failed {
                    webpage_url: webpage_url.clone(),
                    raw_response: response,
                    reason: "response shape does not match the requested structure".to_string(),
                });
                continue;
            }

            let mut record = match response {
                Value::Object(record) => record,
                other => {
                    outcomes.push(IngestOutcome::Failed {
                        webpage_url: webpage_url.clone(),
                        raw_response: other,
                        reason: "response is not a JSON object".to_string(),
                    });
                    continue;
                }
            };

            record.insert(ID_FIELD.to_string(), json!(document_id(webpage_url)));
            record.insert(SOURCE_URL_FIELD.to_string(), json!(webpage_url));
            documents.push(Value::Object(record));
        }

        debug!(
            index_name,
            valid = documents.len(),
            failed = outcomes.len(),
            "Extraction finished"
        );

        if !documents.is_empty() {
            // One plan for the whole batch; every document shares the same
            // field selection.
            let plan = make_mappings(
                &self.combination_field,
                &params.text_fields,
                &params.image_fields,
                params.total_text_weight,
                params.total_image_weight,
            );

            let responses = self
                .engine
                .add_documents(
                    index_name,
                    &documents,
                    &plan.tensor_fields,
                    plan.mappings.as_ref(),
                    params.client_batch_size,
                )
                .await?;

            for response in responses {
                if response.errors {
                    warn!(index_name, "Engine reported item errors in a chunk");
                }
                for item in response.items {
                    outcomes.push(IngestOutcome::Indexed {
                        document_id: item.id.clone(),
                        item,
                    });
                }
            }
        }

        info!(
            index_name,
            outcomes = outcomes.len(),
            "add_documents finished"
        );
        Ok(outcomes)
    }
}
