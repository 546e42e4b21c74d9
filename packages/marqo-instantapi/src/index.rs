//! Index lifecycle: existence checks, modality compatibility, creation
//! and deletion.

use tracing::info;

use marqo_client::{CreateIndexResponse, DeleteIndexResponse, IndexSettings};

use crate::adapter::InstantApiMarqoAdapter;
use crate::error::{AdapterError, Result};
use crate::traits::{IndexEngine, PageExtractor};

/// Index-creation defaults: which embedding model each modality gets.
///
/// An explicit immutable value held by the adapter, passed at
/// construction time.
#[derive(Debug, Clone)]
pub struct IndexDefaults {
    /// Model for text-only indexes.
    pub text_model: String,

    /// Model for multimodal (text + image) indexes.
    pub multimodal_model: String,

    /// Whether created indexes normalize embeddings.
    pub normalize_embeddings: bool,
}

impl Default for IndexDefaults {
    fn default() -> Self {
        Self {
            text_model: "hf/e5-base-v2".to_string(),
            multimodal_model: "open_clip/ViT-B-32/laion2b_s34b_b79k".to_string(),
            normalize_embeddings: true,
        }
    }
}

impl IndexDefaults {
    /// Set the text-only model.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Set the multimodal model.
    pub fn with_multimodal_model(mut self, model: impl Into<String>) -> Self {
        self.multimodal_model = model.into();
        self
    }

    /// The default model for a modality.
    pub fn model_for(&self, multimodal: bool) -> &str {
        if multimodal {
            &self.multimodal_model
        } else {
            &self.text_model
        }
    }
}

impl<X: PageExtractor, E: IndexEngine> InstantApiMarqoAdapter<X, E> {
    /// Whether an index with this name exists on the engine.
    pub async fn index_exists(&self, index_name: &str) -> Result<bool> {
        let indexes = self.engine.list_indexes().await?;
        Ok(indexes.iter().any(|name| name == index_name))
    }

    /// Whether an existing index treats URL-valued fields as images.
    pub async fn index_uses_images(&self, index_name: &str) -> Result<bool> {
        let settings = self.engine.index_settings(index_name).await?;
        Ok(settings.treat_urls_and_pointers_as_images)
    }

    /// Check that an existing index's modality agrees with the fields
    /// about to be indexed, in both directions. Indexing image fields
    /// into a text-only index would silently embed the URLs as text;
    /// indexing text-only fields into a multimodal index signals a
    /// configuration mix-up just as much.
    pub async fn ensure_modality(&self, index_name: &str, wants_images: bool) -> Result<()> {
        let index_multimodal = self.index_uses_images(index_name).await?;
        if index_multimodal != wants_images {
            return Err(AdapterError::ModalityMismatch {
                index_name: index_name.to_string(),
                index_multimodal,
            });
        }
        Ok(())
    }

    /// Create an index.
    ///
    /// When no model is given, one is chosen by modality from the
    /// adapter's [`IndexDefaults`]. With `skip_if_exists`, an existing
    /// index yields a synthetic acknowledgment without inspecting whether
    /// its configuration matches the request — callers that need that
    /// guarantee should use [`Self::ensure_modality`].
    pub async fn create_index(
        &self,
        index_name: &str,
        multimodal: bool,
        model: Option<&str>,
        skip_if_exists: bool,
    ) -> Result<CreateIndexResponse> {
        if skip_if_exists && self.index_exists(index_name).await? {
            info!(index_name, "Index already exists, skipping creation");
            return Ok(CreateIndexResponse {
                acknowledged: true,
                index: Some(index_name.to_string()),
            });
        }

        let model = model.unwrap_or_else(|| self.defaults.model_for(multimodal));
        let settings = IndexSettings {
            model: Some(model.to_string()),
            treat_urls_and_pointers_as_images: multimodal,
            normalize_embeddings: self.defaults.normalize_embeddings,
            ..Default::default()
        };

        self.engine.create_index(index_name, &settings).await
    }

    /// Create an index sized to a field selection: multimodal exactly
    /// when image fields are present.
    pub async fn create_index_from_fields(
        &self,
        index_name: &str,
        text_fields: &[String],
        image_fields: &[String],
    ) -> Result<CreateIndexResponse> {
        if text_fields.is_empty() && image_fields.is_empty() {
            return Err(AdapterError::NoFieldsSpecified);
        }
        self.create_index(index_name, !image_fields.is_empty(), None, false)
            .await
    }

    /// Delete an index.
    ///
    /// `confirm` must be set; there is no interactive prompt. With
    /// `skip_if_not_exists`, deleting a missing index returns `Ok(None)`
    /// instead of the engine's not-found error.
    pub async fn delete_index(
        &self,
        index_name: &str,
        confirm: bool,
        skip_if_not_exists: bool,
    ) -> Result<Option<DeleteIndexResponse>> {
        if !confirm {
            return Err(AdapterError::DeleteNotConfirmed {
                index_name: index_name.to_string(),
            });
        }

        if skip_if_not_exists && !self.index_exists(index_name).await? {
            info!(index_name, "Index does not exist, skipping deletion");
            return Ok(None);
        }

        Ok(Some(self.engine.delete_index(index_name).await?))
    }
}
