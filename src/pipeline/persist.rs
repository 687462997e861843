//! Model artifact persistence via bincode

use std::path::Path;

use tracing::{debug, info, instrument};

use super::error::PipelineError;
use super::model::FraudModel;

/// Write the model to `path` as a single bincode artifact.
///
/// The destination directory must already exist. Encoding is deterministic,
/// so the same model always produces the same bytes.
#[instrument(skip(model), fields(path = %path.display()))]
pub fn save_model(model: &FraudModel, path: &Path) -> Result<(), PipelineError> {
    let bytes = bincode::serialize(model).map_err(|source| PipelineError::ModelFormat {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, &bytes).map_err(|e| PipelineError::file_access(path, e))?;

    info!(
        size_bytes = bytes.len(),
        n_trees = model.forest().n_trees(),
        "model saved"
    );
    Ok(())
}

/// Read a model previously written by [`save_model`]
#[instrument(fields(path = %path.display()))]
pub fn load_model(path: &Path) -> Result<FraudModel, PipelineError> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::file_access(path, e))?;
    debug!(size_bytes = bytes.len(), "read model file");

    let model: FraudModel =
        bincode::deserialize(&bytes).map_err(|source| PipelineError::ModelFormat {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        n_trees = model.forest().n_trees(),
        n_features = model.feature_names().len(),
        "model loaded"
    );
    Ok(model)
}

/// Size of the artifact on disk in bytes
pub fn artifact_size(path: &Path) -> Result<u64, PipelineError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| PipelineError::file_access(path, e))
}
