//! A process-wide default engine.
//!
//! The engine is built once with [`init`] or [`init_embedded`]; every
//! later call reads it without locking.

use std::sync::{Arc, OnceLock};

use mph_loader::ReferenceData;
use mph_types::{ClassificationOutcome, ComputeOptions, TumorRecord};
use tracing::info;

use crate::engine::{EngineConfig, MphEngine};
use crate::error::{EngineError, EngineResult};

static ENGINE: OnceLock<MphEngine> = OnceLock::new();

/// Builds the default engine over `data`.
///
/// Fails with [`EngineError::AlreadyInitialized`] on a second call.
pub fn init(data: Arc<ReferenceData>) -> EngineResult<&'static MphEngine> {
    init_with(data, EngineConfig::default())
}

/// Builds the default engine over `data` with `config`.
pub fn init_with(data: Arc<ReferenceData>, config: EngineConfig) -> EngineResult<&'static MphEngine> {
    if ENGINE.get().is_some() {
        return Err(EngineError::AlreadyInitialized);
    }
    let engine = MphEngine::with_config(data, config)?;
    ENGINE.set(engine).map_err(|_| EngineError::AlreadyInitialized)?;
    info!("default engine initialized");
    get()
}

/// Builds the default engine over the embedded reference data.
pub fn init_embedded() -> EngineResult<&'static MphEngine> {
    init(Arc::new(ReferenceData::load_embedded()?))
}

/// Returns the default engine.
pub fn get() -> EngineResult<&'static MphEngine> {
    ENGINE.get().ok_or(EngineError::NotInitialized)
}

/// Classifies a pair with the default engine.
pub fn compute_primaries(
    first: &TumorRecord,
    second: &TumorRecord,
    options: &ComputeOptions,
) -> EngineResult<ClassificationOutcome> {
    Ok(get()?.compute_primaries(first, second, options))
}

/// Returns the id of the group the default engine selects.
pub fn select_group(site: &str, histology: &str, behavior: &str, year: &str) -> EngineResult<Option<&'static str>> {
    Ok(get()?
        .select_group(site, histology, behavior, year)
        .map(|group| group.id()))
}
