//! Screen backend: async weather refresh and background frosting.
//! Network and blur work run off the main loop; results are sent via mpsc.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use skyglass_blur::{frost, FrostOptions, RasterImage};
use skyglass_core::AppError;
use skyglass_weather::{
    location, reverse_geocode, ForecastBlocks, Location, LocationSettings, WeatherPayload,
    WeatherProvider,
};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Messages sent from background tasks back to the main loop
#[derive(Debug)]
pub enum ScreenMessage {
    RefreshDone {
        generation: u64,
        result: Result<RefreshOutcome, AppError>,
    },
    FrostDone(Result<PathBuf, AppError>),
}

#[derive(Debug)]
pub struct RefreshOutcome {
    pub location: Location,
    pub city: Option<String>,
    pub payload: WeatherPayload,
}

/// Everything one refresh needs; cheap to build per request.
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    pub provider: Arc<WeatherProvider>,
    pub location: LocationSettings,
    /// Skip the location lookup when the screen already has a fix.
    pub known_location: Option<Location>,
    pub geocode_url: String,
    pub blocks: ForecastBlocks,
    /// Issue order, from [`RefreshTracker::issue`].
    pub generation: u64,
}

/// Orders overlapping refreshes so a slow, older result never replaces a
/// newer one.
#[derive(Debug, Default)]
pub struct RefreshTracker {
    issued: u64,
    applied: u64,
}

impl RefreshTracker {
    /// Generation for the next request.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a finished refresh is still current; accepting it retires
    /// every earlier generation.
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation <= self.applied {
            tracing::debug!(generation, applied = self.applied, "Dropping stale refresh");
            return false;
        }
        self.applied = generation;
        true
    }
}

/// Resolve location, name it, and fetch the forecast.
pub async fn refresh(request: RefreshRequest) -> Result<RefreshOutcome, AppError> {
    let location = match request.known_location {
        Some(loc) => loc,
        None => location::get_current_location(&request.location).await?,
    };

    let (city, payload) = tokio::join!(
        reverse_geocode(&location, &request.geocode_url),
        request.provider.fetch(&location, request.blocks)
    );

    Ok(RefreshOutcome {
        location,
        city,
        payload: payload?,
    })
}

/// Request a refresh asynchronously.
/// Sends `RefreshDone` on the channel when complete.
pub fn request_refresh(
    tx: &UnboundedSender<ScreenMessage>,
    request: RefreshRequest,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let generation = request.generation;
        let result = refresh(request).await;
        let _ = tx.send(ScreenMessage::RefreshDone { generation, result });
    })
}

/// Load a PNG, frost it and write the result.
pub fn frost_file(
    source: &Path,
    output: &Path,
    options: &FrostOptions,
) -> Result<PathBuf, AppError> {
    let rgba = image::open(source)
        .with_context(|| format!("Failed to read background {}", source.display()))?
        .to_rgba8();

    let frosted = frost(&RasterImage::from_rgba(&rgba), options)?;

    frosted
        .to_rgba()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!("Frosted background written to {}", output.display());
    Ok(output.to_path_buf())
}

/// Frost a background image on the blocking pool.
/// Sends `FrostDone` on the channel when complete.
pub fn request_frost(
    tx: &UnboundedSender<ScreenMessage>,
    source: PathBuf,
    output: PathBuf,
    options: FrostOptions,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || frost_file(&source, &output, &options))
            .await
            .unwrap_or_else(|e| Err(AppError::Other(anyhow!("Frost task failed: {}", e))));
        let _ = tx.send(ScreenMessage::FrostDone(result));
    })
}
