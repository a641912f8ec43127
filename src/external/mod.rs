//! Seams toward the devices the core never owns: QR scanning and
//! rendering, geolocation, clipboard, URL launching. Every call is a
//! single-shot async operation; a retry is the user invoking it again.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use url::Url;

#[derive(Debug, Error)]
pub enum ExternalDeviceError {
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("could not read a QR code: {0}")]
    Scan(String),
    #[error("geolocation unavailable: {0}")]
    Geolocation(String),
    #[error("geolocation gave no position within {0:?}")]
    GeolocationTimeout(Duration),
    #[error("clipboard rejected the text: {0}")]
    Clipboard(String),
    #[error("QR rendering failed: {0}")]
    Render(String),
    #[error("could not open the destination URL: {0}")]
    Launcher(String),
}

/// A camera or image-file scan session. `scan` resolves once with the
/// decoded text; `stop` aborts the session and releases the device.
#[async_trait]
pub trait QrSource: Send {
    async fn scan(&mut self) -> Result<String, ExternalDeviceError>;
    async fn stop(&mut self);
}

/// At most one scanner session is live at a time. Handing a new scanner in
/// stops the previous session first.
#[derive(Default)]
pub struct ScannerGate<S> {
    current: Option<S>,
}

impl<S: QrSource> ScannerGate<S> {
    pub fn new() -> ScannerGate<S> {
        ScannerGate { current: None }
    }

    pub async fn acquire(&mut self, scanner: S) -> &mut S {
        self.release().await;
        self.current.insert(scanner)
    }

    pub async fn release(&mut self) {
        if let Some(mut previous) = self.current.take() {
            previous.stop().await;
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Position, ExternalDeviceError>;
}

/// Bound on a single geolocation attempt.
pub const GEO_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn acquire_position(
    provider: &dyn PositionProvider,
) -> Result<Position, ExternalDeviceError> {
    acquire_position_within(provider, GEO_TIMEOUT).await
}

pub async fn acquire_position_within(
    provider: &dyn PositionProvider,
    timeout: Duration,
) -> Result<Position, ExternalDeviceError> {
    match tokio::time::timeout(timeout, provider.acquire()).await {
        Ok(result) => result,
        Err(_) => {
            warn!(?timeout, "geolocation timed out");
            Err(ExternalDeviceError::GeolocationTimeout(timeout))
        }
    }
}

#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write(&self, text: &str) -> Result<(), ExternalDeviceError>;
}

/// In-memory fallback for environments without a clipboard API; the
/// surface reads the buffer back and offers manual copy.
#[derive(Debug, Default)]
pub struct BufferClipboard {
    last: Mutex<Option<String>>,
}

impl BufferClipboard {
    pub fn last(&self) -> Option<String> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardSink for BufferClipboard {
    async fn write(&self, text: &str) -> Result<(), ExternalDeviceError> {
        *self.last.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccLevel {
    Low,
    Medium,
    Quartile,
    High,
}

/// Rendering parameters the downstream QR library consumes. The defaults
/// keep codes scannable on mid-range phone cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSpec {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub ecc: EccLevel,
}

impl Default for RenderSpec {
    fn default() -> RenderSpec {
        RenderSpec {
            width: 400,
            height: 400,
            margin: 4,
            ecc: EccLevel::Medium,
        }
    }
}

/// Turns envelope text into image bytes. Synchronous: rendering is pure
/// computation on the caller's thread.
pub trait QrRenderer {
    fn render(&self, text: &str, spec: RenderSpec) -> Result<Vec<u8>, ExternalDeviceError>;
}

#[async_trait]
pub trait UrlLauncher: Send + Sync {
    async fn open(&self, url: &Url) -> Result<(), ExternalDeviceError>;
}
