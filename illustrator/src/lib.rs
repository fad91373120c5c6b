//! Automation bridge for Adobe Illustrator.
//!
//! Exposes the two operations the MCP agent needs: capturing a still image of
//! the Illustrator window and handing ExtendScript source to the application
//! for execution. Platform specifics live behind [`AutomationBridge`]; hosts
//! without a COM automation subsystem get a bridge whose operations uniformly
//! report that automation is unavailable.

pub mod errors;
pub mod platforms;
pub mod script;

pub use errors::AutomationError;
pub use platforms::UnavailableBridge;
pub use script::ScriptFile;

#[cfg(target_os = "windows")]
pub use platforms::windows::ComBridge;

use std::sync::Arc;

use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Holds the screenshot data
#[derive(Debug, Clone)]
pub struct ScreenshotResult {
    /// Raw image data (RGBA)
    pub image_data: Vec<u8>,
    /// Width of the image
    pub width: u32,
    /// Height of the image
    pub height: u32,
}

impl ScreenshotResult {
    /// Encodes the raw RGBA data as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, AutomationError> {
        let mut png_data = Vec::new();
        let encoder = PngEncoder::new(std::io::Cursor::new(&mut png_data));
        encoder
            .write_image(
                &self.image_data,
                self.width,
                self.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| {
                AutomationError::PlatformError(format!("Failed to encode screenshot to PNG: {e}"))
            })?;
        Ok(png_data)
    }
}

/// The two operations the MCP agent depends on. Each is independently
/// failable; failures carry a human-readable description.
#[async_trait]
pub trait AutomationBridge: Send + Sync {
    /// Brings the Illustrator window to the foreground (best-effort) and
    /// captures a still image of the display.
    async fn capture_window(&self) -> Result<ScreenshotResult, AutomationError>;

    /// Hands the given ExtendScript source to Illustrator for execution via a
    /// temporary artifact. The artifact is removed whether or not execution
    /// succeeded.
    async fn execute_script(&self, source: &str) -> Result<(), AutomationError>;
}

/// Probes the host once at startup and returns the bridge to use for the
/// lifetime of the process. Hosts without COM automation get an
/// [`UnavailableBridge`] so every automation tool degrades the same way
/// instead of failing differently per call.
pub fn detect_bridge(app_name: &str) -> Arc<dyn AutomationBridge> {
    #[cfg(target_os = "windows")]
    {
        tracing::info!("COM automation available, targeting '{app_name}'");
        Arc::new(ComBridge::new(app_name))
    }
    #[cfg(not(target_os = "windows"))]
    {
        tracing::warn!(
            "COM automation is not available on this host; \
             'view' and 'run' will report automation as unavailable (target was '{app_name}')"
        );
        Arc::new(UnavailableBridge)
    }
}
