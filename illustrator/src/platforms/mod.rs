use async_trait::async_trait;

use crate::{AutomationBridge, AutomationError, ScreenshotResult};

#[cfg(target_os = "windows")]
pub mod windows;

/// Bridge used on hosts without a COM automation subsystem. Both operations
/// fail with the same `UnsupportedPlatform` error, so the agent reports a
/// uniform "automation unavailable" message instead of attempting and failing
/// differently per call.
pub struct UnavailableBridge;

impl UnavailableBridge {
    fn unavailable() -> AutomationError {
        AutomationError::UnsupportedPlatform(
            "COM automation for Adobe Illustrator is only available on Windows".to_string(),
        )
    }
}

#[async_trait]
impl AutomationBridge for UnavailableBridge {
    async fn capture_window(&self) -> Result<ScreenshotResult, AutomationError> {
        Err(Self::unavailable())
    }

    async fn execute_script(&self, _source: &str) -> Result<(), AutomationError> {
        Err(Self::unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_bridge_fails_both_operations_uniformly() {
        let bridge = UnavailableBridge;

        let capture = bridge.capture_window().await.unwrap_err();
        let execute = bridge.execute_script("app.documents.add();").await.unwrap_err();

        assert!(matches!(capture, AutomationError::UnsupportedPlatform(_)));
        assert!(matches!(execute, AutomationError::UnsupportedPlatform(_)));
        assert_eq!(capture.to_string(), execute.to_string());
    }
}
