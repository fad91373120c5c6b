use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{AutomationBridge, AutomationError, ScreenshotResult, ScriptFile};

/// Drives Adobe Illustrator through its COM automation interface, invoked via
/// PowerShell so no COM bindings are linked into the process.
pub struct ComBridge {
    app_name: String,
}

impl ComBridge {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    async fn run_powershell(script: &str) -> Result<Output, AutomationError> {
        let output = Command::new("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", script])
            .output()
            .await?;
        Ok(output)
    }

    async fn activate_window(&self) -> Result<(), AutomationError> {
        let script = format!(
            "(New-Object -ComObject WScript.Shell).AppActivate('{}')",
            escape_single_quotes(&self.app_name)
        );
        let output = Self::run_powershell(&script).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AutomationError::PlatformError(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// PowerShell single-quoted strings escape quotes by doubling them.
fn escape_single_quotes(s: &str) -> String {
    s.replace('\'', "''")
}

#[async_trait]
impl AutomationBridge for ComBridge {
    async fn capture_window(&self) -> Result<ScreenshotResult, AutomationError> {
        // Best-effort: a capture of whatever is frontmost is still useful.
        if let Err(e) = self.activate_window().await {
            warn!("Could not bring '{}' to the foreground: {}", self.app_name, e);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;

        let monitors = xcap::Monitor::all()
            .map_err(|e| AutomationError::PlatformError(format!("Failed to get monitors: {e}")))?;
        let mut primary_monitor: Option<xcap::Monitor> = None;
        for monitor in monitors {
            match monitor.is_primary() {
                Ok(true) => {
                    primary_monitor = Some(monitor);
                    break;
                }
                Ok(false) => continue,
                Err(e) => {
                    return Err(AutomationError::PlatformError(format!(
                        "Error checking monitor primary status: {e}"
                    )));
                }
            }
        }
        let primary_monitor = primary_monitor.ok_or_else(|| {
            AutomationError::PlatformError("Could not find primary monitor".to_string())
        })?;

        let image = primary_monitor
            .capture_image()
            .map_err(|e| AutomationError::PlatformError(format!("Failed to capture screen: {e}")))?;

        Ok(ScreenshotResult {
            image_data: image.to_vec(),
            width: image.width(),
            height: image.height(),
        })
    }

    async fn execute_script(&self, source: &str) -> Result<(), AutomationError> {
        let jsx = ScriptFile::new(source)?;
        debug!("ExtendScript saved to {}", jsx.path().display());

        let script = format!(
            "$app = New-Object -ComObject Illustrator.Application; $app.DoJavaScriptFile('{}')",
            escape_single_quotes(&jsx.path().display().to_string())
        );
        let output = Self::run_powershell(&script).await;

        // `jsx` drops here regardless of the outcome, removing the artifact.
        let output = output?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AutomationError::ScriptFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}
