use std::io::Write;
use std::path::Path;

use crate::AutomationError;

/// A temporary `.jsx` artifact holding the ExtendScript source for one
/// invocation. The file is removed when the guard drops, so cleanup happens
/// on the failure path as well as the success path.
pub struct ScriptFile {
    file: tempfile::NamedTempFile,
}

impl ScriptFile {
    pub fn new(source: &str) -> Result<Self, AutomationError> {
        let mut file = tempfile::Builder::new()
            .prefix("illustrator-mcp-")
            .suffix(".jsx")
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
