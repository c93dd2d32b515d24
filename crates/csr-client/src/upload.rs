use csr_protocol::{FileBlob, UploadForm};

/// Raw form state for the register and verify forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadInput {
    pub name: String,
    pub version: String,
    pub file: Option<FileBlob>,
}

impl UploadInput {
    pub fn new(name: impl Into<String>, version: impl Into<String>, file: Option<FileBlob>) -> Self {
        Self { name: name.into(), version: version.into(), file }
    }

    /// Build the outbound form. `None` when no non-empty file is attached.
    ///
    /// Name and version are trimmed but otherwise passed through; empty
    /// values are left for the server to reject.
    pub fn into_form(self) -> Option<UploadForm> {
        let file = self.file.filter(|f| !f.is_empty())?;
        Some(UploadForm {
            name: self.name.trim().to_string(),
            version: self.version.trim().to_string(),
            file,
        })
    }
}
