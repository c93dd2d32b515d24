use csr_protocol::RegistryRecord;

/// Escape text for insertion into markup. Covers `& < > " '` (and `/`).
pub fn escape(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}

pub const RECORD_COLUMNS: [&str; 8] = [
    "index",
    "timestamp_utc",
    "name",
    "version",
    "sha256",
    "file_size_bytes",
    "original_filename",
    "signing_key_id",
];

/// One table row whose cells are already escaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    pub fn from_record(record: &RegistryRecord) -> Self {
        let cells = vec![
            record.index.to_string(),
            escape(&record.timestamp_utc),
            escape(&record.name),
            escape(&record.version),
            escape(&record.sha256),
            record.file_size_bytes.to_string(),
            escape(&record.original_filename),
            escape(record.signing_key_id.as_deref().unwrap_or("")),
        ];
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::from("<tr>");
        for cell in &self.cells {
            out.push_str("<td>");
            out.push_str(cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
        out
    }
}
