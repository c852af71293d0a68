/// Options controlling how icon files are written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExportOptions {
    /// Whether to store each slot's text in its PNG payload.
    pub embed_text: bool,
}

impl Default for ExportOptions {
    fn default() -> ExportOptions {
        ExportOptions { embed_text: true }
    }
}

/// Limits applied when reading untrusted icon files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoadOptions {
    /// Files larger than this many bytes are refused before being read.
    pub max_file_size: u64,
    /// The maximum number of elements read from an ICNS file.
    pub max_icns_elements: usize,
}

impl Default for LoadOptions {
    fn default() -> LoadOptions {
        LoadOptions {
            max_file_size: 64 * 1024 * 1024,
            max_icns_elements: 256,
        }
    }
}
