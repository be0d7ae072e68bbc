use std::path::Path;

use garde::Validate;

/// MIME type of .xlsx workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type of legacy .xls workbooks.
pub const XLS_CONTENT_TYPE: &str = "application/vnd.ms-excel";

/// Upload size cap: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A spreadsheet picked for batch prediction.
///
/// Only the envelope is checked client-side; the row contents are entirely
/// the service's concern.
#[derive(Debug, Clone, Validate)]
pub struct SpreadsheetUpload {
    #[garde(skip)]
    pub file_name: String,

    #[garde(custom(spreadsheet_content_type))]
    pub content_type: String,

    #[garde(custom(within_upload_cap))]
    pub bytes: Vec<u8>,
}

fn spreadsheet_content_type(value: &str, _cx: &()) -> garde::Result {
    if value == XLSX_CONTENT_TYPE || value == XLS_CONTENT_TYPE {
        return Ok(());
    }
    Err(garde::Error::new("File must be an Excel file (.xlsx or .xls)"))
}

fn within_upload_cap(value: &[u8], _cx: &()) -> garde::Result {
    if value.len() > MAX_UPLOAD_BYTES {
        return Err(garde::Error::new("File size must be less than 5MB"));
    }
    Ok(())
}

/// Infer the spreadsheet MIME type from a file extension, the way a file
/// input fills in `type` for a picked file.
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase()
        .as_str()
    {
        "xlsx" => Some(XLSX_CONTENT_TYPE),
        "xls" => Some(XLS_CONTENT_TYPE),
        _ => None,
    }
}
