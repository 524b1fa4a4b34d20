use super::types::{FileType, ReadError};
use std::path::Path;

pub fn reader_from_filetype(path: &Path) -> Result<FileType, ReadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileType::OpenMeteoJson),
        _ => Err(ReadError::UnknownFileType(path.to_path_buf())),
    }
}
