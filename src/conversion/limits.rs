use crate::conversion::config::ConverterConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::parser::InputSource;

/// Check the source size before attempting to read it.
/// This avoids loading very large files into memory if the configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &InputSource,
    config: &ConverterConfig,
) -> ConvertResult<()> {
    match source.estimated_size() {
        Some(size) => check_input_len(size as usize, config),
        None => Ok(()),
    }
}

/// Reject payloads above the configured input limit
pub fn check_input_len(len: usize, config: &ConverterConfig) -> ConvertResult<()> {
    if len > config.max_input_bytes {
        return Err(ConvertError::InputTooLarge {
            size: len,
            limit: config.max_input_bytes,
        });
    }
    Ok(())
}
