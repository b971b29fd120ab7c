use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
    #[error("snapshot is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("snapshot has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Reject snapshots whose buffer does not hold `width * height` RGBA pixels.
pub(crate) fn check_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ExportError::Empty { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(ExportError::SizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}
