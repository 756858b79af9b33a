use std::io::Cursor;
use std::path::Path;

use crate::foundation::error::{CardError, CardResult};
use crate::model::FrameRgba;

/// Encode a frame as an in-memory PNG.
pub fn encode_png(frame: &FrameRgba) -> CardResult<Vec<u8>> {
    check_len(frame)?;
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CardError::render(format!("png encode: {e}")))?;
    Ok(out.into_inner())
}

/// Write a frame as a PNG file, creating parent directories as needed.
pub fn write_png(path: &Path, frame: &FrameRgba) -> CardResult<()> {
    check_len(frame)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| CardError::render(format!("create output dir '{}': {e}", parent.display())))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CardError::render(format!("write png '{}': {e}", path.display())))
}

fn check_len(frame: &FrameRgba) -> CardResult<()> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(CardError::render("frame buffer size mismatch"));
    }
    Ok(())
}
