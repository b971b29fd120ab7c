use png::{BitDepth, ColorType, Encoder};

use crate::error::{Result, check_rgba};

/// Encode an RGBA snapshot as PNG. Identical input gives identical bytes.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    check_rgba(width, height, rgba)?;
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    log::debug!("encoded {width}x{height} PNG, {} bytes", buf.len());
    Ok(buf)
}

/// Composite RGBA over white and drop the alpha channel.
pub fn flatten_on_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = px[3] as u32;
        for c in &px[..3] {
            let v = (*c as u32 * a + 255 * (255 - a) + 127) / 255;
            rgb.push(v as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_becomes_white() {
        assert_eq!(flatten_on_white(&[10, 20, 30, 0]), [255, 255, 255]);
        assert_eq!(flatten_on_white(&[10, 20, 30, 255]), [10, 20, 30]);
        assert_eq!(flatten_on_white(&[0, 0, 0, 128]), [127, 127, 127]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let rgba: Vec<u8> = (0..4 * 6 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let a = encode_png(6, 3, &rgba).unwrap();
        let b = encode_png(6, 3, &rgba).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], b"\x89PNG\r\n\x1a\n");
    }
}
