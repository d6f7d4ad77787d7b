//! Turning a finished framebuffer into an image file.

use crate::render::{check_dimensions, Framebuffer};
use crate::{Error, Result};
use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Maps a color channel to 0..=255, saturating outside of [0, 1].
pub fn clamp_channel(s: f64) -> u8 {
    (255. * s).clamp(0., 255.) as u8
}

/// Writes `framebuffer` as an ASCII pixmap (P3), one pixel per line.
pub fn write_ppm<W: Write>(mut out: W, framebuffer: &Framebuffer) -> Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", framebuffer.width, framebuffer.height)?;
    writeln!(out, "255")?;
    for p in &framebuffer.pixels {
        writeln!(
            out,
            "{} {} {}",
            clamp_channel(p.x),
            clamp_channel(p.y),
            clamp_channel(p.z)
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn to_rgb_image(framebuffer: &Framebuffer) -> Result<RgbImage> {
    let (width, height) = (framebuffer.width, framebuffer.height);
    let len = check_dimensions(width, height)?;
    if framebuffer.pixels.len() != len {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let p = framebuffer.get(x as usize, y as usize);
        Rgb([clamp_channel(p.x), clamp_channel(p.y), clamp_channel(p.z)])
    }))
}

/// Saves as ASCII PPM when the extension is `ppm`, otherwise lets `image`
/// pick the encoder from the extension.
pub fn save(path: impl AsRef<Path>, framebuffer: &Framebuffer) -> Result<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        write_ppm(BufWriter::new(File::create(path)?), framebuffer)?;
    } else {
        to_rgb_image(framebuffer)?.save(path)?;
    }
    info!(path = %path.display(), "image saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::v;

    fn two_pixels() -> Framebuffer {
        Framebuffer {
            width: 2,
            height: 1,
            pixels: vec![v(1., 0., 0.5), v(2., -1., 0.)],
        }
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_channel(2.), 255);
        assert_eq!(clamp_channel(-1.), 0);
        assert_eq!(clamp_channel(1.), 255);
        assert_eq!(clamp_channel(0.5), 127);
        assert_eq!(clamp_channel(0.), 0);
    }

    #[test]
    fn ascii_ppm_layout() {
        let mut out = Vec::new();
        write_ppm(&mut out, &two_pixels()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n255 0 127\n255 0 0\n"
        );
    }

    #[test]
    fn oversized_framebuffer_is_not_truncated() {
        let fb = Framebuffer {
            width: u32::MAX as usize + 1,
            height: 1,
            pixels: Vec::new(),
        };
        assert!(matches!(
            to_rgb_image(&fb),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rgb_image_matches_framebuffer() {
        let img = to_rgb_image(&two_pixels()).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 127]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }
}
