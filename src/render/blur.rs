use crate::foundation::error::{CardError, CardResult};

/// Separable Gaussian blur over premultiplied RGBA8 buffers.
///
/// Weights are Q16 fixed point and always sum to exactly `1 << 16`, so a
/// constant-color buffer passes through unchanged. Edges clamp.
pub(crate) struct GaussianBlur {
    kernel: Vec<u32>,
    scratch: Vec<u8>,
}

impl GaussianBlur {
    pub(crate) fn new(radius: u32, sigma: f32) -> CardResult<Self> {
        Ok(Self {
            kernel: kernel_q16(radius, sigma)?,
            scratch: Vec::new(),
        })
    }

    /// Blur `bytes` in place. The buffer must be `width * height * 4` long.
    pub(crate) fn apply(&mut self, bytes: &mut [u8], width: u32, height: u32) -> CardResult<()> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(CardError::render("blur buffer size mismatch"));
        }
        if self.kernel.len() == 1 {
            return Ok(());
        }

        self.scratch.resize(expected, 0);
        horizontal_pass(bytes, &mut self.scratch, width, height, &self.kernel);
        vertical_pass(&self.scratch, bytes, width, height, &self.kernel);
        Ok(())
    }
}

fn kernel_q16(radius: u32, sigma: f32) -> CardResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CardError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(CardError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }

    // Fold rounding error into the center tap so the kernel sums exactly.
    let delta = 65536i64 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_sums_to_one() {
        let k = kernel_q16(25, 12.5).unwrap();
        assert_eq!(k.len(), 51);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    }

    #[test]
    fn zero_radius_is_identity() {
        let mut blur = GaussianBlur::new(0, 1.0).unwrap();
        let mut buf = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let orig = buf.clone();
        blur.apply(&mut buf, 2, 1).unwrap();
        assert_eq!(buf, orig);
    }

    #[test]
    fn constant_buffer_is_unchanged() {
        let mut blur = GaussianBlur::new(4, 2.0).unwrap();
        let mut buf = vec![0u8; 8 * 8 * 4];
        for px in buf.chunks_exact_mut(4) {
            px.copy_from_slice(&[10, 20, 30, 255]);
        }
        let orig = buf.clone();
        blur.apply(&mut buf, 8, 8).unwrap();
        assert_eq!(buf, orig);
    }

    #[test]
    fn impulse_spreads_symmetrically() {
        let mut blur = GaussianBlur::new(2, 1.0).unwrap();
        let alpha = |buf: &[u8], x: usize| buf[x * 4 + 3];
        let mut buf = vec![0u8; 7 * 4];
        buf[3 * 4 + 3] = 255; // alpha impulse in the center column
        blur.apply(&mut buf, 7, 1).unwrap();
        assert_eq!(alpha(&buf, 2), alpha(&buf, 4));
        assert_eq!(alpha(&buf, 1), alpha(&buf, 5));
        assert!(alpha(&buf, 3) > alpha(&buf, 2));
    }

    #[test]
    fn rejects_bad_sigma_and_size() {
        assert!(GaussianBlur::new(3, 0.0).is_err());
        assert!(GaussianBlur::new(3, f32::NAN).is_err());
        let mut blur = GaussianBlur::new(3, 1.0).unwrap();
        let mut buf = vec![0u8; 7];
        assert!(blur.apply(&mut buf, 2, 1).is_err());
    }
}
