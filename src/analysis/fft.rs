use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Complex32 {
    pub(crate) re: f32,
    pub(crate) im: f32,
}

impl Complex32 {
    pub(crate) fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }

    pub(crate) fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    pub(crate) fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    pub(crate) fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    pub(crate) fn magnitude(self) -> f32 {
        (self.re * self.re + self.im * self.im).max(0.0).sqrt()
    }
}

pub(crate) fn fft_radix2_inplace(buffer: &mut [Complex32]) -> Result<(), String> {
    let n = buffer.len();
    if n == 0 || !n.is_power_of_two() {
        return Err(format!("FFT length must be power-of-two, got {n}"));
    }
    bit_reverse_permute(buffer);
    let mut len = 2usize;
    while len <= n {
        let angle = -2.0_f32 * PI / len as f32;
        let wlen = Complex32::new(angle.cos(), angle.sin());
        for start in (0..n).step_by(len) {
            let mut w = Complex32::new(1.0, 0.0);
            for i in 0..(len / 2) {
                let u = buffer[start + i];
                let v = buffer[start + i + len / 2].mul(w);
                buffer[start + i] = u.add(v);
                buffer[start + i + len / 2] = u.sub(v);
                w = w.mul(wlen);
            }
        }
        len *= 2;
    }
    Ok(())
}

fn bit_reverse_permute(buffer: &mut [Complex32]) {
    let n = buffer.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            buffer.swap(i, j);
        }
    }
}

/// Magnitudes of the first half of the spectrum of a real-valued signal.
///
/// The transform runs over the largest power-of-two prefix of `samples`, capped
/// at `max_window` to bound per-call cost.
pub(crate) fn half_spectrum_magnitudes(samples: &[f32], max_window: usize) -> Vec<f32> {
    let window = largest_power_of_two_prefix(samples.len(), max_window);
    if window < 2 {
        return Vec::new();
    }
    let mut buffer: Vec<Complex32> = samples[..window]
        .iter()
        .map(|&s| Complex32::new(sanitize(s), 0.0))
        .collect();
    if fft_radix2_inplace(&mut buffer).is_err() {
        return Vec::new();
    }
    buffer[..window / 2]
        .iter()
        .map(|c| c.magnitude())
        .collect()
}

pub(crate) fn largest_power_of_two_prefix(len: usize, max_window: usize) -> usize {
    let capped = len.min(max_window.max(1));
    if capped == 0 {
        return 0;
    }
    let mut window = 1usize;
    while window * 2 <= capped {
        window *= 2;
    }
    window
}

fn sanitize(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
