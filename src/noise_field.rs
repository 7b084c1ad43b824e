//! Noise sources for the water stage

use noise::{NoiseFn, OpenSimplex};

/// Deterministic 2D scalar field returning values in roughly [-1, 1].
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<T: NoiseFn<f64, 2>> NoiseSource for T {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.get([x, y])
    }
}

/// Default noise used by the CLI and tools.
pub fn default_noise(seed: u32) -> OpenSimplex {
    OpenSimplex::new(seed)
}

/// Fractal sum of octaves. Octave `i` is sampled at frequency `2^i` and
/// weighted by `amplitudes[i]`; the sum is normalised by the total weight.
pub fn fbm_noise<N: NoiseSource + ?Sized>(noise: &N, amplitudes: &[f64], nx: f64, ny: f64) -> f64 {
    let mut sum = 0.0;
    let mut sum_of_amplitudes = 0.0;
    for (octave, &amplitude) in amplitudes.iter().enumerate() {
        let frequency = (1u64 << octave) as f64;
        sum += amplitude * noise.sample(nx * frequency, ny * frequency);
        sum_of_amplitudes += amplitude;
    }
    sum / sum_of_amplitudes
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl NoiseFn<f64, 2> for Constant {
        fn get(&self, _point: [f64; 2]) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_fbm_of_constant_is_constant() {
        let n = fbm_noise(&Constant(0.25), &[0.5, 0.25, 0.125], 0.3, -0.7);
        assert!((n - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_fbm_stays_in_range() {
        let noise = default_noise(7);
        for i in 0..100 {
            let x = i as f64 * 0.037 - 1.0;
            let n = fbm_noise(&noise, &[0.5, 0.25, 0.125, 0.0625], x, -x * 0.5);
            assert!((-1.0..=1.0).contains(&n));
        }
    }

    #[test]
    fn test_noise_is_deterministic() {
        let a = default_noise(3);
        let b = default_noise(3);
        assert_eq!(a.sample(0.1, 0.2), b.sample(0.1, 0.2));
    }
}
