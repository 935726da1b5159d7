//! Elfouhaily unified directional wave spectrum.
//!
//! "A unified directional spectrum for long and short wind-driven waves",
//! T. Elfouhaily, B. Chapron, K. Katsaros, D. Vandemark,
//! Journal of Geophysical Research vol 102, p781-796, 1997.
//! Equation numbers below refer to that paper.

use std::f64::consts::PI;

use crate::params::SpectrumConfig;

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Phase speed minimum of gravity-capillary waves (m/s), Eq 59
pub const WAVE_CM: f64 = 0.23;

/// Wavenumber of the phase speed minimum (rad/m), Eq 59
pub const WAVE_KM: f64 = 370.0;

#[inline]
fn sqr(x: f64) -> f64 {
    x * x
}

/// Angular frequency of a wave with wavenumber `k`, Eq 24.
///
/// Deep-water gravity dispersion with the capillary correction.
#[inline]
pub fn dispersion(k: f64) -> f64 {
    (GRAVITY * k * (1.0 + sqr(k / WAVE_KM))).sqrt()
}

/// Spectral density evaluator for one sea state
#[derive(Debug, Clone, Copy)]
pub struct SpectrumModel {
    wind_speed: f64,
    wave_amplitude: f64,
    omega: f64,
}

impl SpectrumModel {
    pub fn new(config: &SpectrumConfig) -> Self {
        Self {
            wind_speed: config.wind_speed_m_per_s as f64,
            wave_amplitude: config.wave_amplitude as f64,
            omega: config.inverse_wave_age as f64,
        }
    }

    /// Spectral density at wave vector `(kx, ky)`.
    ///
    /// With `omnidirectional` set this is the direction-integrated curvature
    /// spectrum over `k³`, used only for the slope variance integral. The
    /// directional form is zero over the upwind half plane (`kx < 0`): those
    /// waves come back through Hermitian symmetry in the inverse transform.
    pub fn density(&self, kx: f64, ky: f64, omnidirectional: bool) -> f64 {
        let u10 = self.wind_speed;
        let omega = self.omega;

        // phase speed
        let k = (kx * kx + ky * ky).sqrt();
        if !(k > 0.0) {
            return 0.0;
        }
        let c = dispersion(k) / k;

        // spectral peak, after Eq 3
        let kp = GRAVITY * sqr(omega / u10);
        let cp = dispersion(kp) / kp;

        // friction velocity
        let z0 = 3.7e-5 * sqr(u10) / GRAVITY * (u10 / cp).powf(0.9); // Eq 66
        let u_star = 0.41 * u10 / (10.0 / z0).ln(); // Eq 60

        // long waves
        let lpm = (-5.0 / 4.0 * sqr(kp / k)).exp();
        let gamma = if omega < 1.0 {
            1.7
        } else {
            1.7 + 6.0 * omega.ln()
        };
        let sigma = 0.08 * (1.0 + 4.0 / omega.powf(3.0));
        let peak_shape = (-1.0 / (2.0 * sqr(sigma)) * sqr((k / kp).sqrt() - 1.0)).exp();
        let jp = gamma.powf(peak_shape); // Eq 3
        let fp = lpm * jp * (-omega / 10.0_f64.sqrt() * ((k / kp).sqrt() - 1.0)).exp(); // Eq 32
        let alpha_p = 0.006 * omega.sqrt(); // Eq 34
        let mut bl = 0.5 * alpha_p * cp / c * fp; // Eq 31

        // short waves
        let alpha_m = 0.01
            * if u_star < WAVE_CM {
                1.0 + (u_star / WAVE_CM).ln()
            } else {
                1.0 + 3.0 * (u_star / WAVE_CM).ln()
            }; // Eq 44
        let fm = (-0.25 * sqr(k / WAVE_KM - 1.0)).exp(); // Eq 41
        let mut bh = 0.5 * alpha_m * WAVE_CM / c * fm * lpm; // Eq 40

        if omnidirectional {
            return self.wave_amplitude * (bl + bh) / (k * sqr(k)); // Eq 30
        }

        if kx < 0.0 {
            return 0.0;
        }

        // spreading, Eq 57
        let a0 = 2.0_f64.ln() / 4.0;
        let ap = 4.0;
        let am = 0.13 * u_star / WAVE_CM; // Eq 59
        let delta = (a0 + ap * (c / cp).powf(2.5) + am * (WAVE_CM / c).powf(2.5)).tanh();

        let phi = ky.atan2(kx);

        bl *= 2.0;
        bh *= 2.0;

        // fade out waves travelling across the wind
        let tweak = (kx / k).max(0.0).sqrt();

        self.wave_amplitude * (bl + bh) * (1.0 + delta * (2.0 * phi).cos())
            / (2.0 * PI * sqr(sqr(k)))
            * tweak
    }
}
