//! Periodic keyframe interpolation.
//!
//! [`ColorRamp`] interpolates between keys over a repeating domain, wrapping
//! from the last key back to the first. The ground colour used when the
//! simulation's `groundColor` is `auto` is a ramp over the normalised year
//! (`day / 365`), so late December blends smoothly into early January.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

// ---------------------------------------------------------------------------
// ColorRamp
// ---------------------------------------------------------------------------

/// Keyframe-based value ramp over a periodic domain `[0, period)`.
///
/// Keys are `(position, value)` pairs sorted by position.
#[derive(Clone, Debug)]
pub struct ColorRamp<T: Lerp> {
    keys: Vec<(f32, T)>,
    period: f32,
}

impl<T: Lerp> ColorRamp<T> {
    /// Create a new ramp from unsorted keys over `[0, period)`.
    pub fn new(mut keys: Vec<(f32, T)>, period: f32) -> Self {
        keys.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Self { keys, period }
    }

    /// Create a constant ramp that always returns the same value.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![(0.0, value)],
            period: 1.0,
        }
    }

    /// Length of the repeating domain.
    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Sample the ramp at `t`, wrapping into `[0, period)`.
    ///
    /// Returns `None` only for a ramp without keys.
    pub fn sample(&self, t: f32) -> Option<T> {
        let n = self.keys.len();
        match n {
            0 => return None,
            1 => return Some(self.keys[0].1.clone()),
            _ => {}
        }

        let period = self.period;
        let t = t.rem_euclid(period);

        // Bracketing keys; past either end the segment wraps last -> first
        let (t_a, v_a, t_b, v_b) = match self.keys.iter().position(|k| k.0 > t) {
            Some(idx) if idx > 0 => {
                let (t_a, ref v_a) = self.keys[idx - 1];
                let (t_b, ref v_b) = self.keys[idx];
                (t_a, v_a, t_b, v_b)
            }
            Some(_) => {
                let (t_a, ref v_a) = self.keys[n - 1];
                let (t_b, ref v_b) = self.keys[0];
                (t_a - period, v_a, t_b, v_b)
            }
            None => {
                let (t_a, ref v_a) = self.keys[n - 1];
                let (t_b, ref v_b) = self.keys[0];
                (t_a, v_a, t_b + period, v_b)
            }
        };

        let span = t_b - t_a;
        if span < 1e-6 {
            return Some(v_a.clone());
        }
        Some(v_a.lerp(v_b, (t - t_a) / span))
    }
}

// ---------------------------------------------------------------------------
// Serde support
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct RampRepr<T> {
    period: f32,
    keys: Vec<(f32, T)>,
}

impl<T: Lerp + Serialize> Serialize for ColorRamp<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RampRepr { period: self.period, keys: self.keys.clone() }.serialize(serializer)
    }
}

impl<'de, T: Lerp + Deserialize<'de>> Deserialize<'de> for ColorRamp<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RampRepr::<T>::deserialize(deserializer)?;
        Ok(Self::new(repr.keys, repr.period))
    }
}

// ---------------------------------------------------------------------------
// Ground colour table
// ---------------------------------------------------------------------------

/// Ground colour (linear RGB, 0-1) keyed by normalised day-of-year.
pub fn ground_color_ramp() -> ColorRamp<[f32; 3]> {
    ColorRamp::new(
        vec![
            (0.00, [0.92, 0.93, 0.95]), // early January - snow
            (0.15, [0.80, 0.80, 0.78]), // late February - thaw
            (0.26, [0.55, 0.63, 0.33]), // early April - first green
            (0.40, [0.30, 0.60, 0.20]), // late May
            (0.60, [0.36, 0.58, 0.18]), // early August
            (0.76, [0.72, 0.46, 0.18]), // early October - autumn
            (0.87, [0.55, 0.42, 0.30]), // mid November
            (0.95, [0.88, 0.88, 0.90]), // mid December - first snow
        ],
        1.0,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
