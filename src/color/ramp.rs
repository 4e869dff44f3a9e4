//! Continuous color ramps and the color-space conversions the category scale relies on.
//!
//! Ramps are d3-scale-chromatic gradients from `colorous`. Samples are quantized to 8-bit
//! channels, the same precision the jitter step reads back.

use crate::foundation::core::Rgb;

/// 8-bit straight RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Round and clamp unbounded 0..255 channel values.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        fn q(v: f64) -> u8 {
            if v.is_nan() {
                return 0;
            }
            v.clamp(0.0, 255.0).round() as u8
        }
        Self {
            r: q(r),
            g: q(g),
            b: q(b),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        Rgb::from_rgb8(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let min = r.min(g).min(b);
        let max = r.max(g).max(b);
        let l = (max + min) / 2.0;
        let chroma = max - min;
        if chroma == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let mut h = if r == max {
            (g - b) / chroma + if g < b { 6.0 } else { 0.0 }
        } else if g == max {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        };
        h *= 60.0;
        let s = chroma
            / if l < 0.5 {
                max + min
            } else {
                2.0 - max - min
            };
        Hsl { h, s, l }
    }
}

/// Hue in degrees, saturation and lightness nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Lightness above 1 is allowed here; channels clamp on quantization.
    pub fn to_rgb8(self) -> Rgb8 {
        let h = self.h.rem_euclid(360.0);
        let s = if self.s.is_nan() { 0.0 } else { self.s };
        let l = self.l;
        let m2 = l + (if l < 0.5 { l } else { 1.0 - l }) * s;
        let m1 = 2.0 * l - m2;

        fn channel(h: f64, m1: f64, m2: f64) -> f64 {
            let v = if h < 60.0 {
                m1 + (m2 - m1) * h / 60.0
            } else if h < 180.0 {
                m2
            } else if h < 240.0 {
                m1 + (m2 - m1) * (240.0 - h) / 60.0
            } else {
                m1
            };
            v * 255.0
        }

        Rgb8::from_channels(
            channel(if h >= 240.0 { h - 240.0 } else { h + 120.0 }, m1, m2),
            channel(h, m1, m2),
            channel(if h < 120.0 { h + 240.0 } else { h - 120.0 }, m1, m2),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRamp {
    #[default]
    Viridis,
    Magma,
    Inferno,
    Cool,
}

impl ColorRamp {
    /// Cycle order used when nothing is configured.
    pub const ALL: [ColorRamp; 4] = [
        ColorRamp::Viridis,
        ColorRamp::Magma,
        ColorRamp::Inferno,
        ColorRamp::Cool,
    ];

    /// Where sampling starts along the gradient. The perceptual maps begin near black, which
    /// would vanish against the background.
    pub fn floor(self) -> f64 {
        match self {
            Self::Viridis | Self::Magma | Self::Inferno => 0.4,
            Self::Cool => 0.0,
        }
    }

    fn gradient(self) -> colorous::Gradient {
        match self {
            Self::Viridis => colorous::VIRIDIS,
            Self::Magma => colorous::MAGMA,
            Self::Inferno => colorous::INFERNO,
            Self::Cool => colorous::COOL,
        }
    }

    /// The full gradient at `t`, clamped to `[0, 1]`.
    pub fn gradient_at(self, t: f64) -> Rgb8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let c = self.gradient().eval_continuous(t);
        Rgb8 {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }

    /// `t` in `[0, 1]` mapped onto `[floor, 1]` of the gradient.
    pub fn sample(self, t: f64) -> Rgb8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let floor = self.floor();
        self.gradient_at(floor + (1.0 - floor) * t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/ramp.rs"]
mod tests;
