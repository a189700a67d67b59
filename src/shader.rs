//! Software gradient shaders for the gauge arcs.
//!
//! The glow arc is painted with a sweep gradient multiplied by a radial
//! gradient; the ring arc with a plain sweep gradient. Shaders are cheap
//! value types rebuilt whenever progress, max or size changes, and
//! evaluated per pixel by the rasterizer.

use crate::config::Color;

/// Normalize an angle in degrees to [0, 360).
pub(crate) fn normalize_deg(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Linear interpolation between two colors, `t` in [0, 1].
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        lerp_channel(a.r, b.r, t),
        lerp_channel(a.g, b.g, t),
        lerp_channel(a.b, b.b, t),
        lerp_channel(a.a, b.a, t),
    )
}

/// Per-channel product of two colors, alpha included.
pub fn multiply(a: Color, b: Color) -> Color {
    let mul = |x: u8, y: u8| ((x as u16 * y as u16) / 255) as u8;
    Color::new(
        mul(a.r, b.r),
        mul(a.g, b.g),
        mul(a.b, b.b),
        mul(a.a, b.a),
    )
}

/// Two-stop angular gradient swept around a center point.
///
/// Stop positions are fractions of the full circle. A pixel's fraction is
/// its screen angle minus the rotation offset; past the last stop the
/// gradient clamps to the last color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepGradient {
    pub cx: f32,
    pub cy: f32,
    pub colors: [Color; 2],
    pub positions: [f32; 2],
    pub rotation_deg: f32,
}

impl SweepGradient {
    pub fn new(cx: f32, cy: f32, colors: [Color; 2], positions: [f32; 2]) -> Self {
        Self {
            cx,
            cy,
            colors,
            positions,
            rotation_deg: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation_deg: f32) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn eval(&self, x: f32, y: f32) -> Color {
        let angle = normalize_deg((y - self.cy).atan2(x - self.cx).to_degrees());
        let frac = normalize_deg(angle - self.rotation_deg) / 360.0;
        let [p0, p1] = self.positions;
        if frac <= p0 || p1 <= p0 {
            if frac >= p1 {
                self.colors[1]
            } else {
                self.colors[0]
            }
        } else if frac >= p1 {
            self.colors[1]
        } else {
            lerp_color(self.colors[0], self.colors[1], (frac - p0) / (p1 - p0))
        }
    }
}

/// Two-color radial gradient with mirror tiling beyond its radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub colors: [Color; 2],
}

impl RadialGradient {
    pub fn new(cx: f32, cy: f32, radius: f32, colors: [Color; 2]) -> Self {
        Self {
            cx,
            cy,
            radius,
            colors,
        }
    }

    pub fn eval(&self, x: f32, y: f32) -> Color {
        let dist = ((x - self.cx).powi(2) + (y - self.cy).powi(2)).sqrt();
        let period = (dist / self.radius).rem_euclid(2.0);
        let t = if period > 1.0 { 2.0 - period } else { period };
        lerp_color(self.colors[0], self.colors[1], t)
    }
}

/// Sweep and radial gradient composed with a multiply blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowShader {
    pub sweep: SweepGradient,
    pub radial: RadialGradient,
}

impl GlowShader {
    pub fn eval(&self, x: f32, y: f32) -> Color {
        multiply(self.sweep.eval(x, y), self.radial.eval(x, y))
    }
}
