/// Color representation for gauge elements (RGBA, non-premultiplied)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0x00, 0x00, 0x00, 0x00);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

/// The three themed colors the gauge resolves from its host, plus the
/// label text size they are painted with
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text_color: Color,
    pub start_color: Color,
    pub end_color: Color,
    pub text_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_color: Color::rgb(0x21, 0x21, 0x21),
            start_color: Color::rgb(0x03, 0xa9, 0xf4),
            end_color: Color::rgb(0x65, 0x1f, 0xff),
            text_size: 200.0,
        }
    }
}

/// Upper bound enforced by `set_progress` relative to `max`.
///
/// The two historical gauge styles disagree on this: the standard style
/// accepts `progress == max`, the circular style rejects anything above
/// `max - 1`. The policy travels with the style so neither behavior is
/// silently lost, and callers can override it on either preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundPolicy {
    /// Reject `progress > max`.
    Max,
    /// Reject `progress > max - 1`.
    MaxMinusOne,
}

impl BoundPolicy {
    pub fn bound(self, max: f32) -> f32 {
        match self {
            BoundPolicy::Max => max,
            BoundPolicy::MaxMinusOne => max - 1.0,
        }
    }
}

/// Angle (degrees) where both arcs begin, the top of the circle.
pub const ARC_START_ANGLE: f32 = 270.0;

/// Radius in pixels of the radial component of the glow shader.
pub const GLOW_GRADIENT_RADIUS: f32 = 25.0;

const STANDARD_STROKE_WIDTH: f32 = 50.0;
const CIRCULAR_NORMAL_STROKE_WIDTH: f32 = 18.0;
const CIRCULAR_SHINING_STROKE_WIDTH: f32 = CIRCULAR_NORMAL_STROKE_WIDTH * 3.0;

/// Rotation applied to the gradient shaders so their zero point lines up
/// with the arc start. Hand-tuned per style; not derived.
const STANDARD_SHADER_ROTATION: f32 = 262.0;
const CIRCULAR_SHADER_ROTATION: f32 = 270.0;

/// Visual parameters of one gauge style
#[derive(Debug, Clone, Copy)]
pub struct ArcStyle {
    /// Stroke width of the wide glow arc.
    pub glow_stroke_width: f32,
    /// Stroke width of the narrow ring arc drawn on top.
    pub ring_stroke_width: f32,
    /// Rotation (degrees) of the gradient shaders around the center.
    pub shader_rotation_deg: f32,
    /// Offset the arc ends by the rounded-cap angle so the two stroke
    /// widths line up at their caps.
    pub cap_correction: bool,
    /// Fixed number of degrees shaved off the glow sweep instead of a
    /// computed cap correction.
    pub glow_trim_deg: f32,
    pub bound_policy: BoundPolicy,
}

impl ArcStyle {
    /// Single wide glow with a thin ring at a third of its width.
    pub fn standard() -> Self {
        Self {
            glow_stroke_width: STANDARD_STROKE_WIDTH,
            ring_stroke_width: STANDARD_STROKE_WIDTH / 3.0,
            shader_rotation_deg: STANDARD_SHADER_ROTATION,
            cap_correction: false,
            glow_trim_deg: 2.0,
            bound_policy: BoundPolicy::Max,
        }
    }

    /// Thin ring with a shining glow at three times its width.
    pub fn circular() -> Self {
        Self {
            glow_stroke_width: CIRCULAR_SHINING_STROKE_WIDTH,
            ring_stroke_width: CIRCULAR_NORMAL_STROKE_WIDTH,
            shader_rotation_deg: CIRCULAR_SHADER_ROTATION,
            cap_correction: true,
            glow_trim_deg: 0.0,
            bound_policy: BoundPolicy::MaxMinusOne,
        }
    }
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self::circular()
    }
}

/// Configuration for the application window
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub max_framerate: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            max_framerate: 60.0,
        }
    }
}
