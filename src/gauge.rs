//! Core gauge state: progress, max, and everything derived from them.
//!
//! `ArcGauge` is independent of the window/framebuffer plumbing so the
//! angle math, label formatting and shader construction can be exercised
//! directly.

use log::debug;
use thiserror::Error;

use crate::config::{ArcStyle, Color, Theme, ARC_START_ANGLE, GLOW_GRADIENT_RADIUS};
use crate::shader::{GlowShader, RadialGradient, SweepGradient};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    #[error("progress {progress} is outside the allowed range 0..={bound} (max {max})")]
    ProgressOutOfRange { progress: f32, max: f32, bound: f32 },
}

/// Axis-aligned bounding rectangle of the arc stroke centerline oval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Sweep angle in degrees for a progress value on a 0..max scale.
pub fn sweep_angle_for(progress: f32, max: f32) -> f32 {
    progress * (360.0 / max)
}

/// Score label: progress rescaled to 0..10, one decimal place. The
/// formatting never depends on the process locale.
pub fn rating_label(progress: f32, max: f32) -> String {
    format!("{:.1}", progress * 10.0 / max)
}

/// Arc bounding rect for a square of side `size`, inset by half the
/// widest stroke on all sides so the stroke stays inside the square.
pub fn arc_bounds(size: u32, stroke_width: f32) -> Rect {
    let inset = stroke_width / 2.0;
    Rect {
        left: inset,
        top: inset,
        right: size as f32 - inset,
        bottom: size as f32 - inset,
    }
}

/// Angular half-extent (degrees) of a rounded stroke cap as seen from the
/// center: `atan(half_stroke / (radius - half_stroke))`. Used to shift arc
/// ends so caps of different stroke widths meet at the same point.
pub fn cap_correction_deg(rect_height: f32, stroke_width: f32) -> f32 {
    let half = stroke_width / 2.0;
    (half / (rect_height / 2.0 - half)).atan().to_degrees()
}

/// The rating gauge model: a score out of `max`, drawn as two stroked
/// arcs with gradient paint and a centered label.
#[derive(Debug, Clone)]
pub struct ArcGauge {
    style: ArcStyle,
    theme: Theme,
    max: f32,
    progress: f32,
    sweep_angle: f32,
    rating: String,
    size: u32,
    arc_rect: Rect,
    glow_cap_correction_deg: f32,
    ring_cap_correction_deg: f32,
    glow_shader: GlowShader,
    ring_shader: SweepGradient,
}

impl ArcGauge {
    pub fn new(style: ArcStyle, theme: Theme) -> Self {
        let mut gauge = Self {
            style,
            theme,
            max: 100.0,
            progress: 0.0,
            sweep_angle: 0.0,
            rating: String::from("0.0"),
            size: 0,
            arc_rect: arc_bounds(0, style.glow_stroke_width),
            glow_cap_correction_deg: 0.0,
            ring_cap_correction_deg: 0.0,
            glow_shader: GlowShader {
                sweep: SweepGradient::new(0.0, 0.0, [Color::TRANSPARENT; 2], [0.0; 2]),
                radial: RadialGradient::new(
                    0.0,
                    0.0,
                    GLOW_GRADIENT_RADIUS,
                    [Color::TRANSPARENT; 2],
                ),
            },
            ring_shader: SweepGradient::new(0.0, 0.0, [Color::TRANSPARENT; 2], [0.0; 2]),
        };
        gauge.rebuild_shaders();
        gauge
    }

    pub fn style(&self) -> &ArcStyle {
        &self.style
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn arc_rect(&self) -> Rect {
        self.arc_rect
    }

    /// Sets the scale upper bound and recomputes the derived state.
    ///
    /// The current progress is not re-validated against the new bound and
    /// `max` itself is not checked; a non-positive `max` yields the same
    /// non-finite sweep angle the float division produces.
    pub fn set_max(&mut self, max: f32) {
        self.max = max;
        self.recompute_derived();
    }

    /// Sets the current score. Validation happens before any field is
    /// touched, so a rejected value leaves the gauge exactly as it was.
    pub fn set_progress(&mut self, progress: f32) -> Result<(), RatingError> {
        let bound = self.style.bound_policy.bound(self.max);
        if progress > bound || progress < 0.0 {
            return Err(RatingError::ProgressOutOfRange {
                progress,
                max: self.max,
                bound,
            });
        }
        self.progress = progress;
        self.recompute_derived();
        debug!(
            "sweep_angle: {} ; progress: {} ; max: {}",
            self.sweep_angle, self.progress, self.max
        );
        Ok(())
    }

    /// Measure pass: the gauge is square, sized to the smaller of the
    /// offered dimensions. Returns the chosen side length.
    pub fn measure(&mut self, width: u32, height: u32) -> u32 {
        let size = width.min(height);
        self.size = size;
        self.arc_rect = arc_bounds(size, self.style.glow_stroke_width);
        if self.style.cap_correction {
            let rect_height = self.arc_rect.height();
            self.glow_cap_correction_deg =
                cap_correction_deg(rect_height, self.style.glow_stroke_width);
            self.ring_cap_correction_deg =
                cap_correction_deg(rect_height, self.style.ring_stroke_width);
        } else {
            self.glow_cap_correction_deg = 0.0;
            self.ring_cap_correction_deg = 0.0;
        }
        self.rebuild_shaders();
        size
    }

    /// Start angle and sweep of the wide glow arc, with cap corrections
    /// (or the style's fixed trim) applied.
    pub fn glow_arc_angles(&self) -> (f32, f32) {
        let start = ARC_START_ANGLE + self.glow_cap_correction_deg;
        let sweep = self.sweep_angle - 2.0 * self.glow_cap_correction_deg
            + self.ring_cap_correction_deg
            - self.style.glow_trim_deg;
        (start, sweep)
    }

    /// Start angle and sweep of the narrow ring arc.
    pub fn ring_arc_angles(&self) -> (f32, f32) {
        (ARC_START_ANGLE, self.sweep_angle)
    }

    pub fn glow_shader(&self) -> &GlowShader {
        &self.glow_shader
    }

    pub fn ring_shader(&self) -> &SweepGradient {
        &self.ring_shader
    }

    fn recompute_derived(&mut self) {
        self.sweep_angle = sweep_angle_for(self.progress, self.max);
        self.rating = rating_label(self.progress, self.max);
        self.rebuild_shaders();
    }

    fn rebuild_shaders(&mut self) {
        let center = self.size as f32 / 2.0;
        let positions = [0.0, self.sweep_angle / 360.0];
        let glow_colors = [Color::TRANSPARENT, self.theme.end_color];
        let ring_colors = [self.theme.start_color, self.theme.end_color];
        let rotation = self.style.shader_rotation_deg;

        self.glow_shader = GlowShader {
            sweep: SweepGradient::new(center, center, glow_colors, positions)
                .with_rotation(rotation),
            radial: RadialGradient::new(center, center, GLOW_GRADIENT_RADIUS, glow_colors),
        };
        self.ring_shader = SweepGradient::new(center, center, ring_colors, positions)
            .with_rotation(rotation - self.ring_cap_correction_deg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundPolicy;

    fn standard_gauge() -> ArcGauge {
        ArcGauge::new(ArcStyle::standard(), Theme::default())
    }

    fn circular_gauge() -> ArcGauge {
        ArcGauge::new(ArcStyle::circular(), Theme::default())
    }

    #[test]
    fn sweep_angle_is_linear_in_progress() {
        for (progress, max) in [(0.0, 100.0), (25.0, 100.0), (7.0, 30.0), (99.0, 100.0)] {
            let expected = progress * 360.0 / max;
            assert!((sweep_angle_for(progress, max) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn rating_label_has_one_decimal_and_a_point() {
        assert_eq!(rating_label(99.0, 100.0), "9.9");
        assert_eq!(rating_label(0.0, 100.0), "0.0");
        assert_eq!(rating_label(100.0, 100.0), "10.0");
        assert_eq!(rating_label(7.0, 30.0), "2.3");
    }

    #[test]
    fn ninety_nine_out_of_a_hundred() {
        let mut gauge = standard_gauge();
        gauge.set_max(100.0);
        gauge.set_progress(99.0).unwrap();
        assert_eq!(gauge.rating(), "9.9");
        assert!((gauge.sweep_angle() - 356.4).abs() < 1e-4);
    }

    #[test]
    fn rejects_progress_above_max() {
        let mut gauge = standard_gauge();
        gauge.set_progress(50.0).unwrap();
        let err = gauge.set_progress(101.0).unwrap_err();
        assert!(matches!(err, RatingError::ProgressOutOfRange { .. }));
        // Failed assignment leaves every derived field untouched.
        assert_eq!(gauge.progress(), 50.0);
        assert!((gauge.sweep_angle() - 180.0).abs() < 1e-4);
        assert_eq!(gauge.rating(), "5.0");
    }

    #[test]
    fn rejects_negative_progress() {
        let mut gauge = standard_gauge();
        assert!(gauge.set_progress(-1.0).is_err());
        assert_eq!(gauge.progress(), 0.0);
    }

    #[test]
    fn standard_policy_accepts_exactly_max() {
        let mut gauge = standard_gauge();
        gauge.set_progress(100.0).unwrap();
        assert!((gauge.sweep_angle() - 360.0).abs() < 1e-4);
        assert_eq!(gauge.rating(), "10.0");
    }

    #[test]
    fn circular_policy_stops_one_below_max() {
        let mut gauge = circular_gauge();
        assert_eq!(gauge.style().bound_policy, BoundPolicy::MaxMinusOne);
        assert!(gauge.set_progress(100.0).is_err());
        gauge.set_progress(99.0).unwrap();
        assert_eq!(gauge.rating(), "9.9");
    }

    #[test]
    fn set_progress_is_idempotent() {
        let mut gauge = standard_gauge();
        gauge.set_progress(42.0).unwrap();
        let first = (gauge.sweep_angle(), gauge.rating().to_string());
        gauge.set_progress(42.0).unwrap();
        assert_eq!(first, (gauge.sweep_angle(), gauge.rating().to_string()));
    }

    #[test]
    fn zero_progress_draws_nothing() {
        let gauge = standard_gauge();
        assert_eq!(gauge.sweep_angle(), 0.0);
        assert_eq!(gauge.rating(), "0.0");
    }

    #[test]
    fn measure_constrains_to_a_square() {
        let mut gauge = circular_gauge();
        assert_eq!(gauge.measure(300, 400), 300);
        assert_eq!(gauge.size(), 300);
        assert_eq!(gauge.measure(500, 200), 200);
    }

    #[test]
    fn arc_rect_is_inset_by_half_the_glow_stroke() {
        let mut gauge = circular_gauge();
        gauge.measure(300, 300);
        assert_eq!(
            gauge.arc_rect(),
            Rect {
                left: 27.0,
                top: 27.0,
                right: 273.0,
                bottom: 273.0,
            }
        );

        let mut gauge = standard_gauge();
        gauge.measure(500, 500);
        assert_eq!(gauge.arc_rect().left, 25.0);
        assert_eq!(gauge.arc_rect().right, 475.0);
    }

    #[test]
    fn cap_correction_matches_the_atan_formula() {
        // size 600, stroke 54: centerline radius 273, half stroke 27.
        let corr = cap_correction_deg(546.0, 54.0);
        assert!((corr - 6.2637).abs() < 1e-2, "correction was {}", corr);
    }

    #[test]
    fn circular_arcs_carry_cap_corrections() {
        let mut gauge = circular_gauge();
        gauge.measure(600, 600);
        gauge.set_progress(50.0).unwrap();
        let glow_corr = cap_correction_deg(546.0, 54.0);
        let ring_corr = cap_correction_deg(546.0, 18.0);
        let (start, sweep) = gauge.glow_arc_angles();
        assert!((start - (270.0 + glow_corr)).abs() < 1e-3);
        assert!((sweep - (180.0 - 2.0 * glow_corr + ring_corr)).abs() < 1e-3);
        let (ring_start, ring_sweep) = gauge.ring_arc_angles();
        assert_eq!(ring_start, 270.0);
        assert!((ring_sweep - 180.0).abs() < 1e-4);
    }

    #[test]
    fn standard_glow_is_trimmed_by_two_degrees() {
        let mut gauge = standard_gauge();
        gauge.measure(600, 600);
        gauge.set_progress(50.0).unwrap();
        let (start, sweep) = gauge.glow_arc_angles();
        assert_eq!(start, 270.0);
        assert!((sweep - 178.0).abs() < 1e-4);
    }

    #[test]
    fn shaders_track_progress_and_size() {
        let mut gauge = circular_gauge();
        gauge.measure(600, 600);
        gauge.set_progress(25.0).unwrap();
        assert!((gauge.glow_shader().sweep.positions[1] - 0.25).abs() < 1e-6);
        assert_eq!(gauge.glow_shader().sweep.cx, 300.0);
        // The ring shader is rotated back by the ring cap correction.
        let ring_corr = cap_correction_deg(546.0, 18.0);
        assert!((gauge.ring_shader().rotation_deg - (270.0 - ring_corr)).abs() < 1e-3);
    }
}
