//! Framebuffer painting: canvas, retained-mode scene, arc rasterization
//! and the centered score label.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::gauge::{ArcGauge, Rect};
use crate::shader::{normalize_deg, GlowShader, SweepGradient};

/// View over an RGBA8 frame buffer
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Source-over blend of `color` at the given coverage.
    fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.frame.len() / (self.width * 4) {
            return;
        }
        let alpha = coverage * color.a as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let dst = [
            self.frame[idx] as f32,
            self.frame[idx + 1] as f32,
            self.frame[idx + 2] as f32,
        ];
        let out = [
            (color.r as f32 * alpha + dst[0] * (1.0 - alpha)).round() as u8,
            (color.g as f32 * alpha + dst[1] * (1.0 - alpha)).round() as u8,
            (color.b as f32 * alpha + dst[2] * (1.0 - alpha)).round() as u8,
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }
}

#[derive(Clone, Debug)]
pub enum DrawCommand {
    Clear(Color),
    GlowArc {
        rect: Rect,
        start_angle: f32,
        sweep_angle: f32,
        stroke_width: f32,
        shader: GlowShader,
    },
    RingArc {
        rect: Rect,
        start_angle: f32,
        sweep_angle: f32,
        stroke_width: f32,
        shader: SweepGradient,
    },
    Label {
        cx: i32,
        cy: i32,
        text: String,
        font_size: f32,
        color: Color,
    },
}

/// Ordered list of draw commands for one frame
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Builds the frame for a gauge: background, glow arc, ring arc on
    /// top, rating label in the middle.
    pub fn for_gauge(gauge: &ArcGauge, background: Color) -> Self {
        let mut scene = Self::new();
        scene.add_command(DrawCommand::Clear(background));

        let rect = gauge.arc_rect();
        let (glow_start, glow_sweep) = gauge.glow_arc_angles();
        scene.add_command(DrawCommand::GlowArc {
            rect,
            start_angle: glow_start,
            sweep_angle: glow_sweep,
            stroke_width: gauge.style().glow_stroke_width,
            shader: *gauge.glow_shader(),
        });

        let (ring_start, ring_sweep) = gauge.ring_arc_angles();
        scene.add_command(DrawCommand::RingArc {
            rect,
            start_angle: ring_start,
            sweep_angle: ring_sweep,
            stroke_width: gauge.style().ring_stroke_width,
            shader: *gauge.ring_shader(),
        });

        let center = gauge.size() as i32 / 2;
        scene.add_command(DrawCommand::Label {
            cx: center,
            cy: center,
            text: gauge.rating().to_string(),
            font_size: gauge.theme().text_size,
            color: gauge.theme().text_color,
        });
        scene
    }

    pub fn render(&self, canvas: &mut Canvas<'_>, font: &Font<'_>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::GlowArc {
                    rect,
                    start_angle,
                    sweep_angle,
                    stroke_width,
                    shader,
                } => {
                    render_stroked_arc(
                        canvas,
                        *rect,
                        *start_angle,
                        *sweep_angle,
                        *stroke_width,
                        |x, y| shader.eval(x, y),
                    );
                }
                DrawCommand::RingArc {
                    rect,
                    start_angle,
                    sweep_angle,
                    stroke_width,
                    shader,
                } => {
                    render_stroked_arc(
                        canvas,
                        *rect,
                        *start_angle,
                        *sweep_angle,
                        *stroke_width,
                        |x, y| shader.eval(x, y),
                    );
                }
                DrawCommand::Label {
                    cx,
                    cy,
                    text,
                    font_size,
                    color,
                } => {
                    draw_text(canvas, *cx, *cy, text, font, Scale::uniform(*font_size), *color);
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterizes a stroked arc with round caps, evaluating `paint` per pixel.
///
/// The arc centerline is the circle inscribed in `rect`; `start_angle` and
/// `sweep_angle` are degrees, 0 at +x, increasing clockwise in screen
/// coordinates. Edges get 1px of anti-aliasing.
pub fn render_stroked_arc<F>(
    canvas: &mut Canvas<'_>,
    rect: Rect,
    start_angle: f32,
    sweep_angle: f32,
    stroke_width: f32,
    paint: F,
) where
    F: Fn(f32, f32) -> Color,
{
    if sweep_angle <= 0.0 || rect.width() <= 0.0 {
        return;
    }
    let cx = (rect.left + rect.right) / 2.0;
    let cy = (rect.top + rect.bottom) / 2.0;
    let radius = rect.width() / 2.0;
    let half = stroke_width / 2.0;

    let full_circle = sweep_angle >= 360.0;
    let start = normalize_deg(start_angle);
    let end = normalize_deg(start_angle + sweep_angle);
    let (start_cap_x, start_cap_y) = cap_center(cx, cy, radius, start_angle);
    let (end_cap_x, end_cap_y) = cap_center(cx, cy, radius, start_angle + sweep_angle);

    let reach = radius + half + 1.0;
    let min_x = ((cx - reach).floor() as i32).max(0);
    let max_x = ((cx + reach).ceil() as i32).min(canvas.width as i32 - 1);
    let min_y = ((cy - reach).floor() as i32).max(0);
    let max_y = ((cy + reach).ceil() as i32).min(canvas.height as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let fx = x as f32;
            let fy = y as f32;
            let dx = fx - cx;
            let dy = fy - cy;
            let dist = (dx * dx + dy * dy).sqrt();

            let angle = normalize_deg(dy.atan2(dx).to_degrees());
            let in_arc = full_circle
                || if start <= end {
                    angle >= start && angle <= end
                } else {
                    angle >= start || angle <= end
                };

            let body = if in_arc {
                (half + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let start_cap = cap_coverage(fx, fy, start_cap_x, start_cap_y, half);
            let end_cap = cap_coverage(fx, fy, end_cap_x, end_cap_y, half);
            let coverage = body.max(start_cap).max(end_cap);
            if coverage > 0.01 {
                let color = paint(fx, fy);
                canvas.blend_pixel(x as usize, y as usize, color, coverage);
            }
        }
    }
}

fn cap_center(cx: f32, cy: f32, radius: f32, angle_deg: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (cx + rad.cos() * radius, cy + rad.sin() * radius)
}

fn cap_coverage(x: f32, y: f32, cap_x: f32, cap_y: f32, half_stroke: f32) -> f32 {
    let dist = ((x - cap_x).powi(2) + (y - cap_y).powi(2)).sqrt();
    (half_stroke + 0.5 - dist).clamp(0.0, 1.0)
}

/// Draws `text` with its bounding box centered on `(x, y)`.
pub fn draw_text(
    canvas: &mut Canvas<'_>,
    x: i32,
    y: i32,
    text: &str,
    font: &Font<'_>,
    scale: Scale,
    color: Color,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph<'_>> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;
    let (canvas_w, canvas_h) = (canvas.width() as i32, canvas.height() as i32);
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && px < canvas_w && py >= 0 && py < canvas_h {
                    canvas.blend_pixel(px as usize, py as usize, color, v);
                }
            });
        }
    }
}
