use cairo::{Context, Format, ImageSurface, LineCap};
use kurbo::PathEl;
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, ArcStyle, Color, LineStrokeStyle, PathPaint, PathPrimitive, Primitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a host toolkit's draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders either offscreen into its own image surface through
/// `Renderer::render`, or in place on an external context through
/// `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for primitive in &frame.primitives {
            context.new_path();
            match primitive {
                Primitive::Line(line) => {
                    apply_color(context, line.color);
                    context.set_line_width(line.stroke_width);
                    match line.stroke_style {
                        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
                        LineStrokeStyle::Dashed { dash, gap } => context.set_dash(&[dash, gap], 0.0),
                    }
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    stroke(context, "failed to stroke line")?;
                    context.set_dash(&[], 0.0);
                    stats.lines_drawn += 1;
                }
                Primitive::Rect(rect) => {
                    append_rect_path(context, *rect);
                    apply_color(context, rect.fill_color);
                    fill(context, "failed to fill rectangle")?;
                    stats.rects_drawn += 1;
                }
                Primitive::Arc(arc) => {
                    draw_arc(context, *arc)?;
                    stats.arcs_drawn += 1;
                }
                Primitive::Circle(circle) => {
                    apply_color(context, circle.color);
                    context.arc(circle.center_x, circle.center_y, circle.radius, 0.0, 2.0 * PI);
                    fill(context, "failed to fill circle")?;
                    stats.circles_drawn += 1;
                }
                Primitive::Path(path) => {
                    draw_path(context, path)?;
                    stats.paths_drawn += 1;
                }
                Primitive::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_arc(context: &Context, arc: ArcPrimitive) -> ChartResult<()> {
    let start = arc.start_angle.to_radians();
    let end = (arc.start_angle + arc.sweep_angle).to_radians();
    apply_color(context, arc.color);
    match arc.style {
        ArcStyle::Wedge => {
            context.move_to(arc.center_x, arc.center_y);
            context.arc(arc.center_x, arc.center_y, arc.radius, start, end);
            context.close_path();
            fill(context, "failed to fill wedge")
        }
        ArcStyle::Ring { thickness } => {
            context.set_line_width(thickness);
            context.set_line_cap(LineCap::Round);
            context.arc(arc.center_x, arc.center_y, arc.radius, start, end);
            let result = stroke(context, "failed to stroke ring");
            context.set_line_cap(LineCap::Butt);
            result
        }
    }
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    for element in path.path.elements() {
        match *element {
            PathEl::MoveTo(p) => context.move_to(p.x, p.y),
            PathEl::LineTo(p) => context.line_to(p.x, p.y),
            PathEl::QuadTo(p1, p2) => {
                let (x0, y0) = context.current_point().unwrap_or((p1.x, p1.y));
                let c1 = (x0 + 2.0 / 3.0 * (p1.x - x0), y0 + 2.0 / 3.0 * (p1.y - y0));
                let c2 = (p2.x + 2.0 / 3.0 * (p1.x - p2.x), p2.y + 2.0 / 3.0 * (p1.y - p2.y));
                context.curve_to(c1.0, c1.1, c2.0, c2.1, p2.x, p2.y);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                context.curve_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
            }
            PathEl::ClosePath => context.close_path(),
        }
    }

    apply_color(context, path.color);
    match path.paint {
        PathPaint::Fill => fill(context, "failed to fill path"),
        PathPaint::Stroke { width } => {
            context.set_line_width(width);
            stroke(context, "failed to stroke path")
        }
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let weight = if text.bold { "Bold " } else { "" };
    let font_description =
        FontDescription::from_string(&format!("Sans {weight}{}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };

    apply_color(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill(context: &Context, what: &str) -> ChartResult<()> {
    context.fill().map_err(|err| map_backend_error(what, err))
}

fn stroke(context: &Context, what: &str) -> ChartResult<()> {
    context.stroke().map_err(|err| map_backend_error(what, err))
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
