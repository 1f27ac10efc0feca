use std::time::Duration;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::PresentationMode;
use crate::render::{
    Color, LinePrimitive, Primitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::layout_helpers::{centered_text_top, ellipsize};
use super::validation::{validate_color, validate_non_negative, validate_positive};
use super::{ChartWidget, JsonConfig};

const ICON_SIZE_PX: f64 = 18.0;
const ICON_STROKE_PX: f64 = 2.0;

/// Card shell around a chart: title header, expand affordance, background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub title: String,
    /// Inline cards never grow past this height.
    #[serde(default = "default_max_height")]
    pub max_height: f64,
    #[serde(default)]
    pub card_padding: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f64,
    #[serde(default = "default_expanded_title_font_size")]
    pub expanded_title_font_size: f64,
    /// Gap between the screen edge and the expanded overlay card.
    #[serde(default = "default_expanded_margin")]
    pub expanded_margin: f64,
    /// Inner padding of the expanded overlay card.
    #[serde(default = "default_expanded_padding")]
    pub expanded_padding: f64,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    #[serde(default = "default_container_color")]
    pub container_color: Color,
    #[serde(default = "default_content_color")]
    pub content_color: Color,
}

impl CardConfig {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            max_height: default_max_height(),
            card_padding: 0.0,
            header_height: default_header_height(),
            title_font_size: default_title_font_size(),
            expanded_title_font_size: default_expanded_title_font_size(),
            expanded_margin: default_expanded_margin(),
            expanded_padding: default_expanded_padding(),
            corner_radius: default_corner_radius(),
            container_color: default_container_color(),
            content_color: default_content_color(),
        }
    }

    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = max_height;
        self
    }

    #[must_use]
    pub fn with_card_padding(mut self, card_padding: f64) -> Self {
        self.card_padding = card_padding;
        self
    }

    #[must_use]
    pub fn with_container_color(mut self, color: Color) -> Self {
        self.container_color = color;
        self
    }
}

impl JsonConfig for CardConfig {
    fn validate(&self) -> ChartResult<()> {
        validate_positive("max_height", self.max_height)?;
        validate_non_negative("card_padding", self.card_padding)?;
        validate_positive("header_height", self.header_height)?;
        validate_positive("title_font_size", self.title_font_size)?;
        validate_positive("expanded_title_font_size", self.expanded_title_font_size)?;
        validate_non_negative("expanded_margin", self.expanded_margin)?;
        validate_non_negative("expanded_padding", self.expanded_padding)?;
        validate_non_negative("corner_radius", self.corner_radius)?;
        validate_color("container_color", self.container_color)?;
        validate_color("content_color", self.content_color)
    }
}

fn default_max_height() -> f64 {
    300.0
}

fn default_header_height() -> f64 {
    48.0
}

fn default_title_font_size() -> f64 {
    16.0
}

fn default_expanded_title_font_size() -> f64 {
    20.0
}

fn default_expanded_margin() -> f64 {
    32.0
}

fn default_expanded_padding() -> f64 {
    16.0
}

fn default_corner_radius() -> f64 {
    16.0
}

fn default_container_color() -> Color {
    Color::from_argb(0xFFEADDFF)
}

fn default_content_color() -> Color {
    Color::from_argb(0xFF1D1B20)
}

/// Host-facing chart card.
///
/// Owns the widget and the renderer, tracks the inline/expanded presentation
/// state and turns both into one `RenderFrame` per call to [`ChartCard::render`].
pub struct ChartCard<W: ChartWidget, R: Renderer> {
    renderer: R,
    widget: W,
    config: CardConfig,
    mode: PresentationMode,
}

impl<W: ChartWidget, R: Renderer> ChartCard<W, R> {
    pub fn new(renderer: R, widget: W, config: CardConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            widget,
            config,
            mode: PresentationMode::Inline,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.config.title
    }

    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CardConfig) -> ChartResult<()> {
        config.validate()?;
        debug!(title = %config.title, "set card config");
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn expand(&mut self) {
        self.set_mode(PresentationMode::Expanded);
    }

    pub fn collapse(&mut self) {
        self.set_mode(PresentationMode::Inline);
    }

    pub fn toggle_expanded(&mut self) {
        let next = if self.mode.is_expanded() {
            PresentationMode::Inline
        } else {
            PresentationMode::Expanded
        };
        self.set_mode(next);
    }

    fn set_mode(&mut self, mode: PresentationMode) {
        if self.mode != mode {
            debug!(title = %self.config.title, ?mode, "card presentation changed");
            self.mode = mode;
        }
    }

    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.widget.is_animating(now)
    }

    /// Card rectangle for the current presentation mode.
    #[must_use]
    pub fn card_rect(&self, viewport: Viewport) -> Rect {
        match self.mode {
            PresentationMode::Inline => {
                let padding = self.config.card_padding;
                let height = viewport.height.min(self.config.max_height);
                inset(Rect::new(0.0, 0.0, viewport.width, height), padding)
            }
            PresentationMode::Expanded => inset(
                Rect::new(0.0, 0.0, viewport.width, viewport.height),
                self.config.expanded_margin,
            ),
        }
    }

    /// Hit area of the expand (inline) or close (expanded) button.
    #[must_use]
    pub fn toggle_button_rect(&self, viewport: Viewport) -> Rect {
        let header = self.header_rect(viewport);
        let size = header.height();
        Rect::new(header.x1 - size, header.y0, header.x1, header.y1)
    }

    /// Area the widget draws into.
    #[must_use]
    pub fn content_rect(&self, viewport: Viewport) -> Rect {
        let card = self.card_rect(viewport);
        let header = self.header_rect(viewport);
        let content = Rect::new(card.x0, header.y1, card.x1, card.y1);
        match self.mode {
            PresentationMode::Inline => content,
            PresentationMode::Expanded => inset(content, self.config.expanded_padding),
        }
    }

    fn header_rect(&self, viewport: Viewport) -> Rect {
        let card = self.card_rect(viewport);
        let card = match self.mode {
            PresentationMode::Inline => card,
            PresentationMode::Expanded => inset(card, self.config.expanded_padding),
        };
        let height = self.config.header_height.min(card.height());
        Rect::new(card.x0, card.y0, card.x1, card.y0 + height)
    }

    /// Routes a tap: the header button toggles the presentation, anything in
    /// the content area goes to the widget. Returns whether state changed.
    pub fn handle_tap(&mut self, viewport: Viewport, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        if self.toggle_button_rect(viewport).contains(point) {
            self.toggle_expanded();
            return true;
        }
        let content = self.content_rect(viewport);
        if content.contains(point) {
            return self.widget.handle_tap(content, self.mode, x, y);
        }
        false
    }

    pub fn build_frame(&mut self, viewport: Viewport, now: Duration) -> ChartResult<RenderFrame> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut frame = RenderFrame::new(viewport);
        self.push_shell(&mut frame, viewport);
        let content = self.content_rect(viewport);
        if content.width() > 0.0 && content.height() > 0.0 {
            self.widget.draw(&mut frame, content, self.mode, now)?;
        }
        trace!(
            title = %self.config.title,
            primitives = frame.primitives.len(),
            "built card frame"
        );
        Ok(frame)
    }

    pub fn render(&mut self, viewport: Viewport, now: Duration) -> ChartResult<()> {
        let frame = self.build_frame(viewport, now)?;
        self.renderer.render(&frame)
    }

    fn push_shell(&self, frame: &mut RenderFrame, viewport: Viewport) {
        let card = self.card_rect(viewport);
        frame.push(Primitive::Rect(
            RectPrimitive::new(
                card.x0,
                card.y0,
                card.width().max(0.0),
                card.height().max(0.0),
                self.config.container_color,
            )
            .with_corner_radius(self.config.corner_radius),
        ));

        let header = self.header_rect(viewport);
        let button = self.toggle_button_rect(viewport);
        let (font_size, text_x, align) = match self.mode {
            PresentationMode::Inline => {
                (self.config.title_font_size, header.x0 + 16.0, TextHAlign::Left)
            }
            PresentationMode::Expanded => (
                self.config.expanded_title_font_size,
                header.center().x,
                TextHAlign::Center,
            ),
        };
        let max_title_width = match self.mode {
            PresentationMode::Inline => (button.x0 - text_x).max(0.0),
            PresentationMode::Expanded => (header.width() - 2.0 * button.width()).max(0.0),
        };
        let title = ellipsize(&self.config.title, font_size, max_title_width);
        if !title.is_empty() {
            frame.push(Primitive::Text(
                TextPrimitive::new(
                    title,
                    text_x,
                    centered_text_top(header.y0, header.height(), font_size),
                    font_size,
                    self.config.content_color,
                    align,
                )
                .bold(),
            ));
        }

        self.push_toggle_icon(frame, button);
    }

    /// Expand shows two outward corners on a diagonal; close shows a cross.
    fn push_toggle_icon(&self, frame: &mut RenderFrame, button: Rect) {
        let center = button.center();
        let half = ICON_SIZE_PX / 2.0;
        let color = self.config.content_color;
        let (left, top, right, bottom) = (
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        );
        let segments: &[(f64, f64, f64, f64)] = match self.mode {
            PresentationMode::Inline => {
                let arm = ICON_SIZE_PX * 0.4;
                &[
                    (left, bottom, right, top),
                    (right - arm, top, right, top),
                    (right, top, right, top + arm),
                    (left, bottom - arm, left, bottom),
                    (left, bottom, left + arm, bottom),
                ]
            }
            PresentationMode::Expanded => &[(left, top, right, bottom), (left, bottom, right, top)],
        };
        for &(x1, y1, x2, y2) in segments {
            frame.push(Primitive::Line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                ICON_STROKE_PX,
                color,
            )));
        }
    }
}

fn inset(rect: Rect, amount: f64) -> Rect {
    let x0 = rect.x0 + amount;
    let y0 = rect.y0 + amount;
    Rect::new(x0, y0, (rect.x1 - amount).max(x0), (rect.y1 - amount).max(y0))
}
