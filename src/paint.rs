use crate::constants::*;
use crate::format;
use anyhow::anyhow;
use raffle_core::{ReelFrame, ThemeConfig};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("canvas: {:?}", e)
}

pub struct CanvasPainter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("unexpected 2d context type: {:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    /// Maps viewport pixels onto the canvas; returns the viewport width.
    fn apply_scale(&self, theme: &ThemeConfig) -> anyhow::Result<f64> {
        let viewport_h = theme.layout.viewport_height_px();
        let canvas_w = self.canvas.width().max(1) as f64;
        let canvas_h = self.canvas.height().max(1) as f64;
        let scale = if viewport_h > 0.0 { canvas_h / viewport_h } else { 1.0 };
        self.ctx
            .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
            .map_err(js_err)?;
        Ok(canvas_w / scale)
    }

    /// Background and pointer only, for idle and reset.
    pub fn clear(&self, theme: &ThemeConfig) -> anyhow::Result<()> {
        let width = self.apply_scale(theme)?;
        let height = theme.layout.viewport_height_px();
        self.ctx.set_fill_style_str(&theme.background);
        self.ctx.fill_rect(0.0, 0.0, width, height);
        self.paint_highlight(theme, width);
        self.paint_pointer(theme, width);
        Ok(())
    }

    pub fn paint(&self, frame: &ReelFrame<'_>, theme: &ThemeConfig) -> anyhow::Result<()> {
        let width = self.apply_scale(theme)?;
        let h = frame.item_height_px;
        let height = frame.visible_rows as f64 * h;

        self.ctx.set_fill_style_str(&theme.background);
        self.ctx.fill_rect(0.0, 0.0, width, height);

        // Stripes follow distance-to-winner so they scroll with the rows
        for i in 0..frame.rows.len() {
            if (frame.first_row_distance - i as i64).rem_euclid(2) == 1 {
                self.ctx.set_fill_style_str(&theme.row_alt_background);
                self.ctx.fill_rect(0.0, frame.row_y_px(i), width, h);
            }
        }

        self.paint_highlight(theme, width);

        self.ctx.set_font(&theme.css_font());
        self.ctx.set_text_baseline("middle");
        for (i, p) in frame.rows.iter().enumerate() {
            let mid = frame.row_y_px(i) + h * 0.5;
            if mid < -h || mid > height + h {
                continue;
            }
            let color = if i == frame.pointer_index {
                &theme.highlight
            } else {
                &theme.row_text
            };
            self.ctx.set_fill_style_str(color);
            self.ctx.set_text_align("left");
            self.ctx
                .fill_text(&format::row_name(p), width * TEXT_INSET_FRACTION, mid)
                .map_err(js_err)?;
            if let Some(ticket) = format::row_ticket(p, theme.show_ticket_numbers) {
                self.ctx.set_text_align("right");
                self.ctx
                    .fill_text(&ticket, width * (1.0 - TICKET_INSET_FRACTION), mid)
                    .map_err(js_err)?;
            }
        }

        self.paint_pointer(theme, width);
        Ok(())
    }

    fn paint_highlight(&self, theme: &ThemeConfig, width: f64) {
        let h = theme.layout.item_height_px;
        let y = theme.layout.pointer_row() as f64 * h;
        self.ctx.save();
        self.ctx.set_global_alpha(HIGHLIGHT_FILL_ALPHA);
        self.ctx.set_fill_style_str(&theme.highlight);
        self.ctx.fill_rect(0.0, y, width, h);
        self.ctx.restore();

        self.ctx.set_stroke_style_str(&theme.highlight);
        self.ctx.set_line_width(HIGHLIGHT_BORDER_PX);
        self.ctx.stroke_rect(0.0, y, width, h);
    }

    fn paint_pointer(&self, theme: &ThemeConfig, width: f64) {
        let h = theme.layout.item_height_px;
        let mid = theme.layout.pointer_row() as f64 * h + h * 0.5;
        let half = h * POINTER_HALF_HEIGHT_FRACTION;
        let depth = width * POINTER_DEPTH_FRACTION;
        self.ctx.set_fill_style_str(&theme.pointer);
        for (edge, tip) in [(0.0, depth), (width, width - depth)] {
            self.ctx.begin_path();
            self.ctx.move_to(edge, mid - half);
            self.ctx.line_to(tip, mid);
            self.ctx.line_to(edge, mid + half);
            self.ctx.close_path();
            self.ctx.fill();
        }
    }
}
