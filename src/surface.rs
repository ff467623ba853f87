// Drawing target for the particle field. The canvas implementation wraps a
// 2d context; tests swap in a recorder so frames can be checked natively.

use crate::color::Color;
use crate::error::MountError;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    /// Resizes the backing buffer, which also clears whatever was drawn.
    fn resize(&mut self, width: u32, height: u32);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color);
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color);
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(MountError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::NoContext)?;
        Ok(CanvasSurface { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    #[allow(deprecated)]
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill_rect(x, y, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.context.begin_path();
        if self
            .context
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0)
            .is_err()
        {
            // negative radius, nothing to draw
            return;
        }
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color) {
        self.context.begin_path();
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Resize(u32, u32),
        Rect([f64; 4], Color),
        Circle(Vector2<f64>, f64, Color),
        Line(Vector2<f64>, Vector2<f64>, f64, Color),
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn lines(&self) -> Vec<&Op> {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Line(..)))
                .collect()
        }

        pub fn circles(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Circle(..)))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, width: u32, height: u32) {
            self.ops.push(Op::Resize(width, height));
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
            self.ops.push(Op::Rect([x, y, width, height], color));
        }

        fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
            self.ops.push(Op::Circle(center, radius, color));
        }

        fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color) {
            self.ops.push(Op::Line(from, to, width, color));
        }
    }
}
