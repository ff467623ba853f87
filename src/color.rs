// Simple color struct, RGB bytes plus a fractional alpha so it can be
// handed to the canvas as a CSS rgba() string

use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "Color::opaque")]
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Color {
        Color { r, g, b, a }
    }

    // Created from an unsigned 32 representing RRGGBBAA
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color {
            r,
            g,
            b,
            a: a as f64 / 255.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    fn opaque() -> f64 {
        1.0
    }
}
