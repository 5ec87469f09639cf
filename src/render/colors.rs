use std::fmt;

/// 8-bit sRGB fill color for a treemap band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wide integer channels, keeping the low byte of each.
    pub fn wrapping(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: (r & 0xff) as u8,
            g: (g & 0xff) as u8,
            b: (b & 0xff) as u8,
        }
    }
}

/// SVG/CSS color notation: `rgb(r, g, b)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Fill color for a child band, derived from its parent's weight and the
/// band's ideal length. Siblings share red and green and drift in blue.
pub fn slice_color(parent_weight: f64, proportion: f64) -> Rgb {
    let weight = parent_weight as i64;
    Rgb::wrapping(weight >> 2, weight >> 1, (parent_weight + proportion) as i64)
}
