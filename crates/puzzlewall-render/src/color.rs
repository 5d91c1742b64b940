use serde::{Deserialize, Serialize};

/// Hue of the piece at `index`, stepping around the color wheel by `hue_step` degrees.
pub fn piece_hue(index: usize, hue_step: u32) -> u32 {
    ((index as u64 * hue_step as u64) % 360) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u32,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: u32, s: f64, l: f64) -> Self {
        Self { h: h % 360, s, l }
    }

    /// CSS functional notation, e.g. `hsl(37, 70%, 75%)`.
    pub fn to_css(self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.h,
            crate::svg::util::fmt(self.s),
            crate::svg::util::fmt(self.l)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hues_step_by_37_degrees() {
        assert_eq!(piece_hue(0, 37), 0);
        assert_eq!(piece_hue(1, 37), 37);
        assert_eq!(piece_hue(10, 37), 10);
        assert_eq!(piece_hue(usize::MAX, 0), 0);
    }

    #[test]
    fn css_notation() {
        assert_eq!(Hsl::new(37, 70.0, 75.0).to_css(), "hsl(37, 70%, 75%)");
        assert_eq!(Hsl::new(400, 62.5, 80.0).to_css(), "hsl(40, 62.5%, 80%)");
    }
}
