//! Color utilities for figures

/// Backend-neutral sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`, `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Get a categorical color from the palette
pub fn categorical_color(index: usize) -> Rgb {
    const PALETTE: &[Rgb] = &[
        Rgb::new(76, 114, 176),  // Blue
        Rgb::new(221, 132, 82),  // Orange
        Rgb::new(85, 168, 104),  // Green
        Rgb::new(196, 78, 82),   // Red
        Rgb::new(129, 114, 179), // Purple
        Rgb::new(147, 120, 96),  // Brown
        Rgb::new(218, 139, 195), // Pink
        Rgb::new(140, 140, 140), // Gray
    ];
    PALETTE[index % PALETTE.len()]
}

/// Default color for single-series figures
pub fn primary_color() -> Rgb {
    categorical_color(0)
}

/// Sequential ramp from near-white to `base`, used for density shading
pub fn light_ramp(base: Rgb, t: f64) -> Rgb {
    Rgb::new(236, 240, 246).lerp(base, 0.15 + 0.85 * t.clamp(0.0, 1.0))
}

/// Darker shade of `base`, used for outlines
pub fn darken(base: Rgb, amount: f64) -> Rgb {
    base.lerp(Rgb::BLACK, amount)
}
