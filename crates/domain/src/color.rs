//! Colors — RGB values from the weather table and their projection onto a
//! bulb's color gamut.
//!
//! Bulbs take colors as CIE 1931 xy chromaticity plus a separate
//! brightness. The sRGB → XYZ → xyY conversion is done by `palette`; the
//! resulting point is then clamped into the triangle the bulb can actually
//! reproduce.

use std::fmt;

use palette::{FromColor, LinSrgb, Srgb, Xyz, Yxy};
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color as written in the weather table (`[r, g, b]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Whether every channel is zero.
    #[must_use]
    pub fn is_black(self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.red, rgb.green, rgb.blue]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Bulb brightness as configured in the weather table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Lowest brightness a Hue bulb accepts while on.
    pub const MIN: u8 = 1;
    /// Highest brightness a Hue bulb accepts.
    pub const MAX: u8 = 254;

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// The configured value, unmodified.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The value clamped to the range the bridge accepts.
    #[must_use]
    pub fn bridge_value(self) -> u8 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in CIE 1931 xy chromaticity space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

impl XyPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn distance_sq(self, other: Self) -> f64 {
        let d = self.sub(other);
        d.dot(d)
    }

    /// Round both coordinates to the 4 decimals the bridge stores.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            (self.x * 10_000.0).round() / 10_000.0,
            (self.y * 10_000.0).round() / 10_000.0,
        )
    }
}

/// D65 white point, used for black since it has no chromaticity.
pub const WHITE_POINT: XyPoint = XyPoint::new(0.3127, 0.3290);

/// Color gamut of a Hue bulb family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gamut {
    /// LivingColors, Bloom, Aura, Iris.
    #[serde(alias = "gamutA")]
    A,
    /// First generation Hue bulbs.
    #[default]
    #[serde(alias = "gamutB")]
    B,
    /// Hue bulbs from the third generation on, lightstrips plus.
    #[serde(alias = "gamutC")]
    C,
}

impl Gamut {
    /// The (red, green, blue) corners of the reproducible triangle.
    #[must_use]
    pub const fn corners(self) -> [XyPoint; 3] {
        match self {
            Self::A => [
                XyPoint::new(0.704, 0.296),
                XyPoint::new(0.2151, 0.7106),
                XyPoint::new(0.138, 0.08),
            ],
            Self::B => [
                XyPoint::new(0.675, 0.322),
                XyPoint::new(0.4091, 0.518),
                XyPoint::new(0.167, 0.04),
            ],
            Self::C => [
                XyPoint::new(0.692, 0.308),
                XyPoint::new(0.17, 0.7),
                XyPoint::new(0.153, 0.048),
            ],
        }
    }

    /// Whether `point` lies inside (or on the edge of) this gamut.
    #[must_use]
    pub fn contains(self, point: XyPoint) -> bool {
        let [red, green, blue] = self.corners();
        let v1 = green.sub(red);
        let v2 = blue.sub(red);
        let q = point.sub(red);
        let denom = v1.cross(v2);
        let s = q.cross(v2) / denom;
        let t = v1.cross(q) / denom;
        s >= 0.0 && t >= 0.0 && s + t <= 1.0
    }

    /// Move `point` onto the nearest edge of the gamut if it lies outside.
    #[must_use]
    pub fn clamp(self, point: XyPoint) -> XyPoint {
        if self.contains(point) {
            return point;
        }
        let [red, green, blue] = self.corners();
        [(red, green), (blue, red), (green, blue)]
            .into_iter()
            .map(|(a, b)| closest_on_segment(a, b, point))
            .min_by(|a, b| a.distance_sq(point).total_cmp(&b.distance_sq(point)))
            .unwrap_or(point)
    }

    /// Convert an sRGB color to the closest xy point this gamut can show.
    #[must_use]
    pub fn rgb_to_xy(self, rgb: Rgb) -> XyPoint {
        if rgb.is_black() {
            return self.clamp(WHITE_POINT).rounded();
        }
        let linear: LinSrgb = Srgb::new(rgb.red, rgb.green, rgb.blue)
            .into_format::<f32>()
            .into_linear();
        let xyz: Xyz = Xyz::from_color(linear);
        let yxy: Yxy = Yxy::from_color(xyz);
        self.clamp(XyPoint::new(f64::from(yxy.x), f64::from(yxy.y)))
            .rounded()
    }
}

fn closest_on_segment(a: XyPoint, b: XyPoint, p: XyPoint) -> XyPoint {
    let ab = b.sub(a);
    let t = (p.sub(a).dot(ab) / ab.dot(ab)).clamp(0.0, 1.0);
    XyPoint::new(a.x + ab.x * t, a.y + ab.y * t)
}
