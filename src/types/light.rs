//! Light types: color, palette, rhythm class, flash pattern, descriptor

use serde::{Deserialize, Serialize};

// ============================================================================
// Color
// ============================================================================

/// Color of a navigational light
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LightColor {
    #[default]
    White,
    Red,
    Green,
    Yellow,
    Blue,
}

impl LightColor {
    /// Lower-case name, as used in config files and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            LightColor::White => "white",
            LightColor::Red => "red",
            LightColor::Green => "green",
            LightColor::Yellow => "yellow",
            LightColor::Blue => "blue",
        }
    }
}

impl std::fmt::Display for LightColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 8-bit RGB triple, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Color-to-RGB palette used by the Light.ini writer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Palette {
    #[serde(default = "default_white")]
    pub white: Rgb,
    #[serde(default = "default_red")]
    pub red: Rgb,
    #[serde(default = "default_green")]
    pub green: Rgb,
    #[serde(default = "default_yellow")]
    pub yellow: Rgb,
    #[serde(default = "default_blue")]
    pub blue: Rgb,
}

fn default_white() -> Rgb {
    Rgb(255, 255, 255)
}
fn default_red() -> Rgb {
    Rgb(255, 0, 0)
}
fn default_green() -> Rgb {
    Rgb(0, 255, 0)
}
fn default_yellow() -> Rgb {
    Rgb(255, 255, 0)
}
fn default_blue() -> Rgb {
    Rgb(0, 0, 255)
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white: default_white(),
            red: default_red(),
            green: default_green(),
            yellow: default_yellow(),
            blue: default_blue(),
        }
    }
}

impl Palette {
    /// Look up the RGB triple for a light color
    pub fn rgb(&self, color: LightColor) -> Rgb {
        match color {
            LightColor::White => self.white,
            LightColor::Red => self.red,
            LightColor::Green => self.green,
            LightColor::Yellow => self.yellow,
            LightColor::Blue => self.blue,
        }
    }
}

// ============================================================================
// Characteristic Class
// ============================================================================

/// Light rhythm class parsed from the characteristic abbreviation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CharacteristicClass {
    /// Fixed, steady light
    #[default]
    Fix,
    /// Flashing
    Fl,
    /// Long flash (2 s or more lit)
    Lfl,
    /// Fixed and flashing
    Ffl,
    /// Isophase: equal light and dark
    Iso,
    /// Occulting: lit longer than dark
    Oc,
    /// Quick flashing
    Q,
    /// Very quick flashing
    Vq,
}

impl CharacteristicClass {
    /// Light List abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            CharacteristicClass::Fix => "FIX",
            CharacteristicClass::Fl => "FL",
            CharacteristicClass::Lfl => "LFL",
            CharacteristicClass::Ffl => "FFL",
            CharacteristicClass::Iso => "ISO",
            CharacteristicClass::Oc => "OC",
            CharacteristicClass::Q => "Q",
            CharacteristicClass::Vq => "VQ",
        }
    }
}

impl std::fmt::Display for CharacteristicClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Flash Pattern
// ============================================================================

/// One 0.25 s slot of a flash pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tick {
    Lit,
    Dark,
}

impl Tick {
    /// Bridge Command sequence character
    pub fn as_char(self) -> char {
        match self {
            Tick::Lit => 'L',
            Tick::Dark => 'D',
        }
    }
}

/// Discretized on/off rhythm for one light period.
///
/// Serializes as the Bridge Command `L`/`D` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FlashPattern(Vec<Tick>);

impl FlashPattern {
    pub fn new(ticks: Vec<Tick>) -> Self {
        Self(ticks)
    }

    /// `lit` ticks followed by `dark` ticks
    pub fn lit_then_dark(lit: usize, dark: usize) -> Self {
        let mut ticks = Vec::with_capacity(lit + dark);
        ticks.extend(std::iter::repeat(Tick::Lit).take(lit));
        ticks.extend(std::iter::repeat(Tick::Dark).take(dark));
        Self(ticks)
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|t| **t == Tick::Lit).count()
    }

    pub fn dark_count(&self) -> usize {
        self.len() - self.lit_count()
    }

    /// Bridge Command `Sequence(i)` value, e.g. `LLDDDDDD`
    pub fn to_sequence_string(&self) -> String {
        self.0.iter().map(|t| t.as_char()).collect()
    }
}

impl std::fmt::Display for FlashPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sequence_string())
    }
}

impl Serialize for FlashPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_sequence_string())
    }
}

// ============================================================================
// Light Descriptor
// ============================================================================

/// Structured light description derived from one characteristic string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightDescriptor {
    pub color: LightColor,
    pub period_s: f64,
    pub range_nm: f64,
    pub height_m: f64,
    pub class: CharacteristicClass,
    pub pattern: FlashPattern,
}
