use serde::{Deserialize, Serialize};

/// The three fixed visual variants a product ships in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Yellow,
    Rose,
    White,
}

impl Variant {
    /// Selector-row display order (yellow, white, rose).
    pub const DISPLAY_ORDER: [Variant; 3] = [Variant::Yellow, Variant::White, Variant::Rose];

    pub fn label(self) -> &'static str {
        match self {
            Variant::Yellow => "Yellow Gold",
            Variant::Rose => "Rose Gold",
            Variant::White => "White Gold",
        }
    }

    /// Swatch color for the selector control.
    pub fn swatch_rgb(self) -> [u8; 3] {
        match self {
            Variant::Yellow => [0xE6, 0xCA, 0x97],
            Variant::Rose => [0xE1, 0xA4, 0xA9],
            Variant::White => [0xD9, 0xD9, 0xD9],
        }
    }
}

/// Image locators keyed by variant. A struct rather than a map so the wire
/// shape (exactly these three keys) is enforced at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantImages {
    pub yellow: String,
    pub rose: String,
    pub white: String,
}

impl VariantImages {
    pub fn locator(&self, variant: Variant) -> &str {
        match variant {
            Variant::Yellow => &self.yellow,
            Variant::Rose => &self.rose,
            Variant::White => &self.white,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    /// Normalized popularity in [0, 1].
    pub popularity_score: f64,
    pub weight: f64,
    pub price: f64,
    pub images: VariantImages,
}
