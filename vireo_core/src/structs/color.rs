use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Linear RGB color with components in `0.0..=1.0`.
///
/// Documents store colors as packed `0xRRGGBB` integers; a float triplet
/// is also accepted on load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_hex(&self) -> u32 {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u32;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u32;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u32;
        (r << 16) | (g << 8) | b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Number(n) => {
                let hex = n
                    .as_u64()
                    .ok_or_else(|| D::Error::custom("color integer must be non-negative"))?;
                Ok(Color::from_hex(hex as u32))
            }
            Value::Array(_) => {
                let arr: [f32; 3] =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(Color::new(arr[0], arr[1], arr[2]))
            }
            _ => Err(D::Error::custom(
                "color must be a packed integer or an [r, g, b] array",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::from_hex(0xff0000);
        assert_eq!(c, Color::new(1.0, 0.0, 0.0));
        assert_eq!(c.to_hex(), 0xff0000);
        assert_eq!(Color::from_hex(0x4080c0).to_hex(), 0x4080c0);
    }

    #[test]
    fn test_deserialize_forms() {
        let c: Color = serde_json::from_value(serde_json::json!(0x00ff00)).unwrap();
        assert_eq!(c, Color::new(0.0, 1.0, 0.0));
        let c: Color = serde_json::from_value(serde_json::json!([0.5, 0.25, 1.0])).unwrap();
        assert_eq!(c, Color::new(0.5, 0.25, 1.0));
    }
}
