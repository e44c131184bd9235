//! Field extraction helpers shared by the per-collection parsers. All of
//! them treat a missing or mistyped field as absent; defaulting is the
//! caller's decision.

use glam::Mat4;
use serde_json::Value;

use crate::structs::Color;

pub fn get_str<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key)?.as_str()
}

pub fn get_f32(v: &Value, key: &str) -> Option<f32> {
    Some(v.get(key)?.as_f64()? as f32)
}

pub fn get_i64(v: &Value, key: &str) -> Option<i64> {
    v.get(key)?.as_i64()
}

pub fn get_u32(v: &Value, key: &str) -> Option<u32> {
    Some(v.get(key)?.as_u64()? as u32)
}

pub fn get_bool(v: &Value, key: &str) -> Option<bool> {
    v.get(key)?.as_bool()
}

pub fn get_f32_slice(v: &Value, key: &str) -> Option<Vec<f32>> {
    let arr = v.get(key)?.as_array()?;
    Some(arr.iter().filter_map(Value::as_f64).map(|x| x as f32).collect())
}

pub fn as_f32_vec(v: &Value) -> Option<Vec<f32>> {
    let arr = v.as_array()?;
    Some(arr.iter().filter_map(Value::as_f64).map(|x| x as f32).collect())
}

/// Flat 16-element column-major matrix field.
pub fn get_mat4(v: &Value, key: &str) -> Option<Mat4> {
    let flat = get_f32_slice(v, key)?;
    if flat.len() != 16 {
        return None;
    }
    let mut cols = [0.0f32; 16];
    cols.copy_from_slice(&flat);
    Some(Mat4::from_cols_array(&cols))
}

/// Color field stored either as a packed `0xRRGGBB` integer or as an
/// `[r, g, b]` float triple.
pub fn get_color(v: &Value, key: &str) -> Option<Color> {
    match v.get(key)? {
        Value::Number(n) => Some(Color::from_hex(n.as_u64()? as u32)),
        Value::Array(arr) if arr.len() == 3 => {
            let r = arr[0].as_f64()? as f32;
            let g = arr[1].as_f64()? as f32;
            let b = arr[2].as_f64()? as f32;
            Some(Color::new(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_forms() {
        let v = json!({ "a": 0xff0000u32, "b": [0.0, 0.5, 1.0] });
        assert_eq!(get_color(&v, "a"), Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(get_color(&v, "b"), Some(Color::new(0.0, 0.5, 1.0)));
        assert_eq!(get_color(&v, "c"), None);
    }

    #[test]
    fn test_mat4_requires_sixteen() {
        let v = json!({ "m": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 5.0, 6.0, 7.0, 1] });
        let m = get_mat4(&v, "m").unwrap();
        assert_eq!(m.w_axis.x, 5.0);
        let short = json!({ "m": [1, 2, 3] });
        assert!(get_mat4(&short, "m").is_none());
    }
}
