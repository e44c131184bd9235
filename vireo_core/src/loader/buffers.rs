use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::geometry::{
    Attribute, BufferAttribute, ElementType, InterleavedBuffer, InterleavedBufferAttribute,
    TypedArray,
};
use crate::loader::diagnostics::DiagnosticKind;
use crate::loader::json;

/// Attribute-level failure. Aborts reconstruction of the owning geometry
/// only; the caller downgrades it to a diagnostic and moves on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// Unknown element-type tag, named for the diagnostic.
    #[error("unsupported array type {0:?}")]
    UnsupportedType(String),
    /// Dangling reference into the `buffers` collections.
    #[error("unresolved buffer {0:?}")]
    UnresolvedBuffer(String),
    #[error("{0}")]
    Malformed(String),
}

impl AttributeError {
    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            Self::UnsupportedType(_) => DiagnosticKind::UnsupportedAttributeType,
            Self::UnresolvedBuffer(_) => DiagnosticKind::UnresolvedBuffer,
            Self::Malformed(_) => DiagnosticKind::MalformedEntry,
        }
    }
}

/// Document-scoped store for raw buffer backing storage.
///
/// The `buffers.array` collection holds flat arrays of packed 32-bit
/// words; `buffers.interleaved` holds the definitions that reinterpret
/// them as typed strided buffers. Each interleaved buffer is materialized
/// once per uuid and cached for the whole parse, so attributes that
/// declare the same `data` key observe identical backing-object identity.
pub struct BufferStore<'a> {
    arrays: Option<&'a Map<String, Value>>,
    interleaved: Option<&'a Map<String, Value>>,
    cache: HashMap<String, Arc<InterleavedBuffer>>,
}

impl<'a> BufferStore<'a> {
    pub fn new(doc: &'a Value) -> Self {
        let buffers = doc.get("buffers");
        let section = |key: &str| {
            buffers
                .and_then(|b| b.get(key))
                .and_then(Value::as_object)
        };
        Self {
            arrays: section("array"),
            interleaved: section("interleaved"),
            cache: HashMap::new(),
        }
    }

    /// Parses one attribute definition, plain or interleaved.
    pub fn parse_attribute(&mut self, def: &Value) -> Result<Attribute, AttributeError> {
        let is_interleaved = json::get_bool(def, "isInterleavedBufferAttribute") == Some(true)
            || def.get("data").map(Value::is_string) == Some(true);
        if is_interleaved {
            self.parse_interleaved_attribute(def).map(Attribute::Interleaved)
        } else {
            self.parse_buffer_attribute(def).map(Attribute::Buffer)
        }
    }

    /// Parses a plain attribute definition. Used directly for index
    /// buffers and instancing attributes, which are never interleaved.
    pub fn parse_buffer_attribute(&mut self, def: &Value) -> Result<BufferAttribute, AttributeError> {
        let tag = json::get_str(def, "type")
            .ok_or_else(|| AttributeError::Malformed("attribute has no type tag".into()))?;
        let ty = ElementType::from_tag(tag)
            .ok_or_else(|| AttributeError::UnsupportedType(tag.to_string()))?;
        let values: Vec<f64> = def
            .get("array")
            .and_then(Value::as_array)
            .ok_or_else(|| AttributeError::Malformed("attribute has no array".into()))?
            .iter()
            .filter_map(Value::as_f64)
            .collect();
        let item_size = json::get_u32(def, "itemSize")
            .ok_or_else(|| AttributeError::Malformed("attribute has no itemSize".into()))?
            as usize;
        let mut attr = BufferAttribute::new(
            TypedArray::from_numbers(ty, &values),
            item_size,
            json::get_bool(def, "normalized").unwrap_or(false),
        );
        if json::get_bool(def, "isInstancedBufferAttribute") == Some(true) {
            attr.mesh_per_attribute = Some(json::get_u32(def, "meshPerAttribute").unwrap_or(1));
        }
        Ok(attr)
    }

    fn parse_interleaved_attribute(
        &mut self,
        def: &Value,
    ) -> Result<InterleavedBufferAttribute, AttributeError> {
        let data_uuid = json::get_str(def, "data")
            .ok_or_else(|| AttributeError::Malformed("interleaved attribute has no data key".into()))?;
        let data = self.interleaved_buffer(data_uuid)?;
        let item_size = json::get_u32(def, "itemSize")
            .ok_or_else(|| AttributeError::Malformed("attribute has no itemSize".into()))?
            as usize;
        Ok(InterleavedBufferAttribute {
            data,
            item_size,
            offset: json::get_u32(def, "offset").unwrap_or(0) as usize,
            normalized: json::get_bool(def, "normalized").unwrap_or(false),
        })
    }

    /// Materializes (or returns the cached) interleaved buffer for a
    /// `data` uuid.
    fn interleaved_buffer(&mut self, uuid: &str) -> Result<Arc<InterleavedBuffer>, AttributeError> {
        if let Some(buffer) = self.cache.get(uuid) {
            return Ok(buffer.clone());
        }
        let def = self
            .interleaved
            .and_then(|m| m.get(uuid))
            .ok_or_else(|| AttributeError::UnresolvedBuffer(uuid.to_string()))?;
        let tag = json::get_str(def, "type")
            .ok_or_else(|| AttributeError::Malformed("interleaved buffer has no type tag".into()))?;
        let ty = ElementType::from_tag(tag)
            .ok_or_else(|| AttributeError::UnsupportedType(tag.to_string()))?;
        let buffer_uuid = json::get_str(def, "buffer")
            .ok_or_else(|| AttributeError::Malformed("interleaved buffer has no backing uuid".into()))?;
        let words: Vec<u32> = self
            .arrays
            .and_then(|m| m.get(buffer_uuid))
            .and_then(Value::as_array)
            .ok_or_else(|| AttributeError::UnresolvedBuffer(buffer_uuid.to_string()))?
            .iter()
            .filter_map(Value::as_u64)
            .map(|w| w as u32)
            .collect();
        let stride = json::get_u32(def, "stride")
            .ok_or_else(|| AttributeError::Malformed("interleaved buffer has no stride".into()))?
            as usize;
        let mesh_per_attribute = if json::get_bool(def, "isInstancedInterleavedBuffer") == Some(true)
        {
            Some(json::get_u32(def, "meshPerAttribute").unwrap_or(1))
        } else {
            None
        };
        let buffer = Arc::new(InterleavedBuffer {
            // packed words carry raw bytes, so this is a bit-level
            // reinterpretation rather than a numeric cast
            array: TypedArray::from_packed_words(ty, &words),
            stride,
            mesh_per_attribute,
        });
        self.cache.insert(uuid.to_string(), buffer.clone());
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_interleaved() -> Value {
        let words: Vec<u32> = [
            1.0f32, 2.0, 3.0, 0.0, 0.0, //
            4.0, 5.0, 6.0, 1.0, 1.0,
        ]
        .iter()
        .map(|f| f.to_bits())
        .collect();
        json!({
            "buffers": {
                "array": { "ab-1": words },
                "interleaved": {
                    "ib-1": { "buffer": "ab-1", "type": "Float32Array", "stride": 5 }
                }
            }
        })
    }

    #[test]
    fn test_plain_attribute() {
        let doc = json!({});
        let mut store = BufferStore::new(&doc);
        let def = json!({
            "itemSize": 3,
            "type": "Float32Array",
            "array": [0.0, 0.0, 0.0, 1.0, 2.0, 3.0],
            "normalized": false
        });
        let attr = store.parse_attribute(&def).unwrap();
        assert_eq!(attr.count(), 2);
        assert_eq!(attr.component(1, 2), 3.0);
    }

    #[test]
    fn test_unknown_element_type() {
        let doc = json!({});
        let mut store = BufferStore::new(&doc);
        let def = json!({ "itemSize": 1, "type": "Float64Array", "array": [1.0] });
        match store.parse_attribute(&def) {
            Err(AttributeError::UnsupportedType(tag)) => assert_eq!(tag, "Float64Array"),
            other => panic!("expected unsupported type, got {other:?}"),
        }
    }

    #[test]
    fn test_interleaved_attributes_share_backing() {
        let doc = doc_with_interleaved();
        let mut store = BufferStore::new(&doc);
        let position = store
            .parse_attribute(&json!({
                "isInterleavedBufferAttribute": true,
                "itemSize": 3,
                "data": "ib-1",
                "offset": 0,
                "normalized": false
            }))
            .unwrap();
        let uv = store
            .parse_attribute(&json!({
                "isInterleavedBufferAttribute": true,
                "itemSize": 2,
                "data": "ib-1",
                "offset": 3,
                "normalized": false
            }))
            .unwrap();

        let position = position.as_interleaved().unwrap();
        let uv = uv.as_interleaved().unwrap();
        assert!(Arc::ptr_eq(&position.data, &uv.data));
        assert_eq!(position.count(), 2);
        assert_eq!(position.component(1, 0), 4.0);
        assert_eq!(uv.component(1, 1), 1.0);
    }

    #[test]
    fn test_missing_interleaved_definition() {
        let doc = json!({});
        let mut store = BufferStore::new(&doc);
        let def = json!({ "itemSize": 3, "data": "nope", "offset": 0 });
        match store.parse_attribute(&def) {
            Err(err @ AttributeError::UnresolvedBuffer(_)) => {
                assert_eq!(err.diagnostic_kind(), DiagnosticKind::UnresolvedBuffer);
            }
            other => panic!("expected unresolved buffer, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_backing_array() {
        let doc = json!({
            "buffers": {
                "interleaved": {
                    "ib-1": { "buffer": "gone", "type": "Float32Array", "stride": 4 }
                }
            }
        });
        let mut store = BufferStore::new(&doc);
        let def = json!({ "itemSize": 3, "data": "ib-1", "offset": 0 });
        assert!(matches!(
            store.parse_attribute(&def),
            Err(AttributeError::UnresolvedBuffer(uuid)) if uuid == "gone"
        ));
    }
}
