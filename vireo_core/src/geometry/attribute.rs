use std::sync::Arc;

/// Element kind of a typed attribute buffer, keyed by the array-type tag
/// a document declares (`"Float32Array"`, `"Uint16Array"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
}

impl ElementType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Int8Array" => Some(Self::Int8),
            "Uint8Array" => Some(Self::Uint8),
            "Uint8ClampedArray" => Some(Self::Uint8Clamped),
            "Int16Array" => Some(Self::Int16),
            "Uint16Array" => Some(Self::Uint16),
            "Int32Array" => Some(Self::Int32),
            "Uint32Array" => Some(Self::Uint32),
            "Float32Array" => Some(Self::Float32),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
        }
    }

    /// Element size in bytes.
    pub fn byte_size(&self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
        }
    }
}

/// Typed numeric storage backing an attribute or interleaved buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
}

impl TypedArray {
    /// Build from a plain JSON number sequence, converting each value to
    /// the declared element kind.
    pub fn from_numbers(ty: ElementType, values: &[f64]) -> Self {
        match ty {
            ElementType::Int8 => Self::Int8(values.iter().map(|v| *v as i8).collect()),
            ElementType::Uint8 => Self::Uint8(values.iter().map(|v| *v as u8).collect()),
            ElementType::Uint8Clamped => {
                Self::Uint8Clamped(values.iter().map(|v| v.clamp(0.0, 255.0) as u8).collect())
            }
            ElementType::Int16 => Self::Int16(values.iter().map(|v| *v as i16).collect()),
            ElementType::Uint16 => Self::Uint16(values.iter().map(|v| *v as u16).collect()),
            ElementType::Int32 => Self::Int32(values.iter().map(|v| *v as i32).collect()),
            ElementType::Uint32 => Self::Uint32(values.iter().map(|v| *v as u32).collect()),
            ElementType::Float32 => Self::Float32(values.iter().map(|v| *v as f32).collect()),
        }
    }

    /// Reinterpret packed little-endian 32-bit words as the declared
    /// element kind. This is a bit-level view change, not a numeric cast:
    /// interleaved backing stores ship their raw words regardless of the
    /// logical element type.
    pub fn from_packed_words(ty: ElementType, words: &[u32]) -> Self {
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for w in words {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        Self::from_le_bytes(ty, &bytes)
    }

    fn from_le_bytes(ty: ElementType, bytes: &[u8]) -> Self {
        match ty {
            ElementType::Int8 => Self::Int8(bytes.iter().map(|b| *b as i8).collect()),
            ElementType::Uint8 => Self::Uint8(bytes.to_vec()),
            ElementType::Uint8Clamped => Self::Uint8Clamped(bytes.to_vec()),
            ElementType::Int16 => Self::Int16(
                bytes
                    .chunks_exact(2)
                    .map(|c| i16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            ElementType::Uint16 => Self::Uint16(
                bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            ElementType::Int32 => Self::Int32(
                bytes
                    .chunks_exact(4)
                    .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            ElementType::Uint32 => Self::Uint32(
                bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            ElementType::Float32 => Self::Float32(
                bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
        }
    }

    /// Pack the storage back into little-endian 32-bit words, padding the
    /// tail with zero bytes. Inverse of [`TypedArray::from_packed_words`].
    pub fn to_packed_words(&self) -> Vec<u32> {
        let mut bytes = match self {
            Self::Int8(v) => v.iter().map(|x| *x as u8).collect::<Vec<u8>>(),
            Self::Uint8(v) | Self::Uint8Clamped(v) => v.clone(),
            Self::Int16(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Self::Uint16(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Self::Int32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Self::Uint32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Self::Float32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
        };
        while bytes.len() % 4 != 0 {
            bytes.push(0);
        }
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Int8(_) => ElementType::Int8,
            Self::Uint8(_) => ElementType::Uint8,
            Self::Uint8Clamped(_) => ElementType::Uint8Clamped,
            Self::Int16(_) => ElementType::Int16,
            Self::Uint16(_) => ElementType::Uint16,
            Self::Int32(_) => ElementType::Int32,
            Self::Uint32(_) => ElementType::Uint32,
            Self::Float32(_) => ElementType::Float32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int8(v) => v.len(),
            Self::Uint8(v) | Self::Uint8Clamped(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Uint16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one element, widened to f64.
    pub fn get(&self, i: usize) -> f64 {
        match self {
            Self::Int8(v) => v[i] as f64,
            Self::Uint8(v) | Self::Uint8Clamped(v) => v[i] as f64,
            Self::Int16(v) => v[i] as f64,
            Self::Uint16(v) => v[i] as f64,
            Self::Int32(v) => v[i] as f64,
            Self::Uint32(v) => v[i] as f64,
            Self::Float32(v) => v[i] as f64,
        }
    }

    /// All elements widened to f64, used when serializing back to JSON.
    pub fn to_numbers(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

/// Plain (non-interleaved) attribute buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferAttribute {
    pub array: TypedArray,
    pub item_size: usize,
    pub normalized: bool,
    /// Instanced variant: how many meshes share one logical element.
    pub mesh_per_attribute: Option<u32>,
}

impl BufferAttribute {
    pub fn new(array: TypedArray, item_size: usize, normalized: bool) -> Self {
        Self {
            array,
            item_size,
            normalized,
            mesh_per_attribute: None,
        }
    }

    /// Number of logical elements (buffer length / item size).
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.array.len() / self.item_size
        }
    }

    /// Read component `c` of logical element `i`.
    pub fn component(&self, i: usize, c: usize) -> f64 {
        self.array.get(i * self.item_size + c)
    }
}

/// One shared flat buffer backing several logical attributes at different
/// offsets and a common stride.
#[derive(Clone, Debug, PartialEq)]
pub struct InterleavedBuffer {
    pub array: TypedArray,
    pub stride: usize,
    /// Present on instanced interleaved buffers.
    pub mesh_per_attribute: Option<u32>,
}

impl InterleavedBuffer {
    pub fn count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.array.len() / self.stride
        }
    }
}

/// Attribute view into a shared [`InterleavedBuffer`].
///
/// Attributes that declare the same backing buffer hold the same `Arc`;
/// aliasing is observable through [`Arc::ptr_eq`].
#[derive(Clone, Debug)]
pub struct InterleavedBufferAttribute {
    pub data: Arc<InterleavedBuffer>,
    pub item_size: usize,
    pub offset: usize,
    pub normalized: bool,
}

impl InterleavedBufferAttribute {
    pub fn count(&self) -> usize {
        self.data.count()
    }

    pub fn component(&self, i: usize, c: usize) -> f64 {
        self.data.array.get(i * self.data.stride + self.offset + c)
    }
}

/// A reconstructed geometry attribute, either self-contained or a view
/// into a shared interleaved buffer.
#[derive(Clone, Debug)]
pub enum Attribute {
    Buffer(BufferAttribute),
    Interleaved(InterleavedBufferAttribute),
}

impl Attribute {
    pub fn item_size(&self) -> usize {
        match self {
            Attribute::Buffer(a) => a.item_size,
            Attribute::Interleaved(a) => a.item_size,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Attribute::Buffer(a) => a.count(),
            Attribute::Interleaved(a) => a.count(),
        }
    }

    pub fn normalized(&self) -> bool {
        match self {
            Attribute::Buffer(a) => a.normalized,
            Attribute::Interleaved(a) => a.normalized,
        }
    }

    /// Read component `c` of logical element `i`, regardless of layout.
    pub fn component(&self, i: usize, c: usize) -> f64 {
        match self {
            Attribute::Buffer(a) => a.component(i, c),
            Attribute::Interleaved(a) => a.component(i, c),
        }
    }

    pub fn as_buffer(&self) -> Option<&BufferAttribute> {
        match self {
            Attribute::Buffer(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_interleaved(&self) -> Option<&InterleavedBufferAttribute> {
        match self {
            Attribute::Interleaved(a) => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_word_reinterpretation_f32() {
        let source = [1.0f32, -2.5, 0.0, 42.0];
        let words: Vec<u32> = source.iter().map(|f| f.to_bits()).collect();
        let arr = TypedArray::from_packed_words(ElementType::Float32, &words);
        assert_eq!(arr, TypedArray::Float32(source.to_vec()));
    }

    #[test]
    fn test_packed_word_reinterpretation_u16() {
        // One u32 word holds two u16 elements, low half first.
        let words = vec![0x0002_0001u32, 0x0004_0003];
        let arr = TypedArray::from_packed_words(ElementType::Uint16, &words);
        assert_eq!(arr, TypedArray::Uint16(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_packed_words_roundtrip() {
        let arr = TypedArray::Float32(vec![0.5, 1.5, -3.25]);
        let words = arr.to_packed_words();
        let back = TypedArray::from_packed_words(ElementType::Float32, &words);
        assert_eq!(arr, back);
    }

    #[test]
    fn test_attribute_count_derivation() {
        let attr = BufferAttribute::new(
            TypedArray::Float32(vec![0.0; 12]),
            3,
            false,
        );
        assert_eq!(attr.count(), 4);
    }

    #[test]
    fn test_interleaved_component_access() {
        // stride 5: position (3) + uv (2)
        let buffer = Arc::new(InterleavedBuffer {
            array: TypedArray::Float32(vec![
                0.0, 0.0, 0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 1.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, 1.0,
            ]),
            stride: 5,
            mesh_per_attribute: None,
        });
        let position = InterleavedBufferAttribute {
            data: buffer.clone(),
            item_size: 3,
            offset: 0,
            normalized: false,
        };
        let uv = InterleavedBufferAttribute {
            data: buffer,
            item_size: 2,
            offset: 3,
            normalized: false,
        };
        assert_eq!(position.count(), 3);
        assert_eq!(position.component(1, 0), 1.0);
        assert_eq!(uv.component(2, 1), 1.0);
        assert!(Arc::ptr_eq(&position.data, &uv.data));
    }
}
