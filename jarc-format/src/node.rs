//! Archived node and field records
//!
//! Nodes are 16 bytes (two words); object fields prepend an 8-byte property
//! descriptor. Composite nodes and indirect strings are built holding
//! absolute archive positions and rewritten to negative relative offsets
//! when their containing region is placed: composites store the plain
//! position (they always resolve), strings store its one's complement so an
//! unresolved descriptor is distinguishable from an inline one.

use crate::strings;
use crate::types::NodeTag;
use crate::word::Word;

/// A 16-byte archive node record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchivedNode {
    /// Tag word: tag byte, tag-dependent bytes, and the high `u32`
    /// (tape length for composites, descriptor data for strings).
    pub w1: Word,
    /// Value word: immediate bits, or `(offset, count)` halves.
    pub w2: Word,
}

impl ArchivedNode {
    /// Null node.
    pub fn null() -> Self {
        Self { w1: Word(NodeTag::Null as u64), w2: Word(0) }
    }

    /// Boolean node; the value lives in byte 1.
    pub fn boolean(val: bool) -> Self {
        Self { w1: Word(NodeTag::Bool as u64 | (val as u64) << 8), w2: Word(0) }
    }

    /// Float node.
    pub fn float(val: f64) -> Self {
        Self { w1: Word(NodeTag::Float as u64), w2: Word::from_f64(val) }
    }

    /// Negative integer node.
    pub fn neg_int(val: i64) -> Self {
        Self { w1: Word(NodeTag::NegInt as u64), w2: Word::from_i64(val) }
    }

    /// Non-negative integer node.
    pub fn pos_int(val: u64) -> Self {
        Self { w1: Word(NodeTag::PosInt as u64), w2: Word(val) }
    }

    /// Inline string node: the descriptor word spans bytes 4..12 and the
    /// remaining high half is `0xFF` fill.
    pub fn inline_string(s: &[u8]) -> Self {
        let desc = strings::inline_word(s);
        Self {
            w1: Word::from_parts(NodeTag::String as u32, desc.lo()),
            w2: Word::from_parts(desc.hi(), u32::MAX),
        }
    }

    /// Indirect string node referencing `len` raw bytes at absolute archive
    /// `position`. The position is stored complemented until resolution.
    pub fn indirect_string(len: u32, position: u32) -> Self {
        Self {
            w1: Word::from_parts(NodeTag::String as u32, strings::encode_length(len)),
            w2: Word::from_parts(!position, 0),
        }
    }

    /// Array node over a child region at absolute archive `position`.
    pub fn array(position: u32, children: u32, tape_length: u32) -> Self {
        Self {
            w1: Word::from_parts(NodeTag::Array as u32, tape_length),
            w2: Word::from_parts(position, children),
        }
    }

    /// Object node over a field region at absolute archive `position`.
    pub fn object(position: u32, children: u32, tape_length: u32) -> Self {
        Self {
            w1: Word::from_parts(NodeTag::Object as u32, tape_length),
            w2: Word::from_parts(position, children),
        }
    }

    /// Raw tag byte.
    #[inline]
    pub fn tag_byte(&self) -> u8 {
        self.w1.0 as u8
    }

    /// Typed tag.
    pub fn tag(&self) -> Result<NodeTag, crate::error::JarcError> {
        NodeTag::from_u8(self.tag_byte())
    }

    /// Archive node count of this subtree, including itself.
    pub fn tape_length(&self) -> u32 {
        match self.tag_byte() {
            t if t == NodeTag::Array as u8 || t == NodeTag::Object as u8 => self.w1.hi(),
            _ => 1,
        }
    }

    /// Rewrite held absolute positions into negative relative offsets, given
    /// this node's placement `position`. Offsets are relative to the child
    /// pointer field for composites (+8) and to the descriptor word start
    /// for strings (+4); scalars are untouched.
    pub fn resolve_at(&mut self, position: u32) {
        match self.tag_byte() {
            t if t == NodeTag::Array as u8 || t == NodeTag::Object as u8 => {
                let target = self.w2.lo();
                self.w2.set_lo(target.wrapping_sub(position + 8));
            }
            t if t == NodeTag::String as u8 => {
                let first = (self.w1.0 >> 32) as u8;
                if strings::is_indirect(first) {
                    let target = !self.w2.lo();
                    self.w2.set_lo(target.wrapping_sub(position + 4));
                }
            }
            _ => {}
        }
    }

    /// Little-endian byte serialization.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.w1.to_le_bytes());
        bytes[8..].copy_from_slice(&self.w2.to_le_bytes());
        bytes
    }

    /// Little-endian byte deserialization.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut w1 = [0u8; 8];
        let mut w2 = [0u8; 8];
        w1.copy_from_slice(&bytes[..8]);
        w2.copy_from_slice(&bytes[8..]);
        Self { w1: Word::from_le_bytes(w1), w2: Word::from_le_bytes(w2) }
    }
}

/// A 24-byte object field record: property descriptor word plus node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchivedField {
    /// Property string descriptor. Indirect descriptors keep the encoded
    /// length in the low half and the (complemented) position in the high
    /// half, resolved relative to the field base.
    pub property: Word,
    /// The field's value node.
    pub node: ArchivedNode,
}

impl ArchivedField {
    /// Resolve the property descriptor and the value node, given this
    /// field's placement `position`.
    pub fn resolve_at(&mut self, position: u32) {
        if strings::is_indirect(self.property.0 as u8) {
            let target = !self.property.hi();
            self.property.set_hi(target.wrapping_sub(position));
        }
        self.node.resolve_at(position + 8);
    }

    /// Little-endian byte serialization.
    pub fn to_bytes(&self) -> [u8; 24] {
        let mut bytes = [0u8; 24];
        bytes[..8].copy_from_slice(&self.property.to_le_bytes());
        bytes[8..].copy_from_slice(&self.node.to_bytes());
        bytes
    }
}
