//! Node tag enumeration

/// Node tag codes stored in the low byte of a node's first word.
///
/// `0x02` is reserved and never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeTag {
    /// Ordered sequence of child nodes
    Array = 0x00,
    /// Boolean; byte 1 of the node holds 0 or 1
    Bool = 0x01,
    /// 64-bit float
    Float = 0x03,
    /// Negative signed integer
    NegInt = 0x04,
    /// Present but null
    Null = 0x05,
    /// Key-sorted sequence of child fields
    Object = 0x06,
    /// Non-negative integer
    PosInt = 0x07,
    /// UTF-8 string, inline or indirect
    String = 0x08,
}

impl NodeTag {
    /// Convert from a raw tag byte.
    pub fn from_u8(val: u8) -> Result<Self, crate::error::JarcError> {
        match val {
            0x00 => Ok(NodeTag::Array),
            0x01 => Ok(NodeTag::Bool),
            0x03 => Ok(NodeTag::Float),
            0x04 => Ok(NodeTag::NegInt),
            0x05 => Ok(NodeTag::Null),
            0x06 => Ok(NodeTag::Object),
            0x07 => Ok(NodeTag::PosInt),
            0x08 => Ok(NodeTag::String),
            other => Err(crate::error::JarcError::ReservedTag(other)),
        }
    }
}
