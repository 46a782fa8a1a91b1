//! Arena-backed owned document trees
//!
//! The alternate build path emits a conventional owned tree instead of an
//! archive. Child vectors, field vectors, and string bytes all come from a
//! caller-supplied [`bumpalo::Bump`] arena, so a whole batch of documents
//! is freed in one arena reset.

use crate::stream::Element;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use jarc_format::constants::MAX_COMPOSITE_CHILDREN;
use jarc_format::{JarcError, Result};

/// An owned JSON document node allocated in an arena.
#[derive(Debug)]
pub enum HeapNode<'a> {
    /// Ordered child nodes.
    Array(BumpVec<'a, HeapNode<'a>>),
    /// Boolean.
    Bool(bool),
    /// 64-bit float.
    Float(f64),
    /// Negative integer.
    NegInt(i64),
    /// Null.
    Null,
    /// Key-sorted fields (sorted on build when the source was not).
    Object(BumpVec<'a, HeapField<'a>>),
    /// Non-negative integer.
    PosInt(u64),
    /// UTF-8 string.
    String(&'a str),
}

/// One object field of a heap tree.
#[derive(Debug)]
pub struct HeapField<'a> {
    /// Property string.
    pub property: &'a str,
    /// Field value.
    pub value: HeapNode<'a>,
}

/// Stable in-place reorder of object fields by property byte order.
/// Duplicate properties keep their source order.
pub fn sort_heap_fields(fields: &mut [HeapField<'_>]) {
    fields.sort_by(|a, b| a.property.as_bytes().cmp(b.property.as_bytes()));
}

/// Recursively build a heap node for `element`.
pub(crate) fn build_node<'a>(alloc: &'a Bump, element: &Element) -> Result<HeapNode<'a>> {
    match element {
        Element::Array(items) => {
            if items.len() > MAX_COMPOSITE_CHILDREN {
                return Err(JarcError::CompositeTooLarge { count: items.len() });
            }
            let mut out = BumpVec::with_capacity_in(items.len(), alloc);
            for item in items {
                out.push(build_node(alloc, item)?);
            }
            Ok(HeapNode::Array(out))
        }
        Element::Object(fields) => {
            if fields.len() > MAX_COMPOSITE_CHILDREN {
                return Err(JarcError::CompositeTooLarge { count: fields.len() });
            }
            let mut out = BumpVec::with_capacity_in(fields.len(), alloc);
            let mut unsorted = 0u32;
            let mut last_key: &[u8] = b"";
            for (key, value) in fields {
                if key.as_bytes() <= last_key {
                    unsorted += 1;
                }
                last_key = key.as_bytes();
                out.push(HeapField {
                    property: alloc.alloc_str(key),
                    value: build_node(alloc, value)?,
                });
            }
            if unsorted != 0 {
                sort_heap_fields(&mut out);
            }
            Ok(HeapNode::Object(out))
        }
        Element::I64(val) => Ok(if *val < 0 {
            HeapNode::NegInt(*val)
        } else {
            HeapNode::PosInt(*val as u64)
        }),
        Element::U64(val) => Ok(HeapNode::PosInt(*val)),
        Element::F64(val) => Ok(HeapNode::Float(*val)),
        Element::String(val) => Ok(HeapNode::String(alloc.alloc_str(val))),
        Element::Bool(val) => Ok(HeapNode::Bool(*val)),
        Element::Null => Ok(HeapNode::Null),
    }
}

impl HeapNode<'_> {
    /// Total node count of this subtree, including itself.
    pub fn tape_length(&self) -> u32 {
        match self {
            HeapNode::Array(items) => 1 + items.iter().map(Self::tape_length).sum::<u32>(),
            HeapNode::Object(fields) => {
                1 + fields.iter().map(|f| f.value.tape_length()).sum::<u32>()
            }
            _ => 1,
        }
    }
}
