//! Depth-first node emission
//!
//! Values are emitted children before parent: variable-length payloads and
//! child regions land in the archive first, and the parent node is built
//! last, referring back to them. While a composite's children sit in
//! scratch, their descriptors hold absolute positions; placement rewrites
//! each into a negative offset relative to the descriptor's own location.

use crate::buffer::ArchiveBuf;
use crate::scratch::ScratchPool;
use crate::stream::Element;
use jarc_format::constants::{
    FIELD_BYTES, MAX_COMPOSITE_CHILDREN, MAX_INLINE_STRING, MAX_STRING_BYTES, NODE_BYTES,
};
use jarc_format::{strings, ArchivedField, ArchivedNode, JarcError, Result, Word};

/// Transcode one element, returning its node and tape length. The node is
/// unplaced: composite and indirect-string positions are still absolute.
pub(crate) fn transcode_node(
    buf: &mut ArchiveBuf<'_>,
    pool: &mut ScratchPool,
    element: &Element,
) -> Result<(ArchivedNode, u32)> {
    match element {
        Element::Array(items) => transcode_array(buf, pool, items),
        Element::Object(fields) => transcode_object(buf, pool, fields),
        Element::I64(val) => {
            let node = if *val < 0 {
                ArchivedNode::neg_int(*val)
            } else {
                ArchivedNode::pos_int(*val as u64)
            };
            Ok((node, 1))
        }
        Element::U64(val) => Ok((ArchivedNode::pos_int(*val), 1)),
        Element::F64(val) => Ok((ArchivedNode::float(*val), 1)),
        Element::String(val) => Ok((string_node(buf, val)?, 1)),
        Element::Bool(val) => Ok((ArchivedNode::boolean(*val), 1)),
        Element::Null => Ok((ArchivedNode::null(), 1)),
    }
}

fn string_node(buf: &mut ArchiveBuf<'_>, val: &str) -> Result<ArchivedNode> {
    if val.len() <= MAX_INLINE_STRING {
        return Ok(ArchivedNode::inline_string(val.as_bytes()));
    }
    if val.len() > MAX_STRING_BYTES {
        return Err(JarcError::StringTooLarge { len: val.len() });
    }
    let position = buf.len() as u32;
    let node = ArchivedNode::indirect_string(val.len() as u32, position);
    buf.extend(val.as_bytes());
    Ok(node)
}

fn property_word(buf: &mut ArchiveBuf<'_>, key: &str) -> Result<Word> {
    if key.len() <= MAX_INLINE_STRING {
        return Ok(strings::inline_word(key.as_bytes()));
    }
    if key.len() > MAX_STRING_BYTES {
        return Err(JarcError::StringTooLarge { len: key.len() });
    }
    let position = buf.len() as u32;
    buf.extend(key.as_bytes());
    Ok(Word::from_parts(strings::encode_length(key.len() as u32), !position))
}

fn transcode_array(
    buf: &mut ArchiveBuf<'_>,
    pool: &mut ScratchPool,
    items: &[Element],
) -> Result<(ArchivedNode, u32)> {
    if items.len() > MAX_COMPOSITE_CHILDREN {
        return Err(JarcError::CompositeTooLarge { count: items.len() });
    }
    let mut scratch = pool.take_nodes();
    scratch.reserve(items.len());

    let mut tape = 0u32;
    let mut failed = None;
    for item in items {
        match transcode_node(buf, pool, item) {
            Ok((node, len)) => {
                scratch.push(node);
                tape += len;
            }
            Err(err) => {
                failed = Some(err);
                break;
            }
        }
    }

    let placed = match failed {
        None => Ok(place_array(buf, &mut scratch, tape)),
        Some(err) => Err(err),
    };
    pool.put_nodes(scratch);
    Ok((placed?, tape + 1))
}

fn transcode_object(
    buf: &mut ArchiveBuf<'_>,
    pool: &mut ScratchPool,
    fields: &[(String, Element)],
) -> Result<(ArchivedNode, u32)> {
    if fields.len() > MAX_COMPOSITE_CHILDREN {
        return Err(JarcError::CompositeTooLarge { count: fields.len() });
    }
    let mut scratch = pool.take_fields();
    scratch.reserve(fields.len());

    // Track whether field properties arrive already sorted.
    let mut unsorted = 0u32;
    let mut last_key: &[u8] = b"";
    let mut tape = 0u32;
    let mut failed = None;
    for (key, value) in fields {
        if key.as_bytes() <= last_key {
            unsorted += 1;
        }
        last_key = key.as_bytes();

        let property = match property_word(buf, key) {
            Ok(word) => word,
            Err(err) => {
                failed = Some(err);
                break;
            }
        };
        match transcode_node(buf, pool, value) {
            Ok((node, len)) => {
                scratch.push(ArchivedField { property, node });
                tape += len;
            }
            Err(err) => {
                failed = Some(err);
                break;
            }
        }
    }

    let placed = match failed {
        None => {
            if unsorted != 0 {
                sort_fields(buf.as_slice(), &mut scratch);
            }
            Ok(place_object(buf, &mut scratch, tape))
        }
        Some(err) => Err(err),
    };
    pool.put_fields(scratch);
    Ok((placed?, tape + 1))
}

/// Place a resolved child-node region and build its array node.
pub(crate) fn place_array(
    buf: &mut ArchiveBuf<'_>,
    children: &mut [ArchivedNode],
    tape: u32,
) -> ArchivedNode {
    buf.pad_to_8();
    let region = buf.len() as u32;
    for (i, node) in children.iter_mut().enumerate() {
        node.resolve_at(region + (i * NODE_BYTES) as u32);
    }
    for node in children.iter() {
        buf.push_node(node);
    }
    ArchivedNode::array(region, children.len() as u32, tape + 1)
}

/// Place a resolved field region and build its object node.
fn place_object(
    buf: &mut ArchiveBuf<'_>,
    fields: &mut [ArchivedField],
    tape: u32,
) -> ArchivedNode {
    buf.pad_to_8();
    let region = buf.len() as u32;
    for (i, field) in fields.iter_mut().enumerate() {
        field.resolve_at(region + (i * FIELD_BYTES) as u32);
    }
    for field in fields.iter() {
        buf.extend(&field.to_bytes());
    }
    ArchivedNode::object(region, fields.len() as u32, tape + 1)
}

/// Restore the sorted-fields invariant on a not-yet-placed object region.
/// Stable, so duplicate keys keep their source order.
fn sort_fields(archive: &[u8], fields: &mut [ArchivedField]) {
    fields.sort_by(|a, b| {
        key_view(archive, a.property)
            .bytes()
            .cmp(key_view(archive, b.property).bytes())
    });
}

enum KeyView<'a> {
    Inline([u8; 8], usize),
    Spilled(&'a [u8]),
}

impl KeyView<'_> {
    fn bytes(&self) -> &[u8] {
        match self {
            KeyView::Inline(buf, len) => &buf[..*len],
            KeyView::Spilled(bytes) => bytes,
        }
    }
}

fn key_view(archive: &[u8], property: Word) -> KeyView<'_> {
    if strings::is_indirect(property.0 as u8) {
        // Unresolved indirect property: the complemented absolute position.
        let len = strings::decode_length(property.lo()) as usize;
        let position = (!property.hi()) as usize;
        KeyView::Spilled(&archive[position..position + len])
    } else {
        KeyView::Inline(property.to_le_bytes(), strings::inline_len(property))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_do_not_touch_the_buffer() {
        let mut out = Vec::new();
        let mut buf = ArchiveBuf::new(&mut out);
        let mut pool = ScratchPool::new();

        let (node, tape) = transcode_node(&mut buf, &mut pool, &Element::U64(42)).unwrap();
        assert_eq!(node, ArchivedNode::pos_int(42));
        assert_eq!(tape, 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_long_string_spills_before_node() {
        let mut out = Vec::new();
        let mut buf = ArchiveBuf::new(&mut out);
        let mut pool = ScratchPool::new();

        let element = Element::String("abcdefghi".to_owned());
        let (node, _) = transcode_node(&mut buf, &mut pool, &element).unwrap();
        assert_eq!(buf.as_slice(), b"abcdefghi");
        assert_eq!(node.w1.hi(), 0x89);
        assert_eq!(node.w2.lo(), !0u32);
    }

    #[test]
    fn test_sort_fields_is_stable_for_duplicates() {
        let mut out = Vec::new();
        let buf = ArchiveBuf::new(&mut out);
        let mut fields = vec![
            ArchivedField {
                property: strings::inline_word(b"b"),
                node: ArchivedNode::pos_int(1),
            },
            ArchivedField {
                property: strings::inline_word(b"a"),
                node: ArchivedNode::pos_int(2),
            },
            ArchivedField {
                property: strings::inline_word(b"a"),
                node: ArchivedNode::pos_int(3),
            },
        ];
        sort_fields(buf.as_slice(), &mut fields);
        assert_eq!(fields[0].node, ArchivedNode::pos_int(2));
        assert_eq!(fields[1].node, ArchivedNode::pos_int(3));
        assert_eq!(fields[2].node, ArchivedNode::pos_int(1));
    }
}
