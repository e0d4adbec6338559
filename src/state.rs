//! Byte encoding for component view state.
//!
//! Layout (big-endian): magic `XCVS`, one tag byte naming the component, the
//! host's base state as a length-prefixed blob, then the dataset as a count
//! followed by `(label, value)` pairs with length-prefixed UTF-8 labels.

use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::StateError;

pub const MAGIC: [u8; 4] = *b"XCVS";
pub const PIE_TAG: u8 = b'P';
pub const BAR_TAG: u8 = b'B';

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedState {
    pub base: Vec<u8>,
    pub entries: Vec<(String, f32)>,
}

pub fn encode<'a, I>(tag: u8, base: &[u8], entries: I) -> Result<Vec<u8>, StateError>
where
    I: IntoIterator<Item = (&'a str, f32)>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = entries.into_iter();
    let mut out = Vec::with_capacity(16 + base.len() + entries.len() * 16);
    out.extend_from_slice(&MAGIC);
    out.write_u8(tag)?;
    write_blob(&mut out, base)?;
    out.write_u32::<BigEndian>(to_u32(entries.len())?)?;
    for (label, value) in entries {
        write_blob(&mut out, label.as_bytes())?;
        out.write_f32::<BigEndian>(value)?;
    }
    Ok(out)
}

pub fn decode(tag: u8, bytes: &[u8]) -> Result<SavedState, StateError> {
    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic).map_err(read_error)?;
    if magic != MAGIC {
        return Err(StateError::BadMagic(magic));
    }
    let found = cursor.read_u8().map_err(read_error)?;
    if found != tag {
        return Err(StateError::WrongTag {
            expected: tag as char,
            found: found as char,
        });
    }
    let base = read_blob(&mut cursor)?;
    let count = cursor.read_u32::<BigEndian>().map_err(read_error)? as usize;
    // every entry takes at least 8 bytes, so a huge count can only be garbage
    if count > remaining(&cursor) / 8 {
        return Err(StateError::Truncated);
    }
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let label = String::from_utf8(read_blob(&mut cursor)?)?;
        let value = cursor.read_f32::<BigEndian>().map_err(read_error)?;
        entries.push((label, value));
    }
    let trailing = remaining(&cursor);
    if trailing > 0 {
        return Err(StateError::TrailingBytes(trailing));
    }
    Ok(SavedState { base, entries })
}

fn write_blob(out: &mut Vec<u8>, blob: &[u8]) -> Result<(), StateError> {
    out.write_u32::<BigEndian>(to_u32(blob.len())?)?;
    out.extend_from_slice(blob);
    Ok(())
}

fn read_blob(cursor: &mut Cursor<&[u8]>) -> Result<Vec<u8>, StateError> {
    let len = cursor.read_u32::<BigEndian>().map_err(read_error)? as usize;
    if len > remaining(cursor) {
        return Err(StateError::Truncated);
    }
    let mut blob = vec![0u8; len];
    cursor.read_exact(&mut blob).map_err(read_error)?;
    Ok(blob)
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    let len = cursor.get_ref().len() as u64;
    len.saturating_sub(cursor.position()) as usize
}

fn to_u32(len: usize) -> Result<u32, StateError> {
    u32::try_from(len).map_err(|_| StateError::TooLarge(len))
}

fn read_error(err: io::Error) -> StateError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        StateError::Truncated
    } else {
        StateError::Io(err)
    }
}
