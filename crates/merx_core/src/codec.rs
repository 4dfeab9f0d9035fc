//! Primitive field encoding for `.merx` artifacts.
//!
//! Integers and floats are little-endian. Booleans are one byte. Strings are
//! UTF-8 prefixed with a 7-bit variable-length byte count, the convention of
//! the editor's binary writer. Repeated sections are prefixed with an `i32`
//! element count. There is no framing beyond that: every reader must consume
//! exactly the fields its writer produced, in the same order.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{FormatError, Result};

// ── Writers ─────────────────────────────────────────────────────

/// Write a single byte
pub fn write_u8<W: Write + ?Sized>(w: &mut W, v: u8) -> Result<()> {
    w.write_u8(v)?;
    Ok(())
}

/// Write a boolean as one byte
pub fn write_bool<W: Write + ?Sized>(w: &mut W, v: bool) -> Result<()> {
    write_u8(w, v as u8)
}

/// Write a little-endian u16
pub fn write_u16<W: Write + ?Sized>(w: &mut W, v: u16) -> Result<()> {
    w.write_u16::<LittleEndian>(v)?;
    Ok(())
}

/// Write a little-endian i32
pub fn write_i32<W: Write + ?Sized>(w: &mut W, v: i32) -> Result<()> {
    w.write_i32::<LittleEndian>(v)?;
    Ok(())
}

/// Write a little-endian f32
pub fn write_f32<W: Write + ?Sized>(w: &mut W, v: f32) -> Result<()> {
    w.write_f32::<LittleEndian>(v)?;
    Ok(())
}

/// Write an element count for a repeated section
pub fn write_count<W: Write + ?Sized>(w: &mut W, len: usize) -> Result<()> {
    let count = i32::try_from(len).map_err(|_| FormatError::TooLong(len))?;
    write_i32(w, count)
}

/// Write a length-prefixed UTF-8 string
pub fn write_string<W: Write + ?Sized>(w: &mut W, s: &str) -> Result<()> {
    let len = u32::try_from(s.len())
        .ok()
        .filter(|len| *len <= i32::MAX as u32)
        .ok_or(FormatError::TooLong(s.len()))?;

    let mut rest = len;
    while rest >= 0x80 {
        write_u8(w, (rest as u8) | 0x80)?;
        rest >>= 7;
    }
    write_u8(w, rest as u8)?;

    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Readers ─────────────────────────────────────────────────────

/// Read a single byte
pub fn read_u8<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<u8> {
    r.read_u8().map_err(|e| FormatError::from_read(e, context))
}

/// Read a one-byte boolean (any non-zero value is `true`)
pub fn read_bool<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<bool> {
    Ok(read_u8(r, context)? != 0)
}

/// Read a little-endian u16
pub fn read_u16<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<u16> {
    r.read_u16::<LittleEndian>()
        .map_err(|e| FormatError::from_read(e, context))
}

/// Read a little-endian i32
pub fn read_i32<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<i32> {
    r.read_i32::<LittleEndian>()
        .map_err(|e| FormatError::from_read(e, context))
}

/// Read a little-endian f32
pub fn read_f32<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<f32> {
    r.read_f32::<LittleEndian>()
        .map_err(|e| FormatError::from_read(e, context))
}

/// Read the element count of a repeated section
pub fn read_count<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<usize> {
    let count = read_i32(r, context)?;
    if count < 0 {
        return Err(FormatError::NegativeCount { context, count });
    }
    Ok(count as usize)
}

/// Read a length-prefixed UTF-8 string
pub fn read_string<R: Read + ?Sized>(r: &mut R, context: &'static str) -> Result<String> {
    let mut len: u32 = 0;
    let mut shift = 0;
    loop {
        if shift >= 35 {
            return Err(FormatError::MalformedLength);
        }
        let byte = read_u8(r, context)?;
        len |= ((byte & 0x7F) as u32) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }

    let mut buf = Vec::new();
    (&mut *r)
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|e| FormatError::from_read(e, context))?;
    if buf.len() != len as usize {
        return Err(FormatError::UnexpectedEof { context });
    }

    String::from_utf8(buf).map_err(|_| FormatError::InvalidUtf8 { context })
}
