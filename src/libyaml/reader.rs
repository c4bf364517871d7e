use std::collections::VecDeque;
use std::io::Read as IoRead;

use super::INPUT_RAW_BUFFER_SIZE;
use crate::libyaml::{Encoding, Mark, ReaderError};

const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
const BOM_UTF16LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16BE: [u8; 2] = [0xFE, 0xFF];

/// Decodes a byte stream into a lookahead buffer of Unicode scalar values,
/// detecting the stream encoding from a byte-order mark (or defaulting to
/// UTF-8) and rejecting control characters YAML does not allow unescaped.
#[non_exhaustive]
pub struct Reader<'r> {
    pub(crate) read_handler: Option<Box<dyn IoRead + 'r>>,
    pub(crate) eof: bool,
    /// Decoded lookahead buffer.
    pub(crate) buffer: VecDeque<char>,
    /// Raw bytes read from `read_handler` but not yet decoded.
    raw_buffer: VecDeque<u8>,
    pub(crate) encoding: Encoding,
    /// Total bytes consumed from the raw stream.
    pub(crate) offset: u64,
    pub(crate) mark: Mark,
}

impl<'r> Reader<'r> {
    /// Create a reader that will autodetect its encoding from `read_handler`.
    pub fn new(read_handler: impl IoRead + 'r) -> Self {
        Reader {
            read_handler: Some(Box::new(read_handler)),
            eof: false,
            buffer: VecDeque::with_capacity(INPUT_RAW_BUFFER_SIZE),
            raw_buffer: VecDeque::with_capacity(INPUT_RAW_BUFFER_SIZE),
            encoding: Encoding::Any,
            offset: 0,
            mark: Mark::default(),
        }
    }

    /// Ensure at least `length` characters of lookahead are available in
    /// `self.buffer`, refilling and decoding from the raw stream as needed.
    pub(crate) fn update_buffer(&mut self, length: usize) -> Result<(), ReaderError> {
        if self.eof && self.read_handler.is_none() {
            return Ok(());
        }
        if self.encoding == Encoding::Any {
            self.determine_encoding()?;
        }
        while self.buffer.len() < length {
            if self.eof && self.raw_buffer.is_empty() {
                return Ok(());
            }
            self.update_raw_buffer()?;
            match self.encoding {
                Encoding::Utf8 => self.decode_utf8()?,
                Encoding::Utf16Le => self.decode_utf16::<false>()?,
                Encoding::Utf16Be => self.decode_utf16::<true>()?,
                Encoding::Any => unreachable!("encoding determined above"),
            }
        }
        Ok(())
    }

    fn determine_encoding(&mut self) -> Result<(), ReaderError> {
        while !self.eof && self.raw_buffer.len() < 3 {
            self.update_raw_buffer()?;
        }
        let (encoding, bom_len) = if starts_with(&self.raw_buffer, &BOM_UTF8) {
            (Encoding::Utf8, BOM_UTF8.len())
        } else if starts_with(&self.raw_buffer, &BOM_UTF16LE) {
            (Encoding::Utf16Le, BOM_UTF16LE.len())
        } else if starts_with(&self.raw_buffer, &BOM_UTF16BE) {
            (Encoding::Utf16Be, BOM_UTF16BE.len())
        } else {
            (Encoding::Utf8, 0)
        };
        self.raw_buffer.drain(..bom_len);
        self.offset += bom_len as u64;
        self.encoding = encoding;
        Ok(())
    }

    fn update_raw_buffer(&mut self) -> Result<(), ReaderError> {
        let Some(handler) = self.read_handler.as_mut() else {
            self.eof = true;
            return Ok(());
        };
        let mut chunk = [0u8; INPUT_RAW_BUFFER_SIZE];
        let n = handler.read(&mut chunk)?;
        if n == 0 {
            self.eof = true;
            self.read_handler = None;
        } else {
            self.raw_buffer.extend(&chunk[..n]);
        }
        Ok(())
    }

    fn decode_utf8(&mut self) -> Result<(), ReaderError> {
        while let Some(&first) = self.raw_buffer.front() {
            let width = utf8_width(first);
            if self.raw_buffer.len() < width {
                if self.eof {
                    return Err(ReaderError::Problem {
                        problem: "incomplete UTF-8 octet sequence",
                        offset: self.offset as usize,
                        value: i32::from(first),
                    });
                }
                return Ok(());
            }
            let bytes: Vec<u8> = self.raw_buffer.iter().take(width).copied().collect();
            let s =
                std::str::from_utf8(&bytes).map_err(|_| ReaderError::InvalidUtf8 { value: first })?;
            let ch = s.chars().next().expect("at least one decoded char");
            self.push_char(ch)?;
            self.raw_buffer.drain(..width);
            self.offset += width as u64;
        }
        Ok(())
    }

    fn decode_utf16<const BIG_ENDIAN: bool>(&mut self) -> Result<(), ReaderError> {
        while self.raw_buffer.len() >= 2 {
            let unit = read_u16::<BIG_ENDIAN>(&self.raw_buffer, 0);
            if (0xD800..0xDC00).contains(&unit) {
                if self.raw_buffer.len() < 4 {
                    if self.eof {
                        return Err(ReaderError::InvalidUtf16 { value: unit });
                    }
                    return Ok(());
                }
                let low = read_u16::<BIG_ENDIAN>(&self.raw_buffer, 2);
                if !(0xDC00..0xE000).contains(&low) {
                    return Err(ReaderError::InvalidUtf16 { value: low });
                }
                let c = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                let ch = char::from_u32(c).ok_or(ReaderError::InvalidUtf16 { value: low })?;
                self.push_char(ch)?;
                self.raw_buffer.drain(..4);
                self.offset += 4;
            } else {
                let ch = char::from_u32(u32::from(unit))
                    .ok_or(ReaderError::InvalidUtf16 { value: unit })?;
                self.push_char(ch)?;
                self.raw_buffer.drain(..2);
                self.offset += 2;
            }
        }
        Ok(())
    }

    fn push_char(&mut self, ch: char) -> Result<(), ReaderError> {
        let allowed = matches!(ch,
            '\t' | '\n' | '\r'
            | '\u{20}'..='\u{7e}'
            | '\u{85}'
            | '\u{a0}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}');
        if !allowed {
            return Err(ReaderError::Problem {
                problem: "control characters are not allowed",
                offset: self.offset as usize,
                value: ch as i32,
            });
        }
        self.buffer.push_back(ch);
        Ok(())
    }
}

fn starts_with(buf: &VecDeque<u8>, needle: &[u8]) -> bool {
    if buf.len() < needle.len() {
        return false;
    }
    buf.iter().zip(needle).all(|(a, b)| a == b)
}

fn read_u16<const BIG_ENDIAN: bool>(buf: &VecDeque<u8>, offset: usize) -> u16 {
    let hi = buf[offset];
    let lo = buf[offset + 1];
    if BIG_ENDIAN {
        u16::from_be_bytes([hi, lo])
    } else {
        u16::from_le_bytes([hi, lo])
    }
}

fn utf8_width(first_byte: u8) -> usize {
    match first_byte {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}
