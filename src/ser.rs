// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! The dump path's `serde::Serializer`: walks a host value and pushes
//! [`Event`]s straight into the [`Emitter`], interleaving the
//! representer's type -> node dispatch and style choices with the
//! actual event emission rather than building an intermediate tree
//! first. [`crate::value::to_value`] takes the tree-building route
//! through [`crate::value::ser`] instead, for callers that want a
//! [`crate::value::Value`] rather than bytes.

use crate::libyaml::{
    Break, Encoding, Event, MappingStyle, ScalarStyle, SequenceStyle,
};
use crate::libyaml::emitter::Emitter;
use crate::libyaml::error::EmitterError;
use crate::modules::error::{self, Error, ErrorImpl};
use crate::options::{LineBreak, Options, QuotePreference};
use serde::ser::{self, Serialize};
use std::cell::RefCell;
use std::fmt::Display;
use std::io;
use std::rc::Rc;

type Result<T, E = Error> = std::result::Result<T, E>;

/// A `std::io::Write` adapter over a writer shared (via `Rc<RefCell<_>>`)
/// between the `Serializer` and the `Emitter` it drives, so the writer
/// can be handed back to the caller through [`Serializer::into_inner`]
/// once emission finishes.
struct SharedWriter<W> {
    inner: Rc<RefCell<Option<W>>>,
}

impl<W: io::Write> io::Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.borrow_mut().as_mut() {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after Serializer::into_inner",
            )),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.inner.borrow_mut().as_mut() {
            Some(writer) => writer.write_all(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after Serializer::into_inner",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.borrow_mut().as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

/// A structure for serializing Rust values into YAML.
pub struct Serializer<W> {
    /// Nesting depth of the value currently being walked; 0 means "not
    /// inside a top-level `serialize_*` call", which is when DOCUMENT-START
    /// and DOCUMENT-END need to be emitted around the content.
    depth: usize,
    /// Tag (e.g. `!Newtype`) waiting to be attached to whichever node
    /// the in-progress enum variant actually turns out to be: a scalar,
    /// a sequence, or a mapping.
    pending_tag: Option<String>,
    emitter: Emitter<'static>,
    writer: Rc<RefCell<Option<W>>>,
    options: Options,
}

impl<W> Serializer<W>
where
    W: io::Write + 'static,
{
    /// Creates a new YAML serializer that writes to `writer`, using the
    /// default [`Options`].
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, Options::default())
    }

    /// Creates a new YAML serializer that writes to `writer`, applying
    /// `options`'s indent/width/canonical/unicode/line-break settings to
    /// the underlying [`Emitter`] before anything is emitted.
    pub fn with_options(writer: W, options: Options) -> Self {
        let writer = Rc::new(RefCell::new(Some(writer)));
        let shared = SharedWriter {
            inner: Rc::clone(&writer),
        };
        let mut emitter = Emitter::new(shared);
        emitter.set_indent(options.indent);
        emitter.set_canonical(options.canonical);
        emitter.set_width(options.line_width);
        emitter.set_unicode(options.unicode);
        emitter.set_break(match options.line_break {
            LineBreak::Lf => Break::Ln,
            LineBreak::Cr => Break::Cr,
            LineBreak::CrLf => Break::CrLn,
        });
        emitter
            .emit(Event::stream_start(Encoding::Utf8))
            .expect("emitting STREAM-START cannot fail");
        Serializer {
            depth: 0,
            pending_tag: None,
            emitter,
            writer,
            options,
        }
    }

    /// Finishes emission (STREAM-END plus a flush) and hands the
    /// underlying writer back to the caller.
    pub fn into_inner(mut self) -> Result<W> {
        self.emitter.emit(Event::stream_end())?;
        self.emitter.flush().map_err(EmitterError::from)?;
        drop(self.emitter);
        Rc::try_unwrap(self.writer)
            .ok()
            .and_then(|cell| cell.into_inner())
            .ok_or_else(|| error::new(ErrorImpl::Message("writer already taken".to_owned(), None)))
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth == 0 {
            self.emitter.emit(Event::document_start(
                None,
                &[],
                !self.options.explicit_start,
            ))?;
        }
        self.depth += 1;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.depth -= 1;
        if self.depth == 0 {
            self.emitter
                .emit(Event::document_end(!self.options.explicit_end))?;
        }
        Ok(())
    }

    fn emit_scalar(
        &mut self,
        value: &str,
        plain_implicit: bool,
        quoted_implicit: bool,
        style: ScalarStyle,
    ) -> Result<()> {
        self.enter()?;
        let tag = self.pending_tag.take();
        let (plain_implicit, quoted_implicit) = match &tag {
            Some(_) => (false, false),
            None => (plain_implicit, quoted_implicit),
        };
        self.emitter.emit(Event::scalar(
            None,
            tag.as_deref(),
            value,
            plain_implicit,
            quoted_implicit,
            style,
        ))?;
        self.exit()
    }

    /// Emits a SEQUENCE-START event, consuming any tag left pending by an
    /// enclosing enum variant.
    fn start_sequence(&mut self) -> Result<()> {
        self.enter()?;
        let tag = self.pending_tag.take();
        let implicit = tag.is_none();
        self.emitter.emit(Event::sequence_start(
            None,
            tag.as_deref(),
            implicit,
            SequenceStyle::Block,
        ))?;
        Ok(())
    }

    /// Emits a MAPPING-START event, consuming any tag left pending by an
    /// enclosing enum variant.
    fn start_mapping(&mut self) -> Result<()> {
        self.enter()?;
        let tag = self.pending_tag.take();
        let implicit = tag.is_none();
        self.emitter.emit(Event::mapping_start(
            None,
            tag.as_deref(),
            implicit,
            MappingStyle::Block,
        ))?;
        Ok(())
    }
}

fn is_plain_safe(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let mut chars = value.chars();
    let first = chars.next().unwrap();
    if "!&*-?|>%@`\"'#,[]{}:".contains(first) {
        return false;
    }
    if value == "~" || value.eq_ignore_ascii_case("null") || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("false")
    {
        return false;
    }
    if value.parse::<f64>().is_ok() || value.parse::<i64>().is_ok() {
        return false;
    }
    !value.contains(": ") && !value.ends_with(':') && !value.contains(" #")
        && !value.contains('\n')
        && value.trim() == value
}

impl<'a, W> ser::Serializer for &'a mut Serializer<W>
where
    W: io::Write + 'static,
{
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a, W>;
    type SerializeTuple = SeqSerializer<'a, W>;
    type SerializeTupleStruct = SeqSerializer<'a, W>;
    type SerializeTupleVariant = SeqSerializer<'a, W>;
    type SerializeMap = MapSerializer<'a, W>;
    type SerializeStruct = StructSerializer<'a, W>;
    type SerializeStructVariant = StructSerializer<'a, W>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.emit_scalar(if v { "true" } else { "false" }, true, false, ScalarStyle::Plain)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        self.emit_scalar(buffer.format(v), true, false, ScalarStyle::Plain)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.emit_scalar(&v.to_string(), true, false, ScalarStyle::Plain)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        self.emit_scalar(buffer.format(v), true, false, ScalarStyle::Plain)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.emit_scalar(&v.to_string(), true, false, ScalarStyle::Plain)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        if v.is_nan() {
            return self.emit_scalar(".nan", true, false, ScalarStyle::Plain);
        }
        if v.is_infinite() {
            let text = if v > 0.0 { ".inf" } else { "-.inf" };
            return self.emit_scalar(text, true, false, ScalarStyle::Plain);
        }
        let mut buffer = ryu::Buffer::new();
        let mut formatted = buffer.format_finite(v).to_owned();
        if !formatted.contains('.') && !formatted.contains('e') {
            formatted.push_str(".0");
        }
        self.emit_scalar(&formatted, true, false, ScalarStyle::Plain)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buffer = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buffer))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        if v.is_empty() {
            return self.emit_scalar(v, false, true, ScalarStyle::DoubleQuoted);
        }
        if v.contains('\n') && !v.ends_with('\n') {
            return self.emit_scalar(v, false, true, ScalarStyle::DoubleQuoted);
        }
        if v.contains('\n') {
            return self.emit_scalar(v, false, true, ScalarStyle::Literal);
        }
        if is_plain_safe(v) {
            return self.emit_scalar(v, true, false, ScalarStyle::Plain);
        }
        let quoted_style = match self.options.quote_preference {
            QuotePreference::Single => ScalarStyle::SingleQuoted,
            QuotePreference::Double | QuotePreference::Legacy => {
                ScalarStyle::DoubleQuoted
            }
        };
        self.emit_scalar(v, false, true, quoted_style)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(error::new(ErrorImpl::BytesUnsupported))
    }

    fn serialize_none(self) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.emit_scalar("null", true, false, ScalarStyle::Plain)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_tag = Some(format!("!{}", variant));
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SeqSerializer<'a, W>> {
        self.start_sequence()?;
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer<'a, W>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqSerializer<'a, W>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqSerializer<'a, W>> {
        self.pending_tag = Some(format!("!{}", variant));
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapSerializer<'a, W>> {
        self.enter()?;
        Ok(MapSerializer {
            ser: self,
            entries: Vec::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<StructSerializer<'a, W>> {
        self.start_mapping()?;
        Ok(StructSerializer { ser: self })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructSerializer<'a, W>> {
        self.pending_tag = Some(format!("!{}", variant));
        self.serialize_struct(_name, len)
    }

    fn collect_str<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Display,
    {
        self.serialize_str(&value.to_string())
    }
}

/// Shared implementation backing `SerializeSeq`, `SerializeTuple`,
/// `SerializeTupleStruct` and `SerializeTupleVariant`.
pub struct SeqSerializer<'a, W> {
    ser: &'a mut Serializer<W>,
}

impl<W: io::Write + 'static> ser::SerializeSeq for SeqSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.emitter.emit(Event::sequence_end())?;
        self.ser.exit()
    }
}

impl<W: io::Write + 'static> ser::SerializeTuple for SeqSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeSeq::end(self)
    }
}

impl<W: io::Write + 'static> ser::SerializeTupleStruct for SeqSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeSeq::end(self)
    }
}

impl<W: io::Write + 'static> ser::SerializeTupleVariant for SeqSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<()> {
        ser::SerializeSeq::end(self)
    }
}

/// Buffers `(key, value)` pairs so they can be emitted in the
/// representer's stable key order (booleans, then numbers, then
/// strings by a natural comparator) rather than whatever order the
/// source map iterates in.
pub struct MapSerializer<'a, W> {
    ser: &'a mut Serializer<W>,
    entries: Vec<(crate::value::Value, crate::value::Value)>,
    next_key: Option<crate::value::Value>,
}

impl<W: io::Write + 'static> ser::SerializeMap for MapSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(crate::value::to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .expect("serialize_value called before serialize_key");
        let value = crate::value::to_value(value)?;
        self.entries.push((key, value));
        Ok(())
    }

    fn end(self) -> Result<()> {
        let mut entries = self.entries;
        entries.sort_by(key_order);
        let style = if self.ser.options.flow_simple_coll
            && entries.iter().all(|(k, v)| {
                !k.is_sequence() && !k.is_mapping() && !v.is_sequence() && !v.is_mapping()
            })
        {
            MappingStyle::Flow
        } else {
            MappingStyle::Block
        };
        self.ser.emitter.emit(Event::mapping_start(
            None, None, true, style,
        ))?;
        for (key, value) in entries {
            key.serialize(&mut *self.ser)?;
            value.serialize(&mut *self.ser)?;
        }
        self.ser.emitter.emit(Event::mapping_end())?;
        self.ser.exit()
    }
}

fn key_order(
    (a, _): &(crate::value::Value, crate::value::Value),
    (b, _): &(crate::value::Value, crate::value::Value),
) -> std::cmp::Ordering {
    use crate::value::Value;
    use std::cmp::Ordering;

    fn rank(v: &Value) -> u8 {
        match v {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            _ => 2,
        }
    }

    match (rank(a), rank(b)) {
        (ra, rb) if ra != rb => ra.cmp(&rb),
        _ => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => natural_cmp(x, y),
            _ => Ordering::Equal,
        },
    }
}

/// Compares two strings treating runs of ASCII digits as numbers, so
/// `"a/2"` sorts before `"a/10"` instead of after it.
fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();
    loop {
        match (ai.peek(), bi.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut xs = String::new();
                while ai.peek().is_some_and(char::is_ascii_digit) {
                    xs.push(ai.next().unwrap());
                }
                let mut ys = String::new();
                while bi.peek().is_some_and(char::is_ascii_digit) {
                    ys.push(bi.next().unwrap());
                }
                let xn: u128 = xs.parse().unwrap_or(0);
                let yn: u128 = ys.parse().unwrap_or(0);
                match xn.cmp(&yn) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            (Some(x), Some(y)) => {
                match x.cmp(y) {
                    Ordering::Equal => {
                        ai.next();
                        bi.next();
                        continue;
                    }
                    other => return other,
                }
            }
        }
    }
}

/// Shared implementation backing `SerializeStruct` and
/// `SerializeStructVariant`: struct field order is already the
/// representer's intended order, so entries stream straight through
/// rather than buffering like [`MapSerializer`] does.
pub struct StructSerializer<'a, W> {
    ser: &'a mut Serializer<W>,
}

impl<W: io::Write + 'static> ser::SerializeStruct for StructSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.emit_scalar(key, true, false, ScalarStyle::Plain)?;
        value.serialize(&mut *self.ser)
    }

    fn skip_field(&mut self, _key: &'static str) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<()> {
        self.ser.emitter.emit(Event::mapping_end())?;
        self.ser.exit()
    }
}

impl<W: io::Write + 'static> ser::SerializeStructVariant for StructSerializer<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        ser::SerializeStruct::skip_field(self, key)
    }

    fn end(self) -> Result<()> {
        ser::SerializeStruct::end(self)
    }
}

/// Serializes `value` as a string of YAML.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, Options::default())
}

/// Serializes `value` as a string of YAML, honoring `options`.
pub fn to_string_with_options<T>(value: &T, options: Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::with_options(Vec::new(), options);
    value.serialize(&mut serializer)?;
    let vec = serializer.into_inner()?;
    String::from_utf8(vec).map_err(|err| error::new(ErrorImpl::FromUtf8(err.utf8_error())))
}

/// Serializes `value` as YAML into `writer`.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write + 'static,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, Options::default())
}

/// Serializes `value` as YAML into `writer`, honoring `options`.
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: Options) -> Result<()>
where
    W: io::Write + 'static,
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::with_options(writer, options);
    value.serialize(&mut serializer)?;
    serializer.into_inner()?;
    Ok(())
}
