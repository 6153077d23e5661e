//! Binary settings format
//!
//! A config file is a flat sequence of records with no header:
//!
//! ```text
//! record := kind:u8 key_len:u8 key:[u8; key_len] value
//! value  := u8              (TOGGLE, 0 or 1)
//!         | i32             (CHOICE, SCROLL)
//!         | u32 u32 u32     (BIND, slot order)
//! ```
//!
//! Integers are little-endian. Kind bytes are TOGGLE=0, CHOICE=1, SCROLL=2,
//! BIND=3. A kind byte of [`END_OF_RECORDS`] ends the file early, as does a
//! truncated record. Records are matched to nodes by `(kind, config key)`,
//! so their order carries no meaning.

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, warn};

use crate::errors::{MenuError, Result};
use crate::menu::forest::Forest;
use crate::menu::node::{Kind, NodeId, Payload, Root, BIND_SLOTS};

/// Kind byte that terminates the record stream
pub const END_OF_RECORDS: u8 = 0xFF;

/// Longest key a record can hold
pub const MAX_KEY_LENGTH: usize = u8::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValue {
    Toggle(bool),
    Int(i32),
    Binds([u32; BIND_SLOTS]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: Kind,
    pub key: String,
    pub value: RecordValue,
}

impl Record {
    /// Snapshot of a persisted node, `None` when the node is not saved
    fn from_node(forest: &Forest, id: NodeId) -> Option<Record> {
        let node = forest.node(id);
        let key = node.persisted_key()?;
        let value = match &node.payload {
            Payload::Toggle { value } => RecordValue::Toggle(value.get()),
            Payload::Choice { index, .. } => RecordValue::Int(index.get()),
            Payload::Scroll { value, .. } => RecordValue::Int(value.get()),
            Payload::Bind { binds, .. } => RecordValue::Binds(binds.get()),
            _ => return None,
        };
        Some(Record {
            kind: node.kind(),
            key: key.to_string(),
            value,
        })
    }

    fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(tag) = self.kind.record_tag() else {
            return Ok(());
        };
        let key = self.key.as_bytes();
        if key.len() > MAX_KEY_LENGTH {
            return Err(MenuError::KeyTooLong {
                key: self.key.clone(),
                len: key.len(),
            });
        }

        out.write_u8(tag)?;
        out.write_u8(key.len() as u8)?;
        out.write_all(key)?;
        match self.value {
            RecordValue::Toggle(b) => out.write_u8(u8::from(b))?,
            RecordValue::Int(v) => out.write_i32::<LittleEndian>(v)?,
            RecordValue::Binds(binds) => {
                for bind in binds {
                    out.write_u32::<LittleEndian>(bind)?;
                }
            }
        }
        Ok(())
    }

    /// Read the next record. `Ok(None)` at the end of the stream.
    fn read_from<R: Read>(input: &mut R) -> Result<Option<Record>> {
        let tag = match input.read_u8() {
            Ok(tag) => tag,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if tag == END_OF_RECORDS {
            return Ok(None);
        }
        let kind = Kind::from_record_tag(tag).ok_or(MenuError::UnknownRecordKind(tag))?;

        match Self::read_body(input, kind) {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("truncated {} record at end of config", kind);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn read_body<R: Read>(input: &mut R, kind: Kind) -> io::Result<Record> {
        let len = input.read_u8()? as usize;
        let mut key = vec![0u8; len];
        input.read_exact(&mut key)?;

        let value = match kind {
            Kind::Toggle => RecordValue::Toggle(input.read_u8()? != 0),
            Kind::Choice | Kind::Scroll => RecordValue::Int(input.read_i32::<LittleEndian>()?),
            _ => {
                let mut binds = [0u32; BIND_SLOTS];
                for bind in binds.iter_mut() {
                    *bind = input.read_u32::<LittleEndian>()?;
                }
                RecordValue::Binds(binds)
            }
        };

        Ok(Record {
            kind,
            key: String::from_utf8_lossy(&key).into_owned(),
            value,
        })
    }
}

/// Serialize every persisted node of the declared menu in tree order.
///
/// Nodes whose key does not fit a record are skipped with a warning.
pub fn encode(forest: &Forest) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for id in forest.walk(Root::Declared) {
        let Some(record) = Record::from_node(forest, id) else {
            continue;
        };
        match record.write_to(&mut out) {
            Ok(()) => {}
            Err(e @ MenuError::KeyTooLong { .. }) => warn!("{}", e),
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

/// Parse records until the end marker, the end of the data or an unknown kind
pub fn decode(bytes: &[u8]) -> Vec<Record> {
    let mut input = Cursor::new(bytes);
    let mut records = Vec::new();
    loop {
        match Record::read_from(&mut input) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(e) => {
                warn!("config load stopped: {}", e);
                break;
            }
        }
    }
    records
}

/// Write records into the matching nodes. Returns how many matched.
pub fn apply(forest: &mut Forest, records: &[Record]) -> usize {
    let mut applied = 0;
    for record in records {
        let Some(id) = forest.find_config(record.kind, &record.key) else {
            debug!("no {} option for config key '{}'", record.kind, record.key);
            continue;
        };
        match (&mut forest.node_mut(id).payload, record.value) {
            (Payload::Toggle { value }, RecordValue::Toggle(b)) => value.set(b),
            (Payload::Choice { index, .. }, RecordValue::Int(v)) => index.set(v),
            (Payload::Scroll { value, .. }, RecordValue::Int(v)) => value.set(v),
            (Payload::Bind { binds, .. }, RecordValue::Binds(b)) => binds.set(b),
            _ => continue,
        }
        applied += 1;
    }
    applied
}
