//! NDEF message encoding (NFC Forum Data Exchange Format).
//!
//! Only what a lock-hash tag needs: plain records with short or long payload
//! lengths, optional ids, and the well-known Text record type. Chunked
//! records are rejected.

use crate::NfcError;

const MB: u8 = 0x80;
const ME: u8 = 0x40;
const CF: u8 = 0x20;
const SR: u8 = 0x10;
const IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

const TEXT_TYPE: &[u8] = b"T";
const UTF16_FLAG: u8 = 0x80;
const LANG_LEN_MASK: u8 = 0x3F;

/// Type Name Format of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tnf {
    Empty = 0x00,
    WellKnown = 0x01,
    MimeMedia = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
    Reserved = 0x07,
}

impl Tnf {
    fn from_header(header: u8) -> Self {
        match header & TNF_MASK {
            0x00 => Self::Empty,
            0x01 => Self::WellKnown,
            0x02 => Self::MimeMedia,
            0x03 => Self::AbsoluteUri,
            0x04 => Self::External,
            0x05 => Self::Unknown,
            0x06 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }
}

/// A single NDEF record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    /// Build a UTF-8 well-known Text record.
    ///
    /// `lang` is an IANA language code such as `"en"`; at most 63 ASCII bytes.
    pub fn text(text: &str, lang: &str) -> Result<Self, NfcError> {
        let lang = lang.as_bytes();
        if lang.len() > LANG_LEN_MASK as usize || !lang.is_ascii() {
            return Err(NfcError::InvalidText(format!(
                "language code must be at most {LANG_LEN_MASK} ASCII bytes"
            )));
        }
        let mut payload = Vec::with_capacity(1 + lang.len() + text.len());
        payload.push(lang.len() as u8);
        payload.extend_from_slice(lang);
        payload.extend_from_slice(text.as_bytes());
        Ok(Self {
            tnf: Tnf::WellKnown,
            record_type: TEXT_TYPE.to_vec(),
            id: Vec::new(),
            payload,
        })
    }

    pub fn is_text(&self) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type == TEXT_TYPE
    }

    /// Language code of a Text record.
    pub fn language(&self) -> Option<String> {
        if !self.is_text() {
            return None;
        }
        let (&status, rest) = self.payload.split_first()?;
        let lang = rest.get(..(status & LANG_LEN_MASK) as usize)?;
        Some(String::from_utf8_lossy(lang).into_owned())
    }

    /// Decode the text carried by a Text record.
    pub fn text_content(&self) -> Result<String, NfcError> {
        if !self.is_text() {
            return Err(NfcError::NotText);
        }
        let (&status, rest) = self
            .payload
            .split_first()
            .ok_or_else(|| NfcError::InvalidText("empty payload".into()))?;
        let lang_len = (status & LANG_LEN_MASK) as usize;
        let body = rest
            .get(lang_len..)
            .ok_or_else(|| NfcError::InvalidText("language code overruns payload".into()))?;

        if status & UTF16_FLAG != 0 {
            decode_utf16(body)
        } else {
            String::from_utf8(body.to_vec()).map_err(|e| NfcError::InvalidText(e.to_string()))
        }
    }
}

fn decode_utf16(body: &[u8]) -> Result<String, NfcError> {
    if body.len() % 2 != 0 {
        return Err(NfcError::InvalidText("odd UTF-16 byte length".into()));
    }
    // Big-endian unless a byte-order mark says otherwise.
    let (little_endian, body) = match body {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, body),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).map_err(|e| NfcError::InvalidText(e.to_string()))
}

/// Serialize records into one NDEF message.
pub fn encode_message(records: &[NdefRecord]) -> Result<Vec<u8>, NfcError> {
    if records.is_empty() {
        return Err(NfcError::Malformed("message needs at least one record".into()));
    }

    let last = records.len() - 1;
    let mut out = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let type_len = u8::try_from(record.record_type.len())
            .map_err(|_| NfcError::Malformed("record type longer than 255 bytes".into()))?;
        let id_len = u8::try_from(record.id.len())
            .map_err(|_| NfcError::Malformed("record id longer than 255 bytes".into()))?;
        let payload_len = u32::try_from(record.payload.len())
            .map_err(|_| NfcError::Malformed("payload longer than 4 GiB".into()))?;
        let short = payload_len <= u8::MAX as u32;

        let mut header = record.tnf as u8;
        if index == 0 {
            header |= MB;
        }
        if index == last {
            header |= ME;
        }
        if short {
            header |= SR;
        }
        if id_len > 0 {
            header |= IL;
        }

        out.push(header);
        out.push(type_len);
        if short {
            out.push(payload_len as u8);
        } else {
            out.extend_from_slice(&payload_len.to_be_bytes());
        }
        if id_len > 0 {
            out.push(id_len);
        }
        out.extend_from_slice(&record.record_type);
        out.extend_from_slice(&record.id);
        out.extend_from_slice(&record.payload);
    }
    Ok(out)
}

/// A message holding exactly one UTF-8 Text record.
pub fn encode_text_message(text: &str, lang: &str) -> Result<Vec<u8>, NfcError> {
    encode_message(&[NdefRecord::text(text, lang)?])
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], NfcError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| NfcError::Malformed(format!("truncated {what}")))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self, what: &str) -> Result<u8, NfcError> {
        Ok(self.take(1, what)?[0])
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// Parse an NDEF message into its records.
pub fn decode_message(bytes: &[u8]) -> Result<Vec<NdefRecord>, NfcError> {
    if bytes.is_empty() {
        return Err(NfcError::NoNdefMessage);
    }

    let mut cursor = Cursor { bytes, pos: 0 };
    let mut records = Vec::new();
    loop {
        let header = cursor.byte("record header")?;
        let first = records.is_empty();
        if first != (header & MB != 0) {
            return Err(NfcError::Malformed(
                if first {
                    "first record lacks the MB flag"
                } else {
                    "MB flag set on a later record"
                }
                .into(),
            ));
        }
        if header & CF != 0 {
            return Err(NfcError::Malformed("chunked records are not supported".into()));
        }

        let type_len = cursor.byte("type length")? as usize;
        let payload_len = if header & SR != 0 {
            cursor.byte("payload length")? as usize
        } else {
            let b = cursor.take(4, "payload length")?;
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
        };
        let id_len = if header & IL != 0 {
            cursor.byte("id length")? as usize
        } else {
            0
        };

        let record_type = cursor.take(type_len, "record type")?.to_vec();
        let id = cursor.take(id_len, "record id")?.to_vec();
        let payload = cursor.take(payload_len, "payload")?.to_vec();
        records.push(NdefRecord {
            tnf: Tnf::from_header(header),
            record_type,
            id,
            payload,
        });

        if header & ME != 0 {
            break;
        }
        if cursor.is_exhausted() {
            return Err(NfcError::Malformed("message ends without the ME flag".into()));
        }
    }

    if !cursor.is_exhausted() {
        return Err(NfcError::Malformed("trailing bytes after the final record".into()));
    }
    Ok(records)
}
