//! Email parsers: RFC 822 messages via `mailparse`, Outlook .msg via `cfb`

use std::io::{Cursor, Read, Seek};

use mailparse::{MailHeaderMap, ParsedMail};

use crate::error::Result;
use crate::types::{Blob, Metadata, Record};

use super::BlobParser;

/// RFC 822 (.eml) parser.
///
/// A single-part message yields one record with the decoded payload. A
/// multipart message yields one record per text leaf part, each carrying
/// the message headers plus `part` and `content_type`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmlParser;

impl EmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlobParser for EmlParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let data = blob.as_bytes()?;
        let mail = mailparse::parse_mail(&data)?;
        let headers = header_metadata(
            mail.headers.get_first_value("Subject"),
            mail.headers.get_first_value("From"),
            mail.headers.get_first_value("To"),
            mail.headers.get_first_value("Date"),
        );

        if mail.subparts.is_empty() {
            let body = mail.get_body()?;
            return Ok(vec![Record::new(body).with_metadata_map(headers)]);
        }

        let mut leaves = Vec::new();
        collect_text_leaves(&mail, &mut leaves);

        let mut records = Vec::with_capacity(leaves.len());
        for (index, part) in leaves.into_iter().enumerate() {
            let body = part.get_body()?;
            records.push(
                Record::new(body)
                    .with_metadata_map(headers.clone())
                    .with_metadata("part", index)
                    .with_metadata("content_type", part.ctype.mimetype.clone()),
            );
        }

        tracing::debug!(source = %blob.source(), parts = records.len(), "Parsed multipart email");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "eml"
    }
}

fn collect_text_leaves<'a>(mail: &'a ParsedMail<'a>, out: &mut Vec<&'a ParsedMail<'a>>) {
    if mail.subparts.is_empty() {
        if mail.ctype.mimetype.starts_with("text/") {
            out.push(mail);
        }
        return;
    }
    for part in &mail.subparts {
        collect_text_leaves(part, out);
    }
}

fn header_metadata(
    subject: Option<String>,
    from: Option<String>,
    to: Option<String>,
    date: Option<String>,
) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("subject".to_string(), subject.into());
    metadata.insert("from".to_string(), from.into());
    metadata.insert("to".to_string(), to.into());
    metadata.insert("date".to_string(), date.into());
    metadata
}

// MAPI property ids stored as `__substg1.0_<id><type>` streams
const PR_SUBJECT: u16 = 0x0037;
const PR_CLIENT_SUBMIT_TIME: u16 = 0x0039;
const PR_TRANSPORT_MESSAGE_HEADERS: u16 = 0x007D;
const PR_SENDER_NAME: u16 = 0x0C1A;
const PR_SENDER_EMAIL_ADDRESS: u16 = 0x0C1F;
const PR_DISPLAY_TO: u16 = 0x0E04;
const PR_MESSAGE_DELIVERY_TIME: u16 = 0x0E06;
const PR_BODY: u16 = 0x1000;

const PT_SYSTIME: u16 = 0x0040;
const PROPERTIES_STREAM: &str = "/__properties_version1.0";
const TOP_LEVEL_PROPERTIES_HEADER: usize = 32;
const PROPERTY_ENTRY_LEN: usize = 16;

/// Outlook (.msg) parser reading the OLE2 compound file with `cfb`.
///
/// Yields one record whose content is the plain-text body.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlookMsgParser;

impl OutlookMsgParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlobParser for OutlookMsgParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let data = blob.as_bytes()?;
        let mut msg = cfb::CompoundFile::open(Cursor::new(data.as_ref()))?;

        let subject = read_string_property(&mut msg, PR_SUBJECT)?;
        let body = read_string_property(&mut msg, PR_BODY)?.unwrap_or_default();
        let sender = match (
            read_string_property(&mut msg, PR_SENDER_NAME)?,
            read_string_property(&mut msg, PR_SENDER_EMAIL_ADDRESS)?,
        ) {
            (Some(name), Some(email)) if name != email => Some(format!("{} <{}>", name, email)),
            (Some(name), _) => Some(name),
            (None, email) => email,
        };
        let to = read_string_property(&mut msg, PR_DISPLAY_TO)?;
        let date = match read_submit_time(&mut msg)? {
            Some(date) => Some(date),
            None => read_transport_date(&mut msg)?,
        };

        tracing::debug!(source = %blob.source(), chars = body.len(), "Parsed Outlook message");

        Ok(vec![Record::new(body).with_metadata_map(header_metadata(subject, sender, to, date))])
    }

    fn name(&self) -> &'static str {
        "outlook_msg"
    }
}

fn read_stream<F: Read + Seek>(msg: &mut cfb::CompoundFile<F>, path: &str) -> Result<Vec<u8>> {
    let mut stream = msg.open_stream(path)?;
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    Ok(buf)
}

/// String property, stored either as UTF-16LE (type 001F) or 8-bit (001E)
fn read_string_property<F: Read + Seek>(
    msg: &mut cfb::CompoundFile<F>,
    id: u16,
) -> Result<Option<String>> {
    let unicode = format!("/__substg1.0_{:04X}001F", id);
    if msg.is_stream(&unicode) {
        let bytes = read_stream(msg, &unicode)?;
        return Ok(Some(decode_utf16le(&bytes)));
    }

    let ansi = format!("/__substg1.0_{:04X}001E", id);
    if msg.is_stream(&ansi) {
        let bytes = read_stream(msg, &ansi)?;
        return Ok(Some(String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string()));
    }

    Ok(None)
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect::<String>()
        .trim_end_matches('\0')
        .to_string()
}

/// Submit (or delivery) time from the fixed-size property stream
fn read_submit_time<F: Read + Seek>(msg: &mut cfb::CompoundFile<F>) -> Result<Option<String>> {
    if !msg.is_stream(PROPERTIES_STREAM) {
        return Ok(None);
    }
    let props = read_stream(msg, PROPERTIES_STREAM)?;
    let entries = props
        .get(TOP_LEVEL_PROPERTIES_HEADER..)
        .unwrap_or_default()
        .chunks_exact(PROPERTY_ENTRY_LEN);

    let mut delivery = None;
    for entry in entries {
        let tag = u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
        let (id, prop_type) = ((tag >> 16) as u16, (tag & 0xFFFF) as u16);
        if prop_type != PT_SYSTIME {
            continue;
        }
        let mut value = [0u8; 8];
        value.copy_from_slice(&entry[8..16]);
        let filetime = u64::from_le_bytes(value);
        match id {
            PR_CLIENT_SUBMIT_TIME => return Ok(filetime_to_rfc2822(filetime)),
            PR_MESSAGE_DELIVERY_TIME => delivery = filetime_to_rfc2822(filetime),
            _ => {}
        }
    }
    Ok(delivery)
}

/// `Date:` line of the original transport headers, when the message kept them
fn read_transport_date<F: Read + Seek>(msg: &mut cfb::CompoundFile<F>) -> Result<Option<String>> {
    let Some(raw) = read_string_property(msg, PR_TRANSPORT_MESSAGE_HEADERS)? else {
        return Ok(None);
    };
    let (headers, _) = mailparse::parse_headers(raw.as_bytes())?;
    Ok(headers.get_first_value("Date"))
}

/// Windows FILETIME (100ns ticks since 1601-01-01) to an RFC 2822 date
fn filetime_to_rfc2822(filetime: u64) -> Option<String> {
    const UNIX_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;
    let secs = (filetime / 10_000_000) as i64 - UNIX_EPOCH_OFFSET_SECS;
    let nanos = ((filetime % 10_000_000) * 100) as u32;
    chrono::DateTime::<chrono::Utc>::from_timestamp(secs, nanos).map(|dt| dt.to_rfc2822())
}
