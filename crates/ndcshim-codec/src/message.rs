use bytes::{BufMut, Bytes, BytesMut};

use crate::separators::Separators;

/// A parsed protocol message: an ordered sequence of text fields.
///
/// A `Message` has no identity beyond a single intercept call: it is built
/// from the boundary buffer, transformed, encoded back, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    fields: Vec<String>,
}

impl Message {
    /// Parse a raw message at the field level.
    ///
    /// Returns `None` for empty input or input that is not valid text;
    /// callers treat that as a pass-through, not an error.
    pub fn parse(bytes: &[u8], seps: Separators) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }

        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(%err, "message is not valid text, passing through");
                return None;
            }
        };

        let fields = text
            .split(seps.field as char)
            .map(str::to_owned)
            .collect();

        Some(Self { fields })
    }

    /// Build a message directly from fields (test fixtures, mostly).
    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the message has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow a field by index.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Mutably borrow a field by index.
    pub fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.fields.get_mut(index)
    }

    /// All fields in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Encode back to the wire form.
    ///
    /// Round-trip law: for any input without raw separator bytes inside
    /// content, `Message::parse(m, seps).encode(seps) == m`.
    pub fn encode(&self, seps: Separators) -> Bytes {
        let mut buf = BytesMut::with_capacity(
            self.fields.iter().map(String::len).sum::<usize>() + self.fields.len(),
        );

        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                buf.put_u8(seps.field);
            }
            buf.put_slice(field.as_bytes());
        }

        buf.freeze()
    }
}

/// Split a field into its group entries.
///
/// A field without group separators is its own single entry; an empty field
/// yields one empty entry, which mirrors how the wire form reads.
pub fn split_group(field: &str, seps: Separators) -> Vec<&str> {
    field.split(seps.group as char).collect()
}

/// Join group entries back into a field.
pub fn join_group<S: AsRef<str>>(entries: &[S], seps: Separators) -> String {
    let mut out = String::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push(seps.group as char);
        }
        out.push_str(entry.as_ref());
    }

    out
}
