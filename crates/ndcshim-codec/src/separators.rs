/// Default field separator: ASCII FS (0x1C).
pub const DEFAULT_FIELD_SEPARATOR: u8 = 0x1C;

/// Default group separator: ASCII GS (0x1D).
pub const DEFAULT_GROUP_SEPARATOR: u8 = 0x1D;

/// The pair of control bytes delimiting message structure.
///
/// Separator bytes never occur inside field or entry content; the deployed
/// protocol revision decides their values. Both bytes must be ASCII: values
/// of 0x80 and above are continuation bytes in UTF-8 text and can never
/// match a whole character, so the codec would stop splitting on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    /// Byte dividing a message into fields.
    pub field: u8,
    /// Byte dividing a field into group entries.
    pub group: u8,
}

impl Separators {
    /// Create a separator pair. Callers are expected to pass ASCII bytes;
    /// see [`Separators::is_ascii`].
    pub fn new(field: u8, group: u8) -> Self {
        Self { field, group }
    }

    /// Whether both separator bytes are ASCII and therefore matchable in
    /// UTF-8 message text.
    pub fn is_ascii(&self) -> bool {
        self.field.is_ascii() && self.group.is_ascii()
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            field: DEFAULT_FIELD_SEPARATOR,
            group: DEFAULT_GROUP_SEPARATOR,
        }
    }
}
