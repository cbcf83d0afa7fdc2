use ndcshim_codec::Message;

/// The message types this shim knows how to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Terminal command: Enhanced Configuration Parameters Load.
    EnhancedConfigLoad,
    /// Terminal command: State Table Load.
    StateTableLoad,
    /// Transaction Request from the terminal.
    TransactionRequest,
    /// Solicited status: Send Configuration Information, hardware data.
    SendHardwareConfig,
    /// Solicited status: Send Configuration Information, supplies data.
    SendSuppliesData,
    /// Solicited status: Send Configuration Information, fitness data.
    SendFitnessData,
    /// Unsolicited status carrying fitness data.
    UnsolicitedFitnessStatus,
    /// Anything else; passes through untouched.
    Unrecognized,
}

/// How a single discriminator field is matched.
#[derive(Debug, Clone, Copy)]
enum FieldMatch {
    Exact(&'static str),
    Prefix(&'static str),
    Any,
}

impl FieldMatch {
    fn matches(self, field: Option<&str>) -> bool {
        match self {
            Self::Exact(expected) => field == Some(expected),
            Self::Prefix(prefix) => field.is_some_and(|f| f.starts_with(prefix)),
            Self::Any => true,
        }
    }
}

/// One row of the dispatch table: discriminator tuple → message type.
struct Route {
    /// Matcher for field 0 (message class/leader).
    leader: FieldMatch,
    /// Matcher for field 3.
    class: FieldMatch,
    /// Matcher for field 4.
    mode: FieldMatch,
    /// Minimum field count for the rule's target fields to exist.
    min_fields: usize,
    kind: MessageType,
}

/// First match wins; the discriminators are mutually exclusive by leader.
const ROUTES: &[Route] = &[
    Route {
        leader: FieldMatch::Prefix("3"),
        class: FieldMatch::Exact("1A"),
        mode: FieldMatch::Any,
        min_fields: 6,
        kind: MessageType::EnhancedConfigLoad,
    },
    Route {
        leader: FieldMatch::Prefix("3"),
        class: FieldMatch::Exact("12"),
        mode: FieldMatch::Any,
        min_fields: 5,
        kind: MessageType::StateTableLoad,
    },
    Route {
        leader: FieldMatch::Prefix("11"),
        class: FieldMatch::Any,
        mode: FieldMatch::Any,
        min_fields: 1,
        kind: MessageType::TransactionRequest,
    },
    Route {
        leader: FieldMatch::Exact("22"),
        class: FieldMatch::Exact("F"),
        mode: FieldMatch::Prefix("HA"),
        min_fields: 7,
        kind: MessageType::SendHardwareConfig,
    },
    Route {
        leader: FieldMatch::Exact("22"),
        class: FieldMatch::Exact("F"),
        mode: FieldMatch::Prefix("IA"),
        min_fields: 5,
        kind: MessageType::SendSuppliesData,
    },
    Route {
        leader: FieldMatch::Exact("22"),
        class: FieldMatch::Exact("F"),
        mode: FieldMatch::Prefix("JA"),
        min_fields: 5,
        kind: MessageType::SendFitnessData,
    },
    Route {
        leader: FieldMatch::Exact("12"),
        class: FieldMatch::Prefix("w"),
        mode: FieldMatch::Any,
        min_fields: 5,
        kind: MessageType::UnsolicitedFitnessStatus,
    },
];

/// Select the message type from the fixed discriminator fields.
pub fn classify(message: &Message) -> MessageType {
    for route in ROUTES {
        if message.len() >= route.min_fields
            && route.leader.matches(message.field(0))
            && route.class.matches(message.field(3))
            && route.mode.matches(message.field(4))
        {
            return route.kind;
        }
    }

    MessageType::Unrecognized
}
