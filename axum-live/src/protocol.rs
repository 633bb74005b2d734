//! Messages exchanged with the browser client over the session socket.
//!
//! The client sends one [`ClientEvent`] per DOM event it forwards; the server
//! answers with [`ServerMessage`]s.
//!
//! ```text
//! -> {"version":3,"path":[1,1,0,0],"kind":"click","data":{"shift_key":true}}
//! <- {"type":"patch","version":4,"patches":[{"op":"replace","path":[1,1,0],"html":"..."}]}
//! ```
//!
//! Every server message carries the session's tree version. The client echoes
//! the last version it applied so the server can tell when an event's path was
//! computed against nodes that have since moved.

use serde::{Deserialize, Serialize};

use crate::diff::Patch;

/// DOM event kinds a listener can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    /// Fired on every edit of a text input.
    Change,
    KeyPress,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
            EventKind::KeyPress => "keypress",
        }
    }
}

/// Event descriptor handed to listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventData {
    /// Key identifier for key presses, e.g. `"Enter"`.
    pub key: Option<String>,
    /// Whether shift was held during a click.
    pub shift_key: bool,
    /// Current value of the target input.
    pub value: Option<String>,
}

impl EventData {
    pub fn click() -> Self {
        Self::default()
    }

    pub fn shift_click() -> Self {
        Self {
            shift_key: true,
            ..Self::default()
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn is_key(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// The input value, empty when the event carried none.
    pub fn value_or_default(&self) -> String {
        self.value.clone().unwrap_or_default()
    }
}

/// An event forwarded by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEvent {
    /// Tree version the client had applied when the event fired.
    #[serde(default)]
    pub version: u64,
    /// Child indices from the root node to the listening element.
    pub path: Vec<usize>,
    pub kind: EventKind,
    #[serde(default)]
    pub data: EventData,
}

impl ClientEvent {
    pub fn new(path: impl Into<Vec<usize>>, kind: EventKind, data: EventData) -> Self {
        Self {
            version: 0,
            path: path.into(),
            kind,
            data,
        }
    }

    /// Stamp the event with the tree version it was computed against.
    pub fn at_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

/// Messages sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full markup of the root node, sent once when a session starts.
    Render { version: u64, html: String },
    /// Changes since the previous message; `version` is the tree version
    /// once they are applied.
    Patch { version: u64, patches: Vec<Patch> },
}
