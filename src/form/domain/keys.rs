//! Keyboard shortcuts understood by the open form.

/// A key relevant to the form's shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// The Enter / Return key.
    Enter,
    /// A printable character.
    Char(char),
    /// Any other key.
    Other,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Command (macOS) / Super.
    pub meta: bool,
    /// Control.
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
    /// Alt / Option.
    pub alt: bool,
}

/// A key press delivered by the host's keyboard listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// Pressed key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// A press without modifiers.
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// A press with Command held.
    #[must_use]
    pub fn with_meta(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                meta: true,
                ..Modifiers::default()
            },
        }
    }

    /// A press with Control held.
    #[must_use]
    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }
}

/// Form action bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Close the form without saving.
    Cancel,
    /// Submit the draft.
    Submit,
}

/// Maps a key press to a form action.
///
/// Escape always cancels. Cmd/Ctrl+Enter submits only when `can_submit`.
#[must_use]
pub const fn interpret(press: KeyPress, can_submit: bool) -> Option<KeyAction> {
    match press.key {
        Key::Escape => Some(KeyAction::Cancel),
        Key::Enter if (press.modifiers.meta || press.modifiers.ctrl) && can_submit => {
            Some(KeyAction::Submit)
        }
        _ => None,
    }
}
