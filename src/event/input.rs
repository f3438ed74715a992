//! Input event types, decoupled from crossterm.
//!
//! Defines [`InputEvent`], [`KeyEvent`], [`MouseEvent`], [`TouchEvent`] and the
//! unified [`PointerEvent`] the split pane consumes. Mouse and touch input are
//! normalised into pointer phases so the drag controller handles both the same
//! way. Crossterm events are converted with [`from_crossterm`]; touch events
//! have no crossterm counterpart and are constructed by hosts that have them.

use std::ops::BitOr;

// ---------------------------------------------------------------------------
// Key / Modifiers / KeyEvent
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key event with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
}

/// A mouse event with action and absolute cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// A left-button event of the given kind with no modifiers.
    pub fn left(kind: MouseAction, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Touch contact phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single-contact touch event at an absolute cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: i32,
    pub y: i32,
}

// ---------------------------------------------------------------------------
// Pointer (normalised mouse + touch)
// ---------------------------------------------------------------------------

/// Which device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Pointer phase shared by mouse and touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (capture lost, touch cancelled).
    Cancel,
}

/// A device-independent pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub kind: PointerKind,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(phase: PointerPhase, kind: PointerKind, x: i32, y: i32) -> Self {
        Self { phase, kind, x, y }
    }
}

impl MouseEvent {
    /// Normalise into a pointer event.
    ///
    /// Only the primary (left) button participates in pointer interaction;
    /// other buttons return `None`. Hover moves are reported as `Move` so
    /// hosts without drag reporting still drive a drag.
    pub fn to_pointer(self) -> Option<PointerEvent> {
        let phase = match self.kind {
            MouseAction::Down(MouseBtn::Left) => PointerPhase::Down,
            MouseAction::Up(MouseBtn::Left) => PointerPhase::Up,
            MouseAction::Drag(MouseBtn::Left) | MouseAction::Moved => PointerPhase::Move,
            _ => return None,
        };
        Some(PointerEvent::new(phase, PointerKind::Mouse, self.x, self.y))
    }
}

impl TouchEvent {
    /// Normalise into a pointer event.
    pub fn to_pointer(self) -> PointerEvent {
        let phase = match self.phase {
            TouchPhase::Start => PointerPhase::Down,
            TouchPhase::Move => PointerPhase::Move,
            TouchPhase::End => PointerPhase::Up,
            TouchPhase::Cancel => PointerPhase::Cancel,
        };
        PointerEvent::new(phase, PointerKind::Touch, self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Touch(TouchEvent),
    FocusGained,
    FocusLost,
}

impl InputEvent {
    /// The pointer view of this event, if it is a primary mouse or touch event.
    pub fn as_pointer(&self) -> Option<PointerEvent> {
        match self {
            InputEvent::Mouse(me) => me.to_pointer(),
            InputEvent::Touch(te) => Some(te.to_pointer()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// crossterm conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

fn convert_key(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(key)
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseBtn {
    match b {
        crossterm::event::MouseButton::Left => MouseBtn::Left,
        crossterm::event::MouseButton::Right => MouseBtn::Right,
        crossterm::event::MouseButton::Middle => MouseBtn::Middle,
    }
}

/// Convert a crossterm `Event` into an [`InputEvent`].
///
/// Returns `None` for events the split pane has no use for: key releases,
/// unmapped keys, scroll wheels, terminal resizes (container size arrives
/// through the observer registry instead) and pastes.
pub fn from_crossterm(event: crossterm::event::Event) -> Option<InputEvent> {
    use crossterm::event::{Event, KeyEventKind, MouseEventKind};

    match event {
        Event::Key(ke) => {
            if ke.kind == KeyEventKind::Release {
                return None;
            }
            let code = convert_key(ke.code)?;
            Some(InputEvent::Key(KeyEvent::new(code, convert_modifiers(ke.modifiers))))
        }
        Event::Mouse(me) => {
            let kind = match me.kind {
                MouseEventKind::Down(b) => MouseAction::Down(convert_mouse_button(b)),
                MouseEventKind::Up(b) => MouseAction::Up(convert_mouse_button(b)),
                MouseEventKind::Drag(b) => MouseAction::Drag(convert_mouse_button(b)),
                MouseEventKind::Moved => MouseAction::Moved,
                _ => return None,
            };
            Some(InputEvent::Mouse(MouseEvent {
                kind,
                x: i32::from(me.column),
                y: i32::from(me.row),
                modifiers: convert_modifiers(me.modifiers),
            }))
        }
        Event::FocusGained => Some(InputEvent::FocusGained),
        Event::FocusLost => Some(InputEvent::FocusLost),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
