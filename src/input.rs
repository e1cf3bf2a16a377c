//! Input translation: keys and pointer gestures to game actions
//!
//! Terminal mouse drags stand in for touch swipes: a tap rotates, a
//! sideways swipe moves, and a downward swipe starts a timed fast drop.

use crate::game::Action;
use crate::settings::{Settings, TouchSettings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::{Duration, Instant};
use tracing::debug;

/// What the frontend should do in response to an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    Quit,
}

/// Key bindings configuration - supports multiple keys per command
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub drop: Vec<KeyCode>,
    pub accelerate: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    debug!("Ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            rotate: Self::parse_keys(&settings.keys.rotate),
            drop: Self::parse_keys(&settings.keys.drop),
            accelerate: Self::parse_keys(&settings.keys.accelerate),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

/// Pointer press being tracked as a possible swipe
#[derive(Debug, Clone, Copy)]
struct Gesture {
    column: u16,
    row: u16,
    moved: bool,
}

/// Time-limited acceleration; the game itself never turns it off
#[derive(Debug, Clone)]
struct FastDrop {
    duration: Duration,
    deadline: Option<Instant>,
}

impl FastDrop {
    fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    /// True exactly once, on the first check at or after the deadline
    fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Input handler
pub struct InputHandler {
    bindings: KeyBindings,
    touch: TouchSettings,
    gesture: Option<Gesture>,
    fast_drop: FastDrop,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
            touch: settings.touch.clone(),
            gesture: None,
            fast_drop: FastDrop {
                duration: settings.gameplay.fast_drop_duration(),
                deadline: None,
            },
        }
    }

    /// Handle a key press event
    pub fn key_down(&mut self, key: KeyEvent) -> Vec<Input> {
        let mut inputs = Vec::new();

        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            inputs.push(Input::Quit);
            return inputs;
        }

        let code = normalize_key(key.code);

        if self.bindings.move_left.contains(&code) {
            inputs.push(Input::Action(Action::MoveLeft));
        } else if self.bindings.move_right.contains(&code) {
            inputs.push(Input::Action(Action::MoveRight));
        } else if self.bindings.rotate.contains(&code) {
            inputs.push(Input::Action(Action::Rotate));
        } else if self.bindings.drop.contains(&code) {
            inputs.push(Input::Action(Action::Drop));
        } else if self.bindings.accelerate.contains(&code) {
            self.fast_drop.arm(Instant::now());
            inputs.push(Input::Action(Action::Accelerate));
        } else if self.bindings.quit.contains(&code) {
            inputs.push(Input::Quit);
        }

        inputs
    }

    /// Handle a mouse event, treating left-button drags as swipes
    pub fn mouse(&mut self, event: MouseEvent) -> Vec<Input> {
        let mut inputs = Vec::new();

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.gesture = Some(Gesture {
                    column: event.column,
                    row: event.row,
                    moved: false,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(gesture) = &mut self.gesture {
                    gesture.moved = true;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(gesture) = self.gesture.take() {
                    if let Some(action) = self.classify(gesture, event.column, event.row) {
                        if action == Action::Accelerate {
                            self.fast_drop.arm(Instant::now());
                        }
                        inputs.push(Input::Action(action));
                    }
                }
            }
            _ => {}
        }

        inputs
    }

    /// Turn a finished press into an action
    fn classify(&self, gesture: Gesture, column: u16, row: u16) -> Option<Action> {
        if !gesture.moved {
            return Some(Action::Rotate);
        }

        let dx = i32::from(column) - i32::from(gesture.column);
        let dy = i32::from(row) - i32::from(gesture.row);

        if dx.abs() > dy.abs() {
            if dx > i32::from(self.touch.swipe_cols) {
                Some(Action::MoveRight)
            } else if dx < -i32::from(self.touch.swipe_cols) {
                Some(Action::MoveLeft)
            } else {
                None
            }
        } else if dy > i32::from(self.touch.swipe_rows) {
            Some(Action::Accelerate)
        } else {
            None
        }
    }

    /// Check timers (call every frame)
    pub fn update(&mut self, now: Instant) -> Vec<Input> {
        let mut inputs = Vec::new();
        if self.fast_drop.expire(now) {
            inputs.push(Input::Action(Action::Decelerate));
        }
        inputs
    }

    /// Forget any in-progress gesture and pending fast drop
    pub fn clear(&mut self) {
        self.gesture = None;
        self.fast_drop.deadline = None;
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn handler() -> InputHandler {
        InputHandler::from_settings(&Settings::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn swipe(input: &mut InputHandler, from: (u16, u16), to: (u16, u16)) -> Vec<Input> {
        input.mouse(mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1));
        input.mouse(mouse(MouseEventKind::Drag(MouseButton::Left), to.0, to.1));
        input.mouse(mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1))
    }

    #[test]
    fn test_default_keys() {
        let mut input = handler();
        assert_eq!(input.key_down(key(KeyCode::Left)), vec![Input::Action(Action::MoveLeft)]);
        assert_eq!(input.key_down(key(KeyCode::Right)), vec![Input::Action(Action::MoveRight)]);
        assert_eq!(input.key_down(key(KeyCode::Up)), vec![Input::Action(Action::Rotate)]);
        assert_eq!(input.key_down(key(KeyCode::Down)), vec![Input::Action(Action::Drop)]);
        assert_eq!(input.key_down(key(KeyCode::Char('F'))), vec![Input::Action(Action::Accelerate)]);
        assert_eq!(input.key_down(key(KeyCode::Esc)), vec![Input::Quit]);
        assert!(input.key_down(key(KeyCode::Char('z'))).is_empty());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut input = handler();
        let event = KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(input.key_down(event), vec![Input::Quit]);
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["x".to_string(), "Space".to_string(), "bogus".to_string()];
        let mut input = InputHandler::from_settings(&settings);
        assert_eq!(input.key_down(key(KeyCode::Char('x'))), vec![Input::Action(Action::Rotate)]);
        assert_eq!(input.key_down(key(KeyCode::Char(' '))), vec![Input::Action(Action::Rotate)]);
        assert!(input.key_down(key(KeyCode::Up)).is_empty());
    }

    #[test]
    fn test_tap_rotates() {
        let mut input = handler();
        input.mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        let inputs = input.mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 10));
        assert_eq!(inputs, vec![Input::Action(Action::Rotate)]);
    }

    #[test]
    fn test_horizontal_swipes() {
        let mut input = handler();
        assert_eq!(swipe(&mut input, (10, 10), (14, 11)), vec![Input::Action(Action::MoveRight)]);
        assert_eq!(swipe(&mut input, (10, 10), (6, 10)), vec![Input::Action(Action::MoveLeft)]);
        // Too short
        assert!(swipe(&mut input, (10, 10), (12, 10)).is_empty());
    }

    #[test]
    fn test_downward_swipe_accelerates_then_expires() {
        let mut input = handler();
        let start = Instant::now();
        assert_eq!(swipe(&mut input, (10, 10), (10, 14)), vec![Input::Action(Action::Accelerate)]);
        // Upward swipes do nothing
        assert!(swipe(&mut input, (10, 14), (10, 10)).is_empty());

        assert!(input.update(start).is_empty());
        let later = Instant::now() + Duration::from_millis(3000);
        assert_eq!(input.update(later), vec![Input::Action(Action::Decelerate)]);
        assert!(input.update(later + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = handler();
        assert!(input.mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3, 3)).is_empty());
    }

    #[test]
    fn test_clear_cancels_fast_drop() {
        let mut input = handler();
        input.key_down(key(KeyCode::Char('f')));
        input.clear();
        assert!(input.update(Instant::now() + Duration::from_secs(10)).is_empty());
    }
}
