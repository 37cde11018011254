use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::events::InputEvent;

/// Converts a crossterm event into a visualizer event.
///
/// Mouse positions become the center of the terminal cell under the pointer, in terminal
/// cell units.
pub fn convert_event(event: CrossTermEvent) -> Option<InputEvent> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(InputEvent::Exit),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Some(InputEvent::PlayPause),
            KeyEvent {
                code: KeyCode::Char('g'),
                ..
            } => Some(InputEvent::ToggleGridlines),
            _ => None,
        },
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(InputEvent::Click {
            x: column as f64 + 0.5,
            y: row as f64 + 0.5,
        }),
        CrossTermEvent::Resize(..) => Some(InputEvent::Resize),
        _ => None,
    }
}
