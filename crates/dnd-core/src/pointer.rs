//! Pointer geometry and modifier state of a drag event.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A position in a 2D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

bitflags! {
    /// Pressed pointer buttons, as in the DOM `MouseEvent.buttons` mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u32 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

bitflags! {
    /// Button and keyboard modifiers reported to the drag/drop manager.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DragDropModifiers: u32 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const LEFT_BUTTON = 1 << 3;
        const MIDDLE_BUTTON = 1 << 4;
        const RIGHT_BUTTON = 1 << 5;
    }
}

impl DragDropModifiers {
    pub fn from_pointer(buttons: PointerButtons, shift: bool, ctrl: bool, alt: bool) -> Self {
        let mut modifiers = Self::NONE;
        modifiers.set(Self::LEFT_BUTTON, buttons.contains(PointerButtons::LEFT));
        modifiers.set(Self::MIDDLE_BUTTON, buttons.contains(PointerButtons::MIDDLE));
        modifiers.set(Self::RIGHT_BUTTON, buttons.contains(PointerButtons::RIGHT));
        modifiers.set(Self::SHIFT, shift);
        modifiers.set(Self::CONTROL, ctrl);
        modifiers.set(Self::ALT, alt);
        modifiers
    }
}

/// A coordinate space a root position can be expressed in, usually a UI element.
pub trait RelativeTo: Send + Sync {
    /// Maps a point from the root coordinate space into this space.
    fn to_local(&self, root: Point) -> Point;
}

/// Element whose coordinate space is only translated from the root.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementOffset {
    /// Origin of the element, in root coordinates.
    pub origin: Point,
}

impl ElementOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            origin: Point::new(x, y),
        }
    }
}

impl RelativeTo for ElementOffset {
    fn to_local(&self, root: Point) -> Point {
        Point::new(root.x - self.origin.x, root.y - self.origin.y)
    }
}

/// Expresses `root` relative to `relative_to`, or returns it unchanged
/// when no element is given.
pub fn relative_position(root: Point, relative_to: Option<&dyn RelativeTo>) -> Point {
    match relative_to {
        Some(element) => element.to_local(root),
        None => root,
    }
}

/// Derives the coarse frame id from a native millisecond timestamp.
///
/// Frame ids wrap around after `u32::MAX` milliseconds (about 49 days).
pub fn frame_id(timestamp: f64) -> u32 {
    (timestamp.max(0.0) % f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_combine_buttons_and_keys() {
        let modifiers = DragDropModifiers::from_pointer(
            PointerButtons::LEFT | PointerButtons::MIDDLE,
            true,
            false,
            true,
        );

        assert_eq!(
            modifiers,
            DragDropModifiers::LEFT_BUTTON
                | DragDropModifiers::MIDDLE_BUTTON
                | DragDropModifiers::SHIFT
                | DragDropModifiers::ALT
        );
    }

    #[test]
    fn no_buttons_no_keys_is_none() {
        let modifiers =
            DragDropModifiers::from_pointer(PointerButtons::empty(), false, false, false);
        assert!(modifiers.is_empty());
    }

    #[test]
    fn relative_position_translates_into_element_space() {
        let element = ElementOffset::new(100.0, 40.0);
        let root = Point::new(130.0, 50.0);

        assert_eq!(relative_position(root, Some(&element)), Point::new(30.0, 10.0));
        assert_eq!(relative_position(root, None), root);
    }

    #[test]
    fn frame_id_wraps() {
        assert_eq!(frame_id(1234.9), 1234);
        assert_eq!(frame_id(f64::from(u32::MAX) + 5.0), 5);
        assert_eq!(frame_id(-3.0), 0);
    }
}
