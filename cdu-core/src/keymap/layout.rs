//! Fixed physical-to-logical key layout
//!
//! Names follow the DCS-BIOS A-10C CDU input identifiers. Rockers occupy
//! two positions, one per side; each side reports its own value on press
//! and the shared centre value on release.

use super::sample::{MATRIX_COLS, MATRIX_ROWS};

/// What sits at one matrix position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    /// No physical key
    Absent,
    /// Momentary key; events carry the raw level
    Simple(&'static str),
    /// Key whose press and release map to fixed values
    ThreeWay(&'static str, i32, i32),
}

impl KeyBinding {
    /// Logical name, if a key is present
    pub fn name(&self) -> Option<&'static str> {
        match self {
            KeyBinding::Absent => None,
            KeyBinding::Simple(name) | KeyBinding::ThreeWay(name, _, _) => Some(*name),
        }
    }

    /// Event value for a new level at this position
    pub fn value(&self, level: u8) -> Option<i32> {
        match self {
            KeyBinding::Absent => None,
            KeyBinding::Simple(_) => Some(i32::from(level)),
            KeyBinding::ThreeWay(_, down, up) => Some(if level != 0 { *down } else { *up }),
        }
    }
}

/// Immutable mapping from (row, column) to binding
#[derive(Debug)]
pub struct KeyMatrixLayout {
    bindings: [[KeyBinding; MATRIX_COLS]; MATRIX_ROWS],
}

impl KeyMatrixLayout {
    /// Wrap a binding table
    pub const fn new(bindings: [[KeyBinding; MATRIX_COLS]; MATRIX_ROWS]) -> Self {
        Self { bindings }
    }

    /// Binding at a position; out of range is `Absent`
    pub fn binding(&self, row: usize, col: usize) -> KeyBinding {
        self.bindings
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(KeyBinding::Absent)
    }

    /// Check whether any position emits `name`
    pub fn contains(&self, name: &str) -> bool {
        self.bindings
            .iter()
            .flatten()
            .any(|b| b.name() == Some(name))
    }

}

use KeyBinding::{Absent, Simple, ThreeWay};

/// The A-10C CDU keyboard as wired to the matrix
pub static CDU_LAYOUT: KeyMatrixLayout = KeyMatrixLayout::new([
    // Line select keys
    [
        Simple("CDU_LSK_3L"),
        Simple("CDU_LSK_5L"),
        Simple("CDU_LSK_7L"),
        Simple("CDU_LSK_9L"),
        Simple("CDU_LSK_3R"),
        Simple("CDU_LSK_5R"),
        Simple("CDU_LSK_7R"),
        Simple("CDU_LSK_9R"),
    ],
    // Function keys and brightness rocker
    [
        Simple("CDU_SYS"),
        Simple("CDU_NAV"),
        Simple("CDU_WP"),
        Simple("CDU_OSET"),
        Simple("CDU_FPM"),
        Simple("CDU_PREV"),
        ThreeWay("CDU_BRT", 2, 1),
        ThreeWay("CDU_BRT", 0, 1),
    ],
    [
        Simple("CDU_1"),
        Simple("CDU_2"),
        Simple("CDU_3"),
        Simple("CDU_4"),
        Simple("CDU_5"),
        Simple("CDU_6"),
        Simple("CDU_7"),
        Simple("CDU_8"),
    ],
    [
        Simple("CDU_9"),
        Simple("CDU_0"),
        Simple("CDU_POINT"),
        Simple("CDU_SLASH"),
        Simple("CDU_A"),
        Simple("CDU_B"),
        Simple("CDU_C"),
        Simple("CDU_D"),
    ],
    [
        Simple("CDU_E"),
        Simple("CDU_F"),
        Simple("CDU_G"),
        Simple("CDU_H"),
        Simple("CDU_I"),
        Simple("CDU_J"),
        Simple("CDU_K"),
        Simple("CDU_L"),
    ],
    [
        Simple("CDU_M"),
        Simple("CDU_N"),
        Simple("CDU_O"),
        Simple("CDU_P"),
        Simple("CDU_Q"),
        Simple("CDU_R"),
        Simple("CDU_S"),
        Simple("CDU_T"),
    ],
    [
        Simple("CDU_U"),
        Simple("CDU_V"),
        Simple("CDU_W"),
        Simple("CDU_X"),
        Simple("CDU_Y"),
        Simple("CDU_Z"),
        Simple("CDU_SPC"),
        Simple("CDU_CLR"),
    ],
    // Editing keys, page/scroll/data rockers
    [
        Simple("CDU_MK"),
        Simple("CDU_BCK"),
        Simple("CDU_FA"),
        ThreeWay("CDU_PG", 2, 1),
        ThreeWay("CDU_PG", 0, 1),
        ThreeWay("CDU_SCROLL", 0, 1),
        ThreeWay("CDU_SCROLL", 2, 1),
        ThreeWay("CDU_DATA", 2, 1),
    ],
    // GPIO row
    [
        ThreeWay("CDU_DATA", 0, 1),
        Absent,
        Absent,
        Absent,
        Absent,
        Absent,
        Absent,
        Absent,
    ],
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_value_is_level() {
        let key = KeyBinding::Simple("CDU_A");
        assert_eq!(key.value(1), Some(1));
        assert_eq!(key.value(0), Some(0));
        assert_eq!(key.name(), Some("CDU_A"));
    }

    #[test]
    fn test_three_way_values() {
        let key = KeyBinding::ThreeWay("CDU_PG", 2, 1);
        assert_eq!(key.value(1), Some(2));
        assert_eq!(key.value(0), Some(1));
    }

    #[test]
    fn test_absent_has_no_value() {
        assert_eq!(KeyBinding::Absent.value(1), None);
        assert_eq!(KeyBinding::Absent.name(), None);
    }

    #[test]
    fn test_layout_shape() {
        let keys = (0..MATRIX_ROWS)
            .flat_map(|row| (0..MATRIX_COLS).map(move |col| CDU_LAYOUT.binding(row, col)))
            .filter(|b| *b != KeyBinding::Absent)
            .count();
        assert_eq!(keys, 65);
        assert_eq!(CDU_LAYOUT.binding(0, 0), KeyBinding::Simple("CDU_LSK_3L"));
        assert_eq!(CDU_LAYOUT.binding(8, 1), KeyBinding::Absent);
        assert_eq!(CDU_LAYOUT.binding(9, 0), KeyBinding::Absent);
    }

    #[test]
    fn test_layout_has_ui_keys() {
        assert!(CDU_LAYOUT.contains("CDU_FA"));
        assert!(CDU_LAYOUT.contains("CDU_PG"));
        assert!(!CDU_LAYOUT.contains("CDU_NOPE"));
    }
}
