#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Submit,
    ClearSections,
}

/// The parts of a `keydown` event the form reacts to.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    /// Set while an IME composition is open; the key belongs to the IME.
    pub composing: bool,
    pub in_question_input: bool,
}

/// Ctrl/Cmd+Enter submits from anywhere, plain Enter only from a question
/// input, Escape clears the display regions.
pub fn shortcut_for(press: &KeyPress<'_>) -> Option<ShortcutAction> {
    if press.composing {
        return None;
    }
    match press.key {
        "Enter" if press.ctrl || press.meta || press.in_question_input => {
            Some(ShortcutAction::Submit)
        }
        "Escape" => Some(ShortcutAction::ClearSections),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter() -> KeyPress<'static> {
        KeyPress {
            key: "Enter",
            ..KeyPress::default()
        }
    }

    #[test]
    fn enter_submits_from_question_inputs_only() {
        assert_eq!(shortcut_for(&enter()), None);
        assert_eq!(
            shortcut_for(&KeyPress {
                in_question_input: true,
                ..enter()
            }),
            Some(ShortcutAction::Submit)
        );
    }

    #[test]
    fn modified_enter_submits_anywhere() {
        for press in [
            KeyPress { ctrl: true, ..enter() },
            KeyPress { meta: true, ..enter() },
        ] {
            assert_eq!(shortcut_for(&press), Some(ShortcutAction::Submit));
        }
    }

    #[test]
    fn enter_confirming_an_ime_composition_does_not_submit() {
        let press = KeyPress {
            composing: true,
            in_question_input: true,
            ..enter()
        };
        assert_eq!(shortcut_for(&press), None);
        assert_eq!(shortcut_for(&KeyPress { ctrl: true, ..press }), None);
    }

    #[test]
    fn escape_clears_sections() {
        let press = KeyPress {
            key: "Escape",
            ..KeyPress::default()
        };
        assert_eq!(shortcut_for(&press), Some(ShortcutAction::ClearSections));
        assert_eq!(
            shortcut_for(&KeyPress {
                key: "a",
                ..KeyPress::default()
            }),
            None
        );
    }
}
