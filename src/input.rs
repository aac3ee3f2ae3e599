use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::recipe::{Method, ShotSize};
use crate::session::Step;

/// Everything a user can ask of the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectMethod(Method),
    SelectShot(ShotSize),
    SelectCups(u8),
    AdjustGrams(i64),
    NudgeGrams(i32),
    Confirm,
    Reset,
    Quit,
}

/// Translate a key press into an action for the given step. Keys that mean
/// nothing on the current screen map to `None`.
pub fn action_for_key(step: Step, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(Action::Reset),
        _ => {}
    }

    match step {
        Step::Start => match key.code {
            KeyCode::Char('1') | KeyCode::Char('e') => Some(Action::SelectMethod(Method::Espresso)),
            KeyCode::Char('2') | KeyCode::Char('f') => Some(Action::SelectMethod(Method::Filter)),
            KeyCode::Char('3') | KeyCode::Char('c') => Some(Action::SelectMethod(Method::ColdBrew)),
            _ => None,
        },
        Step::EspressoShot => match key.code {
            KeyCode::Char('1') | KeyCode::Char('s') => Some(Action::SelectShot(ShotSize::Single)),
            KeyCode::Char('2') | KeyCode::Char('d') => Some(Action::SelectShot(ShotSize::Double)),
            _ => None,
        },
        Step::FilterCups => match key.code {
            KeyCode::Char(c @ '1'..='3') => c.to_digit(10).map(|n| Action::SelectCups(n as u8)),
            _ => None,
        },
        Step::FilterSlider | Step::ColdbrewGrams => match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => Some(Action::NudgeGrams(-1)),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => Some(Action::NudgeGrams(1)),
            KeyCode::Home => Some(Action::AdjustGrams(i64::MIN)),
            KeyCode::End => Some(Action::AdjustGrams(i64::MAX)),
            KeyCode::Enter => Some(Action::Confirm),
            _ => None,
        },
        Step::EspressoInstruction | Step::FilterReady => match key.code {
            KeyCode::Enter => Some(Action::Confirm),
            _ => None,
        },
        Step::FilterBrew | Step::ColdbrewInstruction => None,
    }
}

/// Key hints shown at the bottom of each screen.
pub fn legend(step: Step) -> &'static str {
    match step {
        Step::Start => "(1) эспрессо / (2) фильтр / (3) колд-брю / (esc) выход",
        Step::EspressoShot => "(1) одиночный / (2) двойной / (r) сначала / (esc) выход",
        Step::FilterCups => "(1) (2) (3) чашки / (r) сначала / (esc) выход",
        Step::FilterSlider | Step::ColdbrewGrams => {
            "(←/→) граммы / (enter) далее / (r) сначала / (esc) выход"
        }
        Step::EspressoInstruction | Step::FilterReady => {
            "(enter) всё готово / (r) сначала / (esc) выход"
        }
        Step::FilterBrew | Step::ColdbrewInstruction => "(r) сначала / (esc) выход",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_and_reset_work_everywhere() {
        for step in Step::ALL {
            assert_eq!(action_for_key(step, key(KeyCode::Esc)), Some(Action::Quit));
            assert_eq!(
                action_for_key(step, key(KeyCode::Char('r'))),
                Some(Action::Reset)
            );
            let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(action_for_key(step, ctrl_c), Some(Action::Quit));
        }
    }

    #[test]
    fn test_start_keys() {
        assert_eq!(
            action_for_key(Step::Start, key(KeyCode::Char('1'))),
            Some(Action::SelectMethod(Method::Espresso))
        );
        assert_eq!(
            action_for_key(Step::Start, key(KeyCode::Char('f'))),
            Some(Action::SelectMethod(Method::Filter))
        );
        assert_eq!(
            action_for_key(Step::Start, key(KeyCode::Char('c'))),
            Some(Action::SelectMethod(Method::ColdBrew))
        );
        assert_eq!(action_for_key(Step::Start, key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_cup_keys() {
        assert_eq!(
            action_for_key(Step::FilterCups, key(KeyCode::Char('2'))),
            Some(Action::SelectCups(2))
        );
        assert_eq!(
            action_for_key(Step::FilterCups, key(KeyCode::Char('4'))),
            None
        );
    }

    #[test]
    fn test_slider_keys() {
        assert_eq!(
            action_for_key(Step::ColdbrewGrams, key(KeyCode::Left)),
            Some(Action::NudgeGrams(-1))
        );
        assert_eq!(
            action_for_key(Step::FilterSlider, key(KeyCode::Char('+'))),
            Some(Action::NudgeGrams(1))
        );
        assert_eq!(
            action_for_key(Step::FilterSlider, key(KeyCode::Enter)),
            Some(Action::Confirm)
        );
        assert_eq!(action_for_key(Step::FilterReady, key(KeyCode::Left)), None);
    }

    #[test]
    fn test_brewing_screens_ignore_enter() {
        assert_eq!(action_for_key(Step::FilterBrew, key(KeyCode::Enter)), None);
        assert_eq!(
            action_for_key(Step::ColdbrewInstruction, key(KeyCode::Enter)),
            None
        );
    }

    #[test]
    fn test_every_step_has_a_legend() {
        for step in Step::ALL {
            assert!(!legend(step).is_empty());
        }
    }
}
