//! Staggered reveal/hide of the dependent setting sections.
//!
//! Turning the master switch on shows the key settings first, then the
//! mouse switch, then (if enabled) the mouse settings, 150 ms apart. Turning
//! it off hides them in the same order.

use crate::config::REVEAL_STAGGER_MS;
use crate::sync::{Reflect, Timer};
use crate::{Configuration, SettingKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Keys,
    MouseSwitch,
    MouseSettings,
}

/// Which sections are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionVisibility {
    pub keys: bool,
    pub mouse_switch: bool,
    pub mouse_settings: bool,
}

impl SectionVisibility {
    pub fn set(&mut self, section: Section, visible: bool) {
        match section {
            Section::Keys => self.keys = visible,
            Section::MouseSwitch => self.mouse_switch = visible,
            Section::MouseSettings => self.mouse_settings = visible,
        }
    }

    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::Keys => self.keys,
            Section::MouseSwitch => self.mouse_switch,
            Section::MouseSettings => self.mouse_settings,
        }
    }

    /// Controls in `section` accept input only while it is shown and no save
    /// holds the lock.
    pub fn is_interactive(&self, section: Section, locked: bool) -> bool {
        !locked && self.is_visible(section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    /// Wait before applying this step, relative to the previous one.
    pub delay_ms: u32,
    pub section: Section,
    pub visible: bool,
}

/// Steps to run after `config` was loaded or committed.
pub fn plan(config: &Configuration, cause: Reflect) -> Vec<RevealStep> {
    match cause {
        Reflect::Loaded | Reflect::Committed(SettingKey::Enable) => {
            let on = config.enable;
            vec![
                RevealStep {
                    delay_ms: 0,
                    section: Section::Keys,
                    visible: on,
                },
                RevealStep {
                    delay_ms: REVEAL_STAGGER_MS,
                    section: Section::MouseSwitch,
                    visible: on,
                },
                RevealStep {
                    delay_ms: REVEAL_STAGGER_MS,
                    section: Section::MouseSettings,
                    visible: on && config.mouse_move_enable,
                },
            ]
        }
        Reflect::Committed(SettingKey::MouseMoveEnable) => vec![RevealStep {
            delay_ms: 0,
            section: Section::MouseSettings,
            visible: config.enable && config.mouse_move_enable,
        }],
        Reflect::Committed(_) => Vec::new(),
    }
}

/// Run `steps` in order, sleeping on `timer` between them.
pub async fn play<T, F>(steps: &[RevealStep], timer: &T, mut apply: F)
where
    T: Timer,
    F: FnMut(Section, bool),
{
    for step in steps {
        if step.delay_ms > 0 {
            timer.sleep(step.delay_ms).await;
        }
        apply(step.section, step.visible);
    }
}

/// Visibility `elapsed_ms` after `steps` started playing from `start`.
pub fn visibility_at(
    start: SectionVisibility,
    steps: &[RevealStep],
    elapsed_ms: u64,
) -> SectionVisibility {
    let mut shown = start;
    let mut at = 0u64;
    for step in steps {
        at += step.delay_ms as u64;
        if at > elapsed_ms {
            break;
        }
        shown.set(step.section, step.visible);
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[derive(Default)]
    struct VirtualClock {
        now: Cell<u64>,
    }

    impl Timer for VirtualClock {
        async fn sleep(&self, ms: u32) {
            self.now.set(self.now.get() + ms as u64);
        }
    }

    fn timeline(config: &Configuration, cause: Reflect) -> Vec<(u64, Section, bool)> {
        let clock = VirtualClock::default();
        let mut seen = Vec::new();
        block_on(play(&plan(config, cause), &clock, |section, visible| {
            seen.push((clock.now.get(), section, visible))
        }));
        seen
    }

    #[test]
    fn master_on_reveals_sections_in_order() {
        let config = Configuration {
            enable: true,
            mouse_move_enable: true,
            ..Configuration::default()
        };
        assert_eq!(
            timeline(&config, Reflect::Committed(SettingKey::Enable)),
            vec![
                (0, Section::Keys, true),
                (150, Section::MouseSwitch, true),
                (300, Section::MouseSettings, true),
            ]
        );
    }

    #[test]
    fn master_off_hides_everything() {
        let config = Configuration {
            enable: false,
            mouse_move_enable: true,
            ..Configuration::default()
        };
        let seen = timeline(&config, Reflect::Loaded);
        assert!(seen.iter().all(|&(_, _, visible)| !visible));
        assert_eq!(seen.last().map(|s| s.0), Some(300));
    }

    #[test]
    fn mouse_switch_toggles_immediately() {
        let config = Configuration {
            enable: true,
            mouse_move_enable: true,
            ..Configuration::default()
        };
        assert_eq!(
            timeline(&config, Reflect::Committed(SettingKey::MouseMoveEnable)),
            vec![(0, Section::MouseSettings, true)]
        );
    }

    #[test]
    fn numeric_commits_do_not_animate() {
        let config = Configuration::default();
        assert!(plan(&config, Reflect::Committed(SettingKey::MouseMoveRadiusPx)).is_empty());
        assert!(plan(&config, Reflect::Committed(SettingKey::Preset)).is_empty());
    }

    #[test]
    fn visibility_tracks_applied_steps() {
        let mut sections = SectionVisibility::default();
        for step in plan(
            &Configuration {
                enable: true,
                mouse_move_enable: false,
                ..Configuration::default()
            },
            Reflect::Loaded,
        ) {
            sections.set(step.section, step.visible);
        }
        assert!(sections.is_visible(Section::Keys));
        assert!(sections.is_visible(Section::MouseSwitch));
        assert!(!sections.is_visible(Section::MouseSettings));
    }

    #[test]
    fn hidden_or_locked_sections_reject_input() {
        let mut sections = SectionVisibility::default();
        assert!(!sections.is_interactive(Section::MouseSwitch, false));

        sections.set(Section::MouseSwitch, true);
        assert!(sections.is_interactive(Section::MouseSwitch, false));
        assert!(!sections.is_interactive(Section::MouseSwitch, true));
    }

    #[test]
    fn mouse_switch_becomes_interactive_at_the_stagger() {
        let config = Configuration {
            enable: true,
            mouse_move_enable: false,
            ..Configuration::default()
        };
        let steps = plan(&config, Reflect::Committed(SettingKey::Enable));
        let hidden = SectionVisibility::default();

        let before = visibility_at(hidden, &steps, 149);
        assert!(before.is_interactive(Section::Keys, false));
        assert!(!before.is_interactive(Section::MouseSwitch, false));

        let after = visibility_at(hidden, &steps, 150);
        assert!(after.is_interactive(Section::MouseSwitch, false));
        assert!(!after.is_interactive(Section::MouseSettings, false));
    }

    #[test]
    fn hiding_disables_sections_in_stagger_order() {
        let shown = SectionVisibility {
            keys: true,
            mouse_switch: true,
            mouse_settings: true,
        };
        let config = Configuration {
            enable: false,
            ..Configuration::default()
        };
        let steps = plan(&config, Reflect::Committed(SettingKey::Enable));

        let mid = visibility_at(shown, &steps, 200);
        assert!(!mid.is_interactive(Section::Keys, false));
        assert!(!mid.is_interactive(Section::MouseSwitch, false));
        assert!(mid.is_interactive(Section::MouseSettings, false));

        let done = visibility_at(shown, &steps, 300);
        assert_eq!(done, SectionVisibility::default());
    }
}
