//! Key-to-command mapping for the line-based driver

use crate::game::Command;
use crate::settings::Settings;

/// Key bindings configuration - supports multiple keys per command
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(char, Command)>,
}

impl KeyBindings {
    /// Parse a key name into the character the terminal delivers
    fn parse_key(s: &str) -> Option<char> {
        match s.to_lowercase().as_str() {
            "space" => Some(' '),
            "enter" => Some('\n'),
            "tab" => Some('\t'),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
        }
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        let groups: [(&[String], Command); 9] = [
            (keys.move_left.as_slice(), Command::MoveLeft),
            (keys.move_right.as_slice(), Command::MoveRight),
            (keys.soft_drop.as_slice(), Command::SoftDrop),
            (keys.hard_drop.as_slice(), Command::HardDrop),
            (keys.rotate_cw.as_slice(), Command::RotateCw),
            (keys.rotate_ccw.as_slice(), Command::RotateCcw),
            (keys.hold.as_slice(), Command::Hold),
            (keys.respawn.as_slice(), Command::ForceRespawn),
            (keys.quit.as_slice(), Command::Quit),
        ];

        let mut bindings = Vec::new();
        for (names, command) in groups {
            for name in names {
                match Self::parse_key(name) {
                    Some(key) => bindings.push((key, command)),
                    None => tracing::warn!("Unrecognised key {:?} for {:?}", name, command),
                }
            }
        }
        Self { bindings }
    }

    /// Command bound to `key`, if any; the first binding wins
    pub fn command_for(&self, key: char) -> Option<Command> {
        self.bindings
            .iter()
            .find(|&&(bound, _)| bound == key)
            .map(|&(_, command)| command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
