//! Keystroke scripts
//!
//! Vi-keys move (`hjklyubn`), their capitals fight in that direction, `.`
//! rests, `>` enters, `<` leaves, `q`/`e` followed by a digit quaff or equip
//! that inventory slot. Whitespace is ignored.

use thiserror::Error;
use wf_core::action::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown key '{0}' at position {1}")]
    UnknownKey(char, usize),
    #[error("'{0}' at position {1} needs an inventory digit")]
    MissingSlot(char, usize),
}

/// Parse a script into commands
pub fn parse(script: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    let mut chars = script.chars().enumerate().filter(|(_, c)| !c.is_whitespace());

    while let Some((at, c)) = chars.next() {
        let command = match c {
            '.' => Command::Rest,
            '>' => Command::Enter,
            '<' => Command::Exit,
            'q' | 'e' => {
                let slot = chars
                    .next()
                    .and_then(|(_, d)| d.to_digit(10))
                    .ok_or(ScriptError::MissingSlot(c, at))? as usize;
                if c == 'q' {
                    Command::Quaff(slot)
                } else {
                    Command::Equip(slot)
                }
            }
            c if c.is_ascii_uppercase() => {
                let dir = Direction::from_key(c.to_ascii_lowercase())
                    .ok_or(ScriptError::UnknownKey(c, at))?;
                Command::Fight(dir)
            }
            c => Command::Move(Direction::from_key(c).ok_or(ScriptError::UnknownKey(c, at))?),
        };
        commands.push(command);
    }
    Ok(commands)
}

/// Endless walk that sweeps the compass, three steps per heading
pub fn wander() -> impl Iterator<Item = Command> {
    Direction::ALL
        .into_iter()
        .flat_map(|dir| std::iter::repeat_n(Command::Move(dir), 3))
        .cycle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_script() {
        let cmds = parse("ll.L > q0 e1 <").unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::Move(Direction::East),
                Command::Move(Direction::East),
                Command::Rest,
                Command::Fight(Direction::East),
                Command::Enter,
                Command::Quaff(0),
                Command::Equip(1),
                Command::Exit,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("lx"), Err(ScriptError::UnknownKey('x', 1)));
        assert_eq!(parse("q"), Err(ScriptError::MissingSlot('q', 0)));
        assert_eq!(parse("eZ"), Err(ScriptError::MissingSlot('e', 0)));
    }

    #[test]
    fn test_wander_cycles() {
        let walk: Vec<_> = wander().take(27).collect();
        assert_eq!(walk[0], Command::Move(Direction::ALL[0]));
        assert_eq!(walk[3], Command::Move(Direction::ALL[1]));
        assert_eq!(walk[24], walk[0]);
    }
}
