//! Terminal keyboard mapping.
//!
//! A terminal reports presses (and auto-repeats) but never releases, so
//! movement keys are latched for a short hold window after each press.

use bracket_terminal::prelude::VirtualKeyCode;

use super::{Action, InputFrame};
use crate::player::MoveIntent;

/// Seconds a movement press keeps the player walking.
pub const HOLD_WINDOW: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Move(Direction),
    Act(Action),
    Restart,
    Quit,
}

pub fn command_for_key(key: VirtualKeyCode) -> Option<KeyCommand> {
    use VirtualKeyCode::*;
    let command = match key {
        Up | W => KeyCommand::Move(Direction::Up),
        Down | S => KeyCommand::Move(Direction::Down),
        Left | A => KeyCommand::Move(Direction::Left),
        Right | D => KeyCommand::Move(Direction::Right),
        E => KeyCommand::Act(Action::Interact),
        I => KeyCommand::Act(Action::ToggleInventory),
        M => KeyCommand::Act(Action::Meditate),
        Space | Return => KeyCommand::Act(Action::AdvanceDialogue),
        Key1 => KeyCommand::Act(Action::DescribeItem(0)),
        Key2 => KeyCommand::Act(Action::DescribeItem(1)),
        Key3 => KeyCommand::Act(Action::DescribeItem(2)),
        Key4 => KeyCommand::Act(Action::DescribeItem(3)),
        Key5 => KeyCommand::Act(Action::DescribeItem(4)),
        Key6 => KeyCommand::Act(Action::DescribeItem(5)),
        Key7 => KeyCommand::Act(Action::DescribeItem(6)),
        Key8 => KeyCommand::Act(Action::DescribeItem(7)),
        Key9 => KeyCommand::Act(Action::DescribeItem(8)),
        F5 => KeyCommand::Restart,
        Escape => KeyCommand::Quit,
        _ => return None,
    };
    Some(command)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyLatch {
    up: f64,
    down: f64,
    left: f64,
    right: f64,
    run: bool,
    restart: bool,
    quit: bool,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// True once per F5 press.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    /// Folds one frame of terminal input into the latch and returns the
    /// frame the game should see.
    pub fn frame(&mut self, key: Option<VirtualKeyCode>, shift: bool, dt: f64) -> InputFrame {
        for held in [&mut self.up, &mut self.down, &mut self.left, &mut self.right] {
            *held = (*held - dt).max(0.0);
        }
        let mut frame = InputFrame::idle();
        match key.and_then(command_for_key) {
            Some(KeyCommand::Move(direction)) => {
                self.run = shift;
                match direction {
                    Direction::Up => {
                        self.up = HOLD_WINDOW;
                        self.down = 0.0;
                    }
                    Direction::Down => {
                        self.down = HOLD_WINDOW;
                        self.up = 0.0;
                    }
                    Direction::Left => {
                        self.left = HOLD_WINDOW;
                        self.right = 0.0;
                    }
                    Direction::Right => {
                        self.right = HOLD_WINDOW;
                        self.left = 0.0;
                    }
                }
            }
            Some(KeyCommand::Act(action)) => frame.actions.push(action),
            Some(KeyCommand::Restart) => self.restart = true,
            Some(KeyCommand::Quit) => self.quit = true,
            None => {}
        }
        frame.intent = MoveIntent {
            up: self.up > 0.0,
            down: self.down > 0.0,
            left: self.left > 0.0,
            right: self.right > 0.0,
            run: self.run,
        };
        if !frame.intent.is_moving() {
            self.run = false;
        }
        frame
    }
}
