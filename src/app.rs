use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::edit::{apply_edit, Edit};
use crate::passage::TextProvider;
use crate::runtime::AppEvent;
use crate::session::{SessionMachine, SessionStatus};

/// What the event loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Continue,
    Quit,
}

/// Presentation-side state: forwards key presses and ticks into the session
#[derive(Debug)]
pub struct App {
    pub machine: SessionMachine,
}

impl App {
    pub fn new(provider: Box<dyn TextProvider>) -> Self {
        Self {
            machine: SessionMachine::new(provider),
        }
    }

    pub fn on_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Resize => Flow::Redraw,
            AppEvent::Tick => self.on_tick(),
            // no more key presses can arrive, so Esc never would either
            AppEvent::Closed => Flow::Quit,
        }
    }

    /// Only a running session has anything new to show on a tick.
    pub fn on_tick(&mut self) -> Flow {
        if self.machine.status() == SessionStatus::Running {
            self.machine.on_tick();
            Flow::Redraw
        } else {
            Flow::Continue
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        match key.code {
            KeyCode::Right => {
                self.machine.request_new_session();
                return Flow::Redraw;
            }
            KeyCode::Left => {
                self.machine.retry();
                return Flow::Redraw;
            }
            _ => {}
        }

        if self.machine.status() == SessionStatus::Finished {
            // input box is disabled; only the results actions apply
            return match key.code {
                KeyCode::Char('n') => {
                    self.machine.request_new_session();
                    Flow::Redraw
                }
                KeyCode::Char('r') => {
                    self.machine.retry();
                    Flow::Redraw
                }
                _ => Flow::Continue,
            };
        }

        match Edit::from_key(key) {
            Some(edit) => {
                let text = apply_edit(self.machine.typed(), edit);
                self.machine.submit_input(&text);
                Flow::Redraw
            }
            None => Flow::Continue,
        }
    }
}
