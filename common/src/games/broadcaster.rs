use crate::games::tictactoe::{Mark, Position};

/// Outbound notifications from a game session to whatever presents it.
pub trait GameBroadcaster {
    fn on_status_changed(&mut self, text: &str);

    fn on_cell_marked(&mut self, position: Position, mark: Mark);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBroadcaster;

impl GameBroadcaster for NullBroadcaster {
    fn on_status_changed(&mut self, _text: &str) {}

    fn on_cell_marked(&mut self, _position: Position, _mark: Mark) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    StatusChanged(String),
    CellMarked { position: Position, mark: Mark },
}

/// Keeps notifications in arrival order until they are drained.
#[derive(Debug, Clone, Default)]
pub struct RecordingBroadcaster {
    events: Vec<GameEvent>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            GameEvent::StatusChanged(text) => Some(text.as_str()),
            GameEvent::CellMarked { .. } => None,
        })
    }
}

impl GameBroadcaster for RecordingBroadcaster {
    fn on_status_changed(&mut self, text: &str) {
        self.events.push(GameEvent::StatusChanged(text.to_string()));
    }

    fn on_cell_marked(&mut self, position: Position, mark: Mark) {
        self.events.push(GameEvent::CellMarked { position, mark });
    }
}
