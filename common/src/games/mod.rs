mod broadcaster;

pub mod tictactoe;

pub use broadcaster::{GameBroadcaster, GameEvent, NullBroadcaster, RecordingBroadcaster};
