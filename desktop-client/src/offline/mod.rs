mod broadcaster;

pub use broadcaster::LocalBroadcaster;
