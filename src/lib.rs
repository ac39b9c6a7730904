pub mod core;
pub mod game;
pub mod networking;

pub use game::controller::{GameController, Notifier};
pub use networking::client::HttpAuthority;
