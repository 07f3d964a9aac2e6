pub mod play;

pub use play::{PlayMode, Ticker};
