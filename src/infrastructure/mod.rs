pub mod sleeper;

pub use sleeper::{Sleeper, TokioSleeper};
