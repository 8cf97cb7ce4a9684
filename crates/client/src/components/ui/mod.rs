//! UI primitives (Button, TextInput)

pub mod button;
pub mod input;

pub use button::*;
pub use input::*;
