pub use action::*;
pub use board::*;
pub use errors::*;
pub use protocol_types::*;
pub use spinner::*;
pub use tools::*;
pub use turn_phase::*;
pub use validator::*;
pub use visualization::*;

mod action;
#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod protocol_types;
mod spinner;
mod tools;
mod turn_phase;
mod validator;
mod visualization;
