/*!
## Rust Machine Module

This Rust module is the code emitter and stack machine for PL/0.

*/

pub type Address = usize;

mod frame;
mod listing;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;

pub use frame::Frames;
pub use frame::FRAME_HEADER;
pub use listing::Listing;
pub use opcode::Instruction;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Registers;
pub use runtime::Runtime;
pub use stack::Stack;
