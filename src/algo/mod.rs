pub mod listen;
pub mod pairs;
pub mod win;
