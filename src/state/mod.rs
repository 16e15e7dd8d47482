pub mod assignment;
pub mod bridge;
pub mod coords;
pub mod keyboard;
pub mod pointer;
pub mod release;
pub mod roster;
