pub mod check;
pub mod init;
pub mod replay;
pub mod resolve;

pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use replay::{replay, ReplayArgs};
pub use resolve::{resolve, ResolveArgs};
