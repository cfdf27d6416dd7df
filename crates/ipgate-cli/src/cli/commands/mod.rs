pub mod check;
pub mod dispatch;
pub mod serve;

pub use dispatch::dispatch;
