mod accessory_handle;
mod door_handle;
mod sse_handle;

pub use accessory_handle::*;
pub use door_handle::*;
pub use sse_handle::*;
