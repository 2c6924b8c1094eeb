//! # Runtime
//!
//! Entry point shared by the binaries: decode one plugin request, route it to
//! the handler of its resource type and always answer with a progress event.

mod dispatch;
mod event;

pub use dispatch::{dispatch, dispatch_with_store};
pub use event::{Action, HandlerEvent, RequestData};
