// ABOUTME: Tool module - definitions, catalog, typed calls, dispatch, and outcomes.
// ABOUTME: The single boundary between transports and traffic handlers.

mod call;
mod catalog;
mod definition;
mod dispatcher;
mod result;
mod traits;

pub use call::*;
pub use catalog::*;
pub use definition::*;
pub use dispatcher::*;
pub use result::*;
pub use traits::*;
