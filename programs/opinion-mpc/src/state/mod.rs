pub mod events;
pub mod poll;
pub mod post;
pub mod survey;

pub use events::*;
pub use poll::*;
pub use post::*;
pub use survey::*;
