pub mod feedback;
pub use feedback::*;

pub mod poll;
pub use poll::*;

pub mod survey;
pub use survey::*;
