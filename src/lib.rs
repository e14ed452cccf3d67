pub mod content;
pub mod filter;
pub mod layout;
pub mod state;
pub mod util;
pub mod workflow;
