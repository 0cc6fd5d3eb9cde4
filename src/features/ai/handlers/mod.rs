mod ai_handler;

pub use ai_handler::*;
