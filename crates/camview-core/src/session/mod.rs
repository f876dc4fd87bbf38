mod manager;
mod recording;
mod session_state;

pub use {manager::SessionManager, recording::Recording, session_state::SessionState};
