pub mod frames;
pub mod game_engine;
pub mod locks;
pub mod verification;

pub use frames::FrameService;
pub use game_engine::GameEngine;
pub use locks::{ConversationLock, LocalLocks, LockGuard};
pub use verification::{ActionVerifier, UpstreamVerified};
