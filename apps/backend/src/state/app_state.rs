use std::sync::Arc;

use crate::protocol::FrameLinks;
use crate::services::{ActionVerifier, FrameService, GameEngine};
use crate::store::KvStore;

/// Shared handles for request handlers. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<GameEngine>,
    frames: Arc<FrameService>,
    verifier: Arc<dyn ActionVerifier>,
    links: FrameLinks,
    home_image_url: String,
}

impl AppState {
    pub fn new(
        engine: Arc<GameEngine>,
        verifier: Arc<dyn ActionVerifier>,
        links: FrameLinks,
        home_image_url: impl Into<String>,
    ) -> Self {
        Self {
            frames: Arc::new(FrameService::new(engine.clone())),
            engine,
            verifier,
            links,
            home_image_url: home_image_url.into(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn frames(&self) -> &FrameService {
        &self.frames
    }

    pub fn verifier(&self) -> &dyn ActionVerifier {
        self.verifier.as_ref()
    }

    pub fn links(&self) -> &FrameLinks {
        &self.links
    }

    pub fn home_image_url(&self) -> &str {
        &self.home_image_url
    }

    pub fn store(&self) -> &dyn KvStore {
        self.engine.store()
    }
}
