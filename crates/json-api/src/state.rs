//! State

use std::sync::Arc;

use emporia_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin_token_digest: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_token_digest: String) -> Self {
        Self {
            app,
            admin_token_digest,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, admin_token_digest: String) -> Arc<Self> {
        Arc::new(Self::new(app, admin_token_digest))
    }
}
