use chrono::Local;
use digest_core::{update, AppState, AppViewModel, Effect, Msg};

use super::effects::EffectRunner;

/// Where views end up: the console or a webview.
pub(crate) trait Surface {
    fn render(&mut self, view: &AppViewModel);
    fn scroll_to_top(&mut self);
}

/// Owns the state and routes effects to the runner or the surface.
pub(crate) struct Driver {
    state: AppState,
    effects: EffectRunner,
}

impl Driver {
    pub(crate) fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
        }
    }

    pub(crate) fn dispatch(&mut self, msg: Msg, surface: &mut dyn Surface) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let scroll = effects.contains(&Effect::ScrollToTop);
        self.effects.enqueue(effects);

        if state.consume_dirty() {
            surface.render(&state.view(Local::now()));
        }
        if scroll {
            surface.scroll_to_top();
        }
        self.state = state;
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }
}
