// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Null-safe access to the client's audio playback backend.
//!
//! The game client may or may not have an audio backend mounted. Callers ask
//! [`AudioContext::controls`] and get `None` instead of a panic when nothing
//! is there.

use std::sync::Arc;

/// Playback operations exposed by a mounted audio backend.
pub trait AudioBackend: Send + Sync {
    fn play_background_music(&self);
    fn stop_background_music(&self);
    fn play_click_sound(&self);
    fn play_success_sound(&self);
    fn play_failure_sound(&self);
}

/// Holder for an optional audio backend.
#[derive(Clone, Default)]
pub struct AudioContext {
    backend: Option<Arc<dyn AudioBackend>>,
}

impl std::fmt::Debug for AudioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioContext")
            .field("mounted", &self.backend.is_some())
            .finish()
    }
}

impl AudioContext {
    /// A context with no backend mounted.
    pub fn unmounted() -> Self {
        Self::default()
    }

    /// A context wrapping the given backend.
    pub fn mounted(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Replace (or clear) the mounted backend.
    pub fn set_backend(&mut self, backend: Option<Arc<dyn AudioBackend>>) {
        self.backend = backend;
    }

    /// The playback controls, or `None` when no backend is mounted.
    pub fn controls(&self) -> Option<&dyn AudioBackend> {
        self.backend.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn push(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }
    }

    impl AudioBackend for Recorder {
        fn play_background_music(&self) {
            self.push("bg:play");
        }
        fn stop_background_music(&self) {
            self.push("bg:stop");
        }
        fn play_click_sound(&self) {
            self.push("click");
        }
        fn play_success_sound(&self) {
            self.push("success");
        }
        fn play_failure_sound(&self) {
            self.push("failure");
        }
    }

    #[test]
    fn unmounted_context_yields_none() {
        let ctx = AudioContext::unmounted();
        assert!(ctx.controls().is_none());
    }

    #[test]
    fn mounted_context_forwards_calls() {
        let recorder = Arc::new(Recorder::default());
        let ctx = AudioContext::mounted(recorder.clone());

        let controls = ctx.controls().expect("backend is mounted");
        controls.play_background_music();
        controls.play_click_sound();
        controls.play_success_sound();
        controls.play_failure_sound();
        controls.stop_background_music();

        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["bg:play", "click", "success", "failure", "bg:stop"]
        );
    }

    #[test]
    fn clearing_backend_returns_to_none() {
        let mut ctx = AudioContext::mounted(Arc::new(Recorder::default()));
        ctx.set_backend(None);
        assert!(ctx.controls().is_none());
    }
}
