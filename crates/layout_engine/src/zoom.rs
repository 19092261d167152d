//! Zoom/view controller
//!
//! Manages the display-only magnification of the live preview. The scale is
//! always one of a fixed discrete set and is never consulted by the export
//! path. The controller also owns the keyboard and wheel bindings for the
//! zoom commands; bindings registered on attach are deregistered on detach
//! (and on drop), so no handler outlives the preview it was created for.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed ascending set of preview scales
pub const ZOOM_LEVELS: [f32; 7] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Index of the 1.0 scale in [`ZOOM_LEVELS`]
const DEFAULT_LEVEL: usize = 3;

/// A key that can participate in a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Char(char),
    F11,
}

/// A keyboard shortcut: key plus modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Shortcut {
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            alt: false,
            shift: false,
        }
    }

    pub fn bare(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }
}

/// Commands the view controller responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewCommand {
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleFullscreen,
}

/// Registered shortcut bindings
#[derive(Debug, Default)]
pub struct ShortcutMap {
    bindings: HashMap<Shortcut, ViewCommand>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, shortcut: Shortcut, command: ViewCommand) {
        self.bindings.insert(shortcut, command);
    }

    pub fn lookup(&self, shortcut: &Shortcut) -> Option<ViewCommand> {
        self.bindings.get(shortcut).copied()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// OS-level fullscreen integration point
///
/// The shell that hosts the preview implements this; the controller only
/// tracks the desired state.
pub trait FullscreenHost {
    fn set_fullscreen(&mut self, on: bool);
}

/// Host that ignores fullscreen requests (headless operation, tests)
#[derive(Debug, Default)]
pub struct NoopFullscreenHost;

impl FullscreenHost for NoopFullscreenHost {
    fn set_fullscreen(&mut self, _on: bool) {}
}

/// The preview zoom/view controller
pub struct ZoomController {
    level: usize,
    fullscreen: bool,
    shortcuts: ShortcutMap,
    host: Box<dyn FullscreenHost + Send>,
}

impl std::fmt::Debug for ZoomController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomController")
            .field("scale", &self.scale())
            .field("fullscreen", &self.fullscreen)
            .field("bindings", &self.shortcuts.len())
            .finish()
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomController {
    /// Controller at 1.0 scale with no bindings registered yet
    pub fn new() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            fullscreen: false,
            shortcuts: ShortcutMap::new(),
            host: Box::new(NoopFullscreenHost),
        }
    }

    /// Controller with a fullscreen host supplied by the shell
    pub fn with_host(host: Box<dyn FullscreenHost + Send>) -> Self {
        Self {
            level: DEFAULT_LEVEL,
            fullscreen: false,
            shortcuts: ShortcutMap::new(),
            host,
        }
    }

    /// Current preview scale
    pub fn scale(&self) -> f32 {
        ZOOM_LEVELS[self.level]
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level + 1 < ZOOM_LEVELS.len()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level > 0
    }

    /// Advance one step; no-op at the top of the scale set
    pub fn zoom_in(&mut self) -> f32 {
        if self.can_zoom_in() {
            self.level += 1;
        }
        self.scale()
    }

    /// Retreat one step; no-op at the bottom of the scale set
    pub fn zoom_out(&mut self) -> f32 {
        if self.can_zoom_out() {
            self.level -= 1;
        }
        self.scale()
    }

    /// Return to the 1.0 scale
    pub fn reset(&mut self) -> f32 {
        self.level = DEFAULT_LEVEL;
        self.scale()
    }

    /// Request or exit fullscreen presentation of the preview
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.host.set_fullscreen(self.fullscreen);
    }

    /// Register the default keyboard bindings
    pub fn attach(&mut self) {
        self.shortcuts
            .bind(Shortcut::ctrl(Key::Char('+')), ViewCommand::ZoomIn);
        self.shortcuts
            .bind(Shortcut::ctrl(Key::Char('=')), ViewCommand::ZoomIn);
        self.shortcuts
            .bind(Shortcut::ctrl(Key::Char('-')), ViewCommand::ZoomOut);
        self.shortcuts
            .bind(Shortcut::ctrl(Key::Char('0')), ViewCommand::ZoomReset);
        self.shortcuts
            .bind(Shortcut::bare(Key::F11), ViewCommand::ToggleFullscreen);
    }

    /// Deregister every binding; must be called when the preview unmounts
    pub fn detach(&mut self) {
        self.shortcuts.clear();
    }

    /// Number of live bindings (for teardown assertions)
    pub fn binding_count(&self) -> usize {
        self.shortcuts.len()
    }

    /// Dispatch a key event; returns the command applied, if any
    pub fn handle_key(&mut self, shortcut: Shortcut) -> Option<ViewCommand> {
        let command = self.shortcuts.lookup(&shortcut)?;
        self.apply(command);
        Some(command)
    }

    /// Dispatch a wheel event; zooms only while the modifier is held
    pub fn handle_wheel(&mut self, delta_y: f32, ctrl: bool) -> bool {
        if !ctrl || delta_y == 0.0 {
            return false;
        }
        if delta_y < 0.0 {
            self.zoom_in();
        } else {
            self.zoom_out();
        }
        true
    }

    fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::ZoomIn => {
                self.zoom_in();
            }
            ViewCommand::ZoomOut => {
                self.zoom_out();
            }
            ViewCommand::ZoomReset => {
                self.reset();
            }
            ViewCommand::ToggleFullscreen => self.toggle_fullscreen(),
        }
    }
}

impl Drop for ZoomController {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_initial_scale_is_one() {
        assert_eq!(ZoomController::new().scale(), 1.0);
    }

    #[test]
    fn test_zoom_in_is_idempotent_at_top() {
        let mut zoom = ZoomController::new();
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.scale(), 2.0);
        assert!(!zoom.can_zoom_in());
        assert_eq!(zoom.zoom_in(), 2.0);
    }

    #[test]
    fn test_zoom_out_is_idempotent_at_bottom() {
        let mut zoom = ZoomController::new();
        for _ in 0..20 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.scale(), 0.25);
        assert_eq!(zoom.zoom_out(), 0.25);
    }

    #[test]
    fn test_reset_returns_to_one() {
        let mut zoom = ZoomController::new();
        zoom.zoom_in();
        zoom.zoom_in();
        assert_eq!(zoom.reset(), 1.0);
    }

    #[test]
    fn test_attach_detach_lifecycle() {
        let mut zoom = ZoomController::new();
        assert_eq!(zoom.binding_count(), 0);

        zoom.attach();
        assert!(zoom.binding_count() > 0);

        zoom.detach();
        assert_eq!(zoom.binding_count(), 0);
    }

    #[test]
    fn test_key_dispatch() {
        let mut zoom = ZoomController::new();
        zoom.attach();

        let applied = zoom.handle_key(Shortcut::ctrl(Key::Char('+')));
        assert_eq!(applied, Some(ViewCommand::ZoomIn));
        assert_eq!(zoom.scale(), 1.25);

        // Unbound shortcut does nothing.
        assert!(zoom.handle_key(Shortcut::bare(Key::Char('x'))).is_none());
        assert_eq!(zoom.scale(), 1.25);
    }

    #[test]
    fn test_wheel_requires_modifier() {
        let mut zoom = ZoomController::new();
        assert!(!zoom.handle_wheel(-10.0, false));
        assert_eq!(zoom.scale(), 1.0);

        assert!(zoom.handle_wheel(-10.0, true));
        assert_eq!(zoom.scale(), 1.25);

        assert!(zoom.handle_wheel(10.0, true));
        assert_eq!(zoom.scale(), 1.0);
    }

    struct FlagHost(Arc<AtomicBool>);

    impl FullscreenHost for FlagHost {
        fn set_fullscreen(&mut self, on: bool) {
            self.0.store(on, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_fullscreen_toggle_reaches_host() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut zoom = ZoomController::with_host(Box::new(FlagHost(flag.clone())));

        zoom.toggle_fullscreen();
        assert!(zoom.is_fullscreen());
        assert!(flag.load(Ordering::SeqCst));

        zoom.toggle_fullscreen();
        assert!(!zoom.is_fullscreen());
        assert!(!flag.load(Ordering::SeqCst));
    }

    proptest! {
        #[test]
        fn prop_scale_stays_in_fixed_set(steps in proptest::collection::vec(0u8..3, 0..64)) {
            let mut zoom = ZoomController::new();
            for step in steps {
                match step {
                    0 => { zoom.zoom_in(); }
                    1 => { zoom.zoom_out(); }
                    _ => { zoom.reset(); }
                }
                prop_assert!(ZOOM_LEVELS.contains(&zoom.scale()));
            }
        }
    }
}
