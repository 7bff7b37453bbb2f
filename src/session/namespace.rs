//! Session namespace and frame projection
//!
//! A [`Namespace`] holds two environments that a shell reads from and writes to:
//! a global-like one and a local-like one. Projecting a frame merges its captured
//! bindings into them.
//!
//! # Merge policy
//!
//! - Globals: insert-or-overwrite for every captured global. Keys not present in the
//!   frame are kept, so helper bindings survive repeated projections.
//! - Locals: the first projection seeds the environment from a fresh copy of the
//!   frame's locals; later projections insert-or-overwrite like globals. Seeding
//!   happens once per namespace, even if a shell clears the globals and with them
//!   the marker.
//! - The reserved [`FRAME_MARKER`] binding names the projected frame.
//! - Helper commands and the [`DUMP_BINDING`] are re-registered after every merge, so a
//!   captured global with the same name never hides them.
//!
//! Lookups resolve locals before globals.

use crate::dump::{Bindings, FrameRecord, FrameStore, Value};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Reserved binding naming the frame currently projected
pub const FRAME_MARKER: &str = "_frame";

/// Reserved binding describing the loaded dump
pub const DUMP_BINDING: &str = "dump";

/// Navigation and help commands exposed to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    Frames,
    Up,
    Down,
    Sources,
    Help,
}

impl Helper {
    pub const ALL: [Helper; 5] = [
        Helper::Frames,
        Helper::Up,
        Helper::Down,
        Helper::Sources,
        Helper::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Helper::Frames => "frames",
            Helper::Up => "up",
            Helper::Down => "down",
            Helper::Sources => "sources",
            Helper::Help => "help",
        }
    }

    pub fn signature(self) -> &'static str {
        match self {
            Helper::Frames => "frames()",
            Helper::Up => "up(count=1)",
            Helper::Down => "down(count=1)",
            Helper::Sources => "sources(radius=15)",
            Helper::Help => "help()",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Helper::Frames => "List all frames, marking the current one",
            Helper::Up => "Move toward frame 0 (the innermost call)",
            Helper::Down => "Move away from frame 0",
            Helper::Sources => "Show source around the current line",
            Helper::Help => "Show this help",
        }
    }
}

/// A binding in one of the session environments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Value(Value),
    Helper(Helper),
    /// Index of the projected frame
    FrameMarker(usize),
    Dump {
        frames: usize,
        message: Option<String>,
    },
}

impl Entry {
    pub fn type_name(&self) -> &str {
        match self {
            Entry::Value(value) => value.type_name(),
            Entry::Helper(_) => "helper",
            Entry::FrameMarker(_) => "Frame",
            Entry::Dump { .. } => "Dump",
        }
    }
}

/// Ordered name -> entry map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    entries: FxHashMap<String, Entry>,
    insertion_order: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_bindings(bindings: &Bindings) -> Self {
        let mut env = Environment::new();
        for (name, value) in bindings {
            env.insert(name.clone(), Entry::Value(value.clone()));
        }
        env
    }

    /// Insert or overwrite a binding, returning the previous entry
    pub fn insert(&mut self, name: impl Into<String>, entry: Entry) -> Option<Entry> {
        let name = name.into();
        if !self.entries.contains_key(&name) {
            self.insertion_order.push(name.clone());
        }
        self.entries.insert(name, entry)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bindings in the order they were first inserted
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.insertion_order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|entry| (name.as_str(), entry)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}

/// The pair of environments a shell evaluates against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    globals: Environment,
    locals: Environment,
    /// Locals were seeded by a first projection
    seeded: bool,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn locals(&self) -> &Environment {
        &self.locals
    }

    /// Mutable access for shells that reset the global environment themselves
    pub fn globals_mut(&mut self) -> &mut Environment {
        &mut self.globals
    }

    /// Index recorded by the frame marker, if a frame was projected
    pub fn marker(&self) -> Option<usize> {
        match self.globals.get(FRAME_MARKER) {
            Some(Entry::FrameMarker(index)) => Some(*index),
            _ => None,
        }
    }

    /// Resolve `name`, locals first
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.locals.get(name).or_else(|| self.globals.get(name))
    }

    /// Bind a user value in the local environment
    pub fn assign(&mut self, name: impl Into<String>, value: Value) -> Option<Entry> {
        self.locals.insert(name, Entry::Value(value))
    }

    /// Merge `frame`'s bindings in and point the marker at it
    pub fn project(&mut self, frame: &FrameRecord, store: &FrameStore) {
        let first_projection = !self.seeded;

        for (name, value) in frame.globals() {
            self.globals
                .insert(name.clone(), Entry::Value(value.clone()));
        }

        if first_projection {
            self.locals = Environment::from_bindings(frame.locals());
            self.seeded = true;
        } else {
            for (name, value) in frame.locals() {
                self.locals.insert(name.clone(), Entry::Value(value.clone()));
            }
        }

        self.globals
            .insert(FRAME_MARKER, Entry::FrameMarker(frame.index()));
        self.register_helpers(store);

        debug!(
            frame = frame.index(),
            globals = self.globals.len(),
            locals = self.locals.len(),
            first_projection,
            "projected frame"
        );
    }

    /// (Re)install helper commands and the dump binding in the global environment
    pub fn register_helpers(&mut self, store: &FrameStore) {
        for helper in Helper::ALL {
            self.globals.insert(helper.name(), Entry::Helper(helper));
        }
        self.globals.insert(
            DUMP_BINDING,
            Entry::Dump {
                frames: store.len(),
                message: store.message().map(str::to_string),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(name, repr)| (name.to_string(), Value::new(*repr, "int")))
            .collect()
    }

    fn store() -> FrameStore {
        FrameStore::from_frames(vec![
            FrameRecord::new(0, "a.py", 3)
                .with_globals(bindings(&[("CONFIG", "1"), ("up", "shadow")]))
                .with_locals(bindings(&[("x", "10"), ("only_a", "7")])),
            FrameRecord::new(0, "b.py", 8)
                .with_globals(bindings(&[("CONFIG", "2")]))
                .with_locals(bindings(&[("x", "20"), ("only_b", "9")])),
        ])
        .unwrap()
    }

    fn value(repr: &str) -> Option<Entry> {
        Some(Entry::Value(Value::new(repr, "int")))
    }

    #[test]
    fn test_projection_is_idempotent() {
        let store = store();
        let mut once = Namespace::new();
        once.project(&store.frames()[1], &store);

        let mut twice = once.clone();
        twice.project(&store.frames()[1], &store);

        assert_eq!(once, twice);
        assert_eq!(twice.marker(), Some(1));
    }

    #[test]
    fn test_round_trip_restores_marker_and_keeps_unshadowed_bindings() {
        let store = store();
        let mut ns = Namespace::new();
        ns.project(&store.frames()[0], &store);
        ns.project(&store.frames()[1], &store);
        assert_eq!(ns.marker(), Some(1));
        assert_eq!(ns.lookup("x").cloned(), value("20"));
        // additive merge: frame 0's local survives the move to frame 1
        assert_eq!(ns.lookup("only_a").cloned(), value("7"));

        ns.project(&store.frames()[0], &store);
        assert_eq!(ns.marker(), Some(0));
        assert_eq!(ns.lookup("x").cloned(), value("10"));
        assert_eq!(ns.globals().get("CONFIG").cloned(), value("1"));
        assert_eq!(ns.lookup("only_b").cloned(), value("9"));
    }

    #[test]
    fn test_helpers_survive_captured_globals_with_same_name() {
        let store = store();
        let mut ns = Namespace::new();
        ns.project(&store.frames()[0], &store);

        assert_eq!(ns.globals().get("up"), Some(&Entry::Helper(Helper::Up)));
        for helper in Helper::ALL {
            assert!(ns.globals().contains(helper.name()));
        }
        assert_eq!(
            ns.globals().get(DUMP_BINDING),
            Some(&Entry::Dump {
                frames: 2,
                message: None
            })
        );
    }

    #[test]
    fn test_helpers_reinstalled_after_reset() {
        let store = store();
        let mut ns = Namespace::new();
        ns.project(&store.frames()[0], &store);
        ns.globals_mut().clear();
        ns.project(&store.frames()[1], &store);

        assert!(ns.globals().contains("frames"));
        assert_eq!(ns.marker(), Some(1));
    }

    #[test]
    fn test_reset_globals_keep_user_locals() {
        let store = store();
        let mut ns = Namespace::new();
        ns.project(&store.frames()[0], &store);
        ns.assign("note", Value::new("'kept'", "str"));
        ns.globals_mut().clear();
        ns.project(&store.frames()[1], &store);

        assert_eq!(
            ns.lookup("note"),
            Some(&Entry::Value(Value::new("'kept'", "str")))
        );
    }

    #[test]
    fn test_user_assignment_does_not_touch_frame() {
        let store = store();
        let mut ns = Namespace::new();
        ns.project(&store.frames()[0], &store);
        ns.assign("x", Value::new("99", "int"));

        assert_eq!(ns.lookup("x").cloned(), value("99"));
        assert_eq!(store.frames()[0].locals()["x"].repr(), "10");
    }

    #[test]
    fn test_environment_keeps_insertion_order() {
        let mut env = Environment::new();
        env.insert("b", Entry::Helper(Helper::Up));
        env.insert("a", Entry::Helper(Helper::Down));
        env.insert("b", Entry::Helper(Helper::Help));

        let names: Vec<&str> = env.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(env.get("b"), Some(&Entry::Helper(Helper::Help)));
    }
}
