//! Frame-scoped memoization of shaped text.
//!
//! Shaping a line (resolving styles, measuring cells, building draw
//! primitives) is the expensive part of a frame, and between two frames most
//! visible lines are unchanged. [`LayoutCache`] keeps one shaped layout per
//! `(text, style, spans)` key and evicts, at the end of every frame, whatever
//! that frame did not ask for. The working set is therefore bounded by the
//! number of rows on screen.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::editor::{RenderedLine, Span, StyleId};
use crate::theme::Theme;

/// Turns styled text into something drawable.
pub trait Shaper {
    type Layout;

    /// Shape `text` in `style`, with `spans` (byte offsets) overriding it.
    fn shape(&self, theme: &Theme, text: &str, style: StyleId, spans: &[Span]) -> Self::Layout;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    style: StyleId,
    spans: Vec<Span>,
}

struct Entry<L> {
    layout: Rc<L>,
    generation: u64,
}

/// Generation-stamped layout cache.
///
/// Protocol per frame: [`increment_generation`](Self::increment_generation),
/// any number of lookups, then [`collect_garbage`](Self::collect_garbage).
/// [`begin_frame`](Self::begin_frame) does the first and last step for you.
///
/// The theme is not part of the key; call [`clear`](Self::clear) after
/// switching themes.
pub struct LayoutCache<S: Shaper> {
    shaper: S,
    entries: HashMap<LayoutKey, Entry<S::Layout>>,
    generation: u64,
}

impl<S: Shaper> LayoutCache<S> {
    pub fn new(shaper: S) -> Self {
        Self {
            shaper,
            entries: HashMap::new(),
            generation: 0,
        }
    }

    pub const fn shaper(&self) -> &S {
        &self.shaper
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start a new frame.
    pub const fn increment_generation(&mut self) {
        self.generation += 1;
    }

    /// Look up (or shape and insert) the layout for a key, stamping it with
    /// the current generation.
    pub fn get_layout(
        &mut self,
        theme: &Theme,
        text: &str,
        style: StyleId,
        spans: &[Span],
    ) -> Rc<S::Layout> {
        let key = LayoutKey {
            text: text.to_owned(),
            style,
            spans: spans.to_vec(),
        };
        let generation = self.generation;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.generation = generation;
            return Rc::clone(&entry.layout);
        }

        let layout = Rc::new(self.shaper.shape(theme, text, style, spans));
        self.entries.insert(
            key,
            Entry {
                layout: Rc::clone(&layout),
                generation,
            },
        );
        layout
    }

    /// Layout for a rendered row's text.
    pub fn layout_for_line(&mut self, theme: &Theme, line: &RenderedLine) -> Rc<S::Layout> {
        self.get_layout(theme, &line.text, StyleId::DEFAULT, &line.spans)
    }

    /// Layout for a one-based line number in the gutter.
    pub fn layout_for_line_number(
        &mut self,
        theme: &Theme,
        number: usize,
        active: bool,
    ) -> Rc<S::Layout> {
        let style = if active {
            StyleId::LINE_NUMBER_ACTIVE
        } else {
            StyleId::LINE_NUMBER
        };
        self.get_layout(theme, &number.to_string(), style, &[])
    }

    /// Drop every entry not used during the current generation.
    ///
    /// Returns how many entries were evicted.
    pub fn collect_garbage(&mut self) -> usize {
        let before = self.entries.len();
        let generation = self.generation;
        self.entries.retain(|_, entry| entry.generation == generation);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::trace!(evicted, kept = self.entries.len(), generation, "layout cache sweep");
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Increment the generation now and collect garbage when the returned
    /// guard is dropped.
    pub fn begin_frame(&mut self) -> Frame<'_, S> {
        self.increment_generation();
        Frame { cache: self }
    }
}

impl<S: Shaper + Default> Default for LayoutCache<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Shaper> std::fmt::Debug for LayoutCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCache")
            .field("entries", &self.entries.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// One frame's access to a [`LayoutCache`].
pub struct Frame<'a, S: Shaper> {
    cache: &'a mut LayoutCache<S>,
}

impl<S: Shaper> Deref for Frame<'_, S> {
    type Target = LayoutCache<S>;

    fn deref(&self) -> &Self::Target {
        self.cache
    }
}

impl<S: Shaper> DerefMut for Frame<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cache
    }
}

impl<S: Shaper> Drop for Frame<'_, S> {
    fn drop(&mut self) {
        self.cache.collect_garbage();
    }
}
