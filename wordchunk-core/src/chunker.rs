//! Sliding-window chunk generation
//!
//! A [`ChunkWindow`] holds the last [`CHUNK_SIZE`] tokens in a ring buffer.
//! It moves through three states:
//!
//! ```text
//! Priming --(window full)--> Sliding --(finish: emit last window)--> Drained
//!    |                          ^  |
//!    |                          +--+ step: emit current window, then shift
//!    +--(finish before full: emit nothing)--> Drained
//! ```
//!
//! A token stream of length `L` yields `max(0, L - CHUNK_SIZE + 1)` chunks,
//! each sharing `CHUNK_SIZE - 1` tokens with its predecessor.

use crate::types::{Chunk, Token, CHUNK_SIZE};

/// Lifecycle of a [`ChunkWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Fewer than `CHUNK_SIZE` tokens seen
    Priming,
    /// Window full; every new token emits the previous window
    Sliding,
    /// Input exhausted; nothing more is emitted
    Drained,
}

/// Ring-buffer window over the token stream
#[derive(Debug, Clone)]
pub struct ChunkWindow {
    slots: Vec<Token>,
    /// Index of the oldest token once the window is full
    head: usize,
    state: WindowState,
}

impl ChunkWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(CHUNK_SIZE),
            head: 0,
            state: WindowState::Priming,
        }
    }

    /// Current state
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Feed one token, emitting at most one chunk
    ///
    /// While sliding, the window as it stood *before* this token is emitted,
    /// then the oldest token is replaced. Tokens fed after
    /// [`finish`](Self::finish) are ignored.
    pub fn step(&mut self, token: Token, emit: &mut impl FnMut(Chunk)) {
        match self.state {
            WindowState::Priming => {
                self.slots.push(token);
                if self.slots.len() == CHUNK_SIZE {
                    self.state = WindowState::Sliding;
                }
            }
            WindowState::Sliding => {
                emit(self.snapshot());
                self.slots[self.head] = token;
                self.head = (self.head + 1) % CHUNK_SIZE;
            }
            WindowState::Drained => {}
        }
    }

    /// Signal end of input, emitting the final window if one was filled
    pub fn finish(&mut self, emit: &mut impl FnMut(Chunk)) {
        if self.state == WindowState::Sliding {
            emit(self.snapshot());
        }
        self.state = WindowState::Drained;
        self.slots.clear();
        self.head = 0;
    }

    fn snapshot(&self) -> Chunk {
        Chunk::new(std::array::from_fn(|i| {
            self.slots[(self.head + i) % CHUNK_SIZE].clone()
        }))
    }
}

impl Default for ChunkWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator adaptor turning tokens into overlapping chunks
#[derive(Debug, Clone)]
pub struct Chunks<I> {
    tokens: I,
    window: ChunkWindow,
}

impl<I> Chunks<I> {
    /// Wrap a token iterator
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            window: ChunkWindow::new(),
        }
    }

    /// State of the underlying window
    pub fn state(&self) -> WindowState {
        self.window.state()
    }
}

impl<I> Iterator for Chunks<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let mut out = None;
        while self.window.state() != WindowState::Drained {
            match self.tokens.next() {
                Some(token) => self.window.step(token, &mut |chunk| out = Some(chunk)),
                None => self.window.finish(&mut |chunk| out = Some(chunk)),
            }
            if out.is_some() {
                break;
            }
        }
        out
    }
}

/// Window a token sequence into chunks
pub fn chunks<I>(tokens: I) -> Chunks<I::IntoIter>
where
    I: IntoIterator<Item = Token>,
{
    Chunks::new(tokens.into_iter())
}
