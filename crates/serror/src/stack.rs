//! Call-stack capture with lazy symbolication.
//!
//! Capturing only records instruction pointers. Function names, files and
//! lines are resolved the first time a trace is rendered and cached on the
//! trace from then on.
//!
//! ```text
//! StackTrace::capture(skip)
//!       │  backtrace::trace → [ip, ip, ip, ...]   (cheap, no symbols)
//!       ▼
//! StackTrace { frames }
//!       │  first render / symbols()
//!       ▼  backtrace::resolve(ip) per frame, cached in a OnceLock
//! [Symbol { function, file, line }]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config;

/// Hard cap on raw frames walked before elision, so a runaway recursion
/// does not make error construction unbounded.
#[cfg(feature = "backtrace")]
const WALK_LIMIT: usize = config::MAX_DEPTH_LIMIT + 64;

/// A single program location: the instruction pointer of a stack frame.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Frame(usize);

impl Frame {
    /// Wrap a raw instruction pointer.
    #[inline]
    pub const fn from_ip(ip: usize) -> Self {
        Self(ip)
    }

    /// Raw instruction pointer.
    #[inline]
    pub const fn ip(&self) -> usize {
        self.0
    }

    /// Resolve this frame to a symbol. Never fails; unresolvable frames
    /// yield a symbol with no function, file or line.
    pub fn resolve(&self) -> Symbol {
        resolve_ip(self.0)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:#x})", self.0)
    }
}

/// A resolved frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    ip: usize,
    function: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Symbol {
    fn unresolved(ip: usize) -> Self {
        Self { ip, function: None, file: None, line: None }
    }

    /// Demangled function name, without the hash suffix.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// True if at least the function name is known.
    pub fn is_resolved(&self) -> bool {
        self.function.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(name) => write!(f, "at {}", name)?,
            None => write!(f, "at <unknown> ({:#x})", self.ip)?,
        }
        if let Some(file) = &self.file {
            write!(f, " ({}", file.display())?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// An immutable snapshot of the call stack, innermost frame first.
pub struct StackTrace {
    frames: Box<[Frame]>,
    symbols: OnceLock<Box<[Symbol]>>,
}

impl StackTrace {
    /// A trace with no frames.
    pub fn empty() -> Self {
        Self::from_frames(Vec::new())
    }

    /// Build a trace from already captured frames.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into_boxed_slice(),
            symbols: OnceLock::new(),
        }
    }

    /// Snapshot the current call stack.
    ///
    /// The capturer's own frames are always elided; `skip` drops that many
    /// more (pass `1` from a constructor so the trace starts at its caller).
    /// Returns an empty trace when capture is disabled or the platform
    /// cannot walk the stack.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let cfg = config::current();
        if !cfg.enabled {
            return Self::empty();
        }
        Self::from_frames(walk(skip, cfg.max_depth))
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Resolved symbols, one per frame, computed on first call.
    pub fn symbols(&self) -> &[Symbol] {
        self.symbols
            .get_or_init(|| self.frames.iter().map(Frame::resolve).collect())
    }
}

impl fmt::Display for StackTrace {
    /// One frame per line, no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackTrace")
            .field("frames", &self.frames.len())
            .field("resolved", &self.symbols.get().is_some())
            .finish()
    }
}

// ── Platform glue ─────────────────────────────────────────────────

cfg_if::cfg_if! {
    if #[cfg(feature = "backtrace")] {
        /// Walk the stack, then cut everything up to and including
        /// `StackTrace::capture`, plus `skip` caller frames.
        #[inline(never)]
        fn walk(skip: usize, max_depth: usize) -> Vec<Frame> {
            let marker = walk as *const () as usize;
            let mut raw: Vec<usize> = Vec::with_capacity(max_depth + skip + 8);
            let mut start = None;

            backtrace::trace(|frame| {
                if start.is_none() && frame.symbol_address() as usize == marker {
                    start = Some(raw.len() + 1);
                }
                raw.push(frame.ip() as usize);
                raw.len() < WALK_LIMIT
            });

            // `start` points just past `walk`; the next frame is `capture`.
            // If the unwinder never reported our marker keep everything.
            let first = match start {
                Some(idx) => idx + 1 + skip,
                None => 0,
            };

            raw.into_iter()
                .skip(first)
                .take(max_depth)
                .map(Frame::from_ip)
                .collect()
        }

        fn resolve_ip(ip: usize) -> Symbol {
            let mut symbol = Symbol::unresolved(ip);
            // Inlined frames report several symbols; keep the innermost.
            backtrace::resolve(ip as *mut std::ffi::c_void, |sym| {
                if symbol.function.is_some() {
                    return;
                }
                symbol.function = sym.name().map(|name| format!("{:#}", name));
                symbol.file = sym.filename().map(Path::to_path_buf);
                symbol.line = sym.lineno();
            });
            symbol
        }
    } else {
        fn walk(_skip: usize, _max_depth: usize) -> Vec<Frame> {
            Vec::new()
        }

        fn resolve_ip(ip: usize) -> Symbol {
            Symbol::unresolved(ip)
        }
    }
}
