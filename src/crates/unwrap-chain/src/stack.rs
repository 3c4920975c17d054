//! Lazily resolved call-stack context
//!
//! Capturing a [`Stack`] records instruction pointers only. Symbols are
//! resolved one frame at a time as [`Frames`] is advanced, so asking for the
//! first frame never pays for resolving the whole trace.

use backtrace::{Backtrace, BacktraceFrame};
use std::fmt;
use std::path::{Path, PathBuf};

/// Functions under these paths construct errors and capture their stacks.
/// A capture starts with a run of them; the first frame after the run is the
/// raise site. Impl paths (`<unwrap_chain::..>::f`) are matched without the `<`.
const CAPTURE_PREFIXES: &[&str] = &[
    "backtrace::",
    "unwrap_chain::stack::",
    "unwrap_chain::wrappers::",
    "unwrap_chain::task::",
];

/// Unresolved call-stack capture
#[derive(Clone)]
pub struct Stack {
    inner: Option<Backtrace>,
}

impl Stack {
    /// Capture the current call stack without resolving symbols
    pub fn capture() -> Self {
        Self {
            inner: Some(Backtrace::new_unresolved()),
        }
    }

    /// A stack with no frames
    pub fn empty() -> Self {
        Self { inner: None }
    }

    /// Number of raw frames captured, before trimming
    pub fn raw_len(&self) -> usize {
        self.raw().len()
    }

    /// Iterate over resolved, trimmed frames
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            raw: self.raw().iter(),
            resolved: 0,
            past_capture: false,
        }
    }

    /// The first frame that resolves to a symbol outside the capture machinery
    pub fn first_frame(&self) -> Option<Frame> {
        self.frames().next()
    }

    fn raw(&self) -> &[BacktraceFrame] {
        match &self.inner {
            Some(backtrace) => backtrace.frames(),
            None => &[],
        }
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("raw_frames", &self.raw_len())
            .finish()
    }
}

/// A resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled function path, without the hash suffix
    pub function: String,
    /// Source file, when debug info has it
    pub file: Option<PathBuf>,
    /// Source line, when debug info has it
    pub line: Option<u32>,
}

fn is_capture_path(function: &str) -> bool {
    let path = function.strip_prefix('<').unwrap_or(function);
    CAPTURE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}", self.function)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({}:{})", file.display(), line),
            (Some(file), None) => write!(f, " ({})", file.display()),
            _ => Ok(()),
        }
    }
}

/// Iterator resolving one captured frame per step
///
/// The leading run of capture frames is skipped; frames after the raise
/// site are yielded as they are.
pub struct Frames<'a> {
    raw: std::slice::Iter<'a, BacktraceFrame>,
    resolved: usize,
    past_capture: bool,
}

impl Frames<'_> {
    /// Number of raw frames resolved so far
    pub fn resolved(&self) -> usize {
        self.resolved
    }
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        for raw in self.raw.by_ref() {
            self.resolved += 1;
            let skip_capture = !self.past_capture;
            if let Some(frame) = resolve(raw, skip_capture) {
                self.past_capture = true;
                return Some(frame);
            }
        }
        None
    }
}

/// Resolve one instruction pointer.
///
/// An inlined call yields several symbols for one pointer, innermost first.
/// With `skip_capture`, the first symbol outside the capture machinery wins,
/// so a constructor inlined into its caller still reports the caller.
fn resolve(raw: &BacktraceFrame, skip_capture: bool) -> Option<Frame> {
    let mut resolved = None;
    backtrace::resolve(raw.ip(), |symbol| {
        if resolved.is_some() {
            return;
        }
        let Some(name) = symbol.name() else {
            return;
        };
        let function = format!("{:#}", name);
        if skip_capture && is_capture_path(&function) {
            return;
        }
        resolved = Some(Frame {
            function,
            file: symbol.filename().map(Path::to_path_buf),
            line: symbol.lineno(),
        });
    });
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack_has_no_frames() {
        let stack = Stack::empty();
        assert_eq!(stack.raw_len(), 0);
        assert!(stack.first_frame().is_none());
        assert_eq!(stack.frames().count(), 0);
    }

    #[test]
    fn test_capture_records_frames() {
        let stack = Stack::capture();
        assert!(stack.raw_len() > 0);
    }

    #[test]
    fn test_first_frame_is_outside_capture_machinery() {
        let stack = Stack::capture();
        if let Some(frame) = stack.first_frame() {
            assert!(!is_capture_path(&frame.function), "{}", frame.function);
        }
    }

    #[test]
    fn test_first_frame_resolves_lazily() {
        let stack = Stack::capture();
        let mut frames = stack.frames();
        assert_eq!(frames.resolved(), 0);

        if frames.next().is_some() {
            assert!(frames.resolved() < stack.raw_len());
        }
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame {
            function: "app::handler".to_string(),
            file: Some(PathBuf::from("src/handler.rs")),
            line: Some(42),
        };
        assert_eq!(frame.to_string(), "at app::handler (src/handler.rs:42)");

        let bare = Frame {
            function: "app::handler".to_string(),
            file: None,
            line: None,
        };
        assert_eq!(bare.to_string(), "at app::handler");
    }

    #[test]
    fn test_constructor_paths_are_capture_machinery() {
        assert!(is_capture_path("backtrace::backtrace::trace"));
        assert!(is_capture_path("unwrap_chain::wrappers::PlainError::new"));
        assert!(is_capture_path("<unwrap_chain::wrappers::TaskFailed>::from_boxed"));
        assert!(is_capture_path("unwrap_chain::task::join::{{closure}}"));
        assert!(is_capture_path("unwrap_chain::stack::Stack::capture"));
        assert!(!is_capture_path("app::handler"));
        assert!(!is_capture_path("unwrap_chain_ext::raise"));
        assert!(!is_capture_path("<app::Handler as core::ops::Fn<()>>::call"));
    }
}
