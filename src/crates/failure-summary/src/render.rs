//! Recursive rendering of a failure tree
//!
//! The current depth and the item prefix are passed down explicitly on every
//! call; nothing about indentation is kept between calls or derived from
//! text already written. Members of aggregates and causal chains are visited
//! in their recorded order, so the same tree always renders to the same text.

use crate::config::SummaryConfig;
use unwrap_chain::{is_wrapper, unwrap_one, AggregateError, CausalChain, Failure, Stack};

/// First line of every summary
pub const BANNER: &str = "=== EXCEPTION SUMMARY ===";

/// Line between consecutive members of an aggregate
pub const SEPARATOR: &str = "--";

/// Line between consecutive entries of a causal chain
pub const CAUSED_MARKER: &str = "which caused:";

/// Shown instead of a frame when a stack has none left after trimming
pub const NO_STACK_FRAMES: &str = "[no stack frames available]";

/// Shown for an empty causal chain
pub const NO_FAILURES: &str = "[no failures in flight]";

/// Heading of an aggregate with more than one member
pub fn aggregate_heading(items: usize) -> String {
    format!("aggregate failure ({} items):", items)
}

/// Render the summary for `root`, banner included
///
/// A `config` that fails [`SummaryConfig::validate`] is replaced by the
/// defaults.
pub fn render(root: &dyn Failure, config: &SummaryConfig) -> String {
    let fallback;
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid summary configuration, rendering with defaults");
            fallback = SummaryConfig::default();
            &fallback
        }
    };

    let mut renderer = Renderer::new(config);
    renderer.banner();
    renderer.failure(root, None, 0, "");
    renderer.finish()
}

struct Renderer<'c> {
    config: &'c SummaryConfig,
    out: String,
}

impl<'c> Renderer<'c> {
    fn new(config: &'c SummaryConfig) -> Self {
        Self {
            config,
            out: String::new(),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn banner(&mut self) {
        self.out.push_str(BANNER);
        self.out.push_str("\n\n");
    }

    /// Skip wrapper layers, then dispatch on the structure of what remains.
    ///
    /// A leaf without its own stack uses the nearest wrapper's, looking
    /// through single-member aggregates.
    fn failure<'a>(
        &mut self,
        failure: &'a dyn Failure,
        inherited: Option<&'a Stack>,
        depth: usize,
        prefix: &str,
    ) {
        let mut current = failure;
        let mut stack = current.stack().or(inherited);
        while is_wrapper(current) {
            current = unwrap_one(current);
            stack = current.stack().or(stack);
        }

        if let Some(aggregate) = current.downcast_ref::<AggregateError>() {
            self.aggregate(aggregate, stack, depth, prefix);
        } else if let Some(chain) = current.downcast_ref::<CausalChain>() {
            self.causal(chain, depth, prefix);
        } else {
            self.leaf(current, stack, depth, prefix);
        }
    }

    fn aggregate<'a>(
        &mut self,
        aggregate: &'a AggregateError,
        stack: Option<&'a Stack>,
        depth: usize,
        prefix: &str,
    ) {
        let mut members = aggregate.iter();
        match members.len() {
            0 => self.leaf(aggregate, stack, depth, prefix),
            1 => {
                if let Some(only) = members.next() {
                    self.failure(only, stack, depth, prefix);
                }
            }
            items => {
                self.line(depth, prefix, &aggregate_heading(items));
                for (i, member) in members.enumerate() {
                    if i > 0 {
                        self.line(depth + 1, "", SEPARATOR);
                    }
                    let ordinal = format!("{}. ", i + 1);
                    self.failure(member, None, depth + 1, &ordinal);
                }
            }
        }
    }

    /// Every entry renders at `depth`; the prefix belongs to the first only.
    fn causal(&mut self, chain: &CausalChain, depth: usize, prefix: &str) {
        if chain.is_empty() {
            self.line(depth, prefix, NO_FAILURES);
            return;
        }

        for (i, failure) in chain.iter().enumerate() {
            if i == 0 {
                self.failure(failure, None, depth, prefix);
            } else {
                self.out.push('\n');
                self.line(depth, "", CAUSED_MARKER);
                self.failure(failure, None, depth, "");
            }
        }
    }

    fn leaf(&mut self, failure: &dyn Failure, stack: Option<&Stack>, depth: usize, prefix: &str) {
        let message = failure.to_string();
        let mut lines = message.lines();
        self.line(depth, prefix, lines.next().unwrap_or(""));
        for line in lines {
            self.line(depth, "", line);
        }

        if !self.config.show_stack {
            return;
        }
        if let Some(stack) = stack {
            match stack.first_frame() {
                Some(frame) => self.line(depth + 1, "", &frame.to_string()),
                None => self.line(depth + 1, "", NO_STACK_FRAMES),
            }
        }
    }

    fn line(&mut self, depth: usize, prefix: &str, text: &str) {
        if !prefix.is_empty() || !text.is_empty() {
            let width = depth * self.config.indent_width;
            self.out.extend(std::iter::repeat(' ').take(width));
            self.out.push_str(prefix);
            self.out.push_str(text);
        }
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unwrap_chain::{PlainError, TaskFailed};

    fn plain(message: &str) -> PlainError {
        PlainError::with_stack(message, Stack::empty())
    }

    fn no_stack() -> SummaryConfig {
        SummaryConfig::new().with_stack(false)
    }

    #[test]
    fn test_single_leaf() {
        let text = render(&plain("boom"), &no_stack());
        assert_eq!(text, "=== EXCEPTION SUMMARY ===\n\nboom\n");
    }

    #[test]
    fn test_wrappers_are_skipped() {
        let err = TaskFailed::new("outer", TaskFailed::new("inner", plain("boom")));
        let text = render(&err, &no_stack());
        assert_eq!(text, "=== EXCEPTION SUMMARY ===\n\nboom\n");
    }

    #[test]
    fn test_multiline_message_keeps_indent() {
        let agg = AggregateError::new()
            .with(plain("line one\nline two"))
            .with(plain("other"));
        let text = render(&agg, &no_stack());

        let expected = "\
=== EXCEPTION SUMMARY ===

aggregate failure (2 items):
    1. line one
    line two
    --
    2. other
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_blank_message_lines_have_no_trailing_spaces() {
        let agg = AggregateError::new()
            .with(plain("top\n\nbottom"))
            .with(plain("other"));
        let text = render(&agg, &no_stack());
        assert!(text.contains("    1. top\n\n    bottom\n"));
    }

    #[test]
    fn test_empty_stack_renders_placeholder() {
        let text = render(&plain("boom"), &SummaryConfig::default());
        assert_eq!(
            text,
            "=== EXCEPTION SUMMARY ===\n\nboom\n    [no stack frames available]\n"
        );
    }

    #[test]
    fn test_leaf_without_stack_has_no_frame_line() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "io failed");
        let text = render(&err, &SummaryConfig::default());
        assert_eq!(text, "=== EXCEPTION SUMMARY ===\n\nio failed\n");
    }

    #[inline(never)]
    fn read_manifest() -> PlainError {
        PlainError::new("boom")
    }

    #[inline(never)]
    fn spawn_reader(inner: impl Failure) -> TaskFailed {
        TaskFailed::new("reader", inner)
    }

    fn io_failed() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, "io failed")
    }

    #[test]
    fn test_captured_stack_shows_raise_site() {
        let text = render(&read_manifest(), &SummaryConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("    at "), "{}", lines[3]);
        assert!(lines[3].contains("read_manifest"), "{}", lines[3]);
    }

    #[test]
    fn test_leaf_inherits_wrapper_stack() {
        let text = render(&spawn_reader(io_failed()), &SummaryConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "io failed");
        assert!(lines[3].contains("spawn_reader"), "{}", lines[3]);
    }

    #[test]
    fn test_single_member_aggregate_passes_wrapper_stack_down() {
        let direct = render(&spawn_reader(io_failed()), &SummaryConfig::default());
        let through = render(
            &spawn_reader(AggregateError::new().with(io_failed())),
            &SummaryConfig::default(),
        );

        let direct: Vec<&str> = direct.lines().collect();
        let through: Vec<&str> = through.lines().collect();
        assert_eq!(through.len(), direct.len());
        assert_eq!(through[2], "io failed");
        assert!(through[3].contains("spawn_reader"), "{}", through[3]);
    }

    #[test]
    fn test_multi_member_aggregate_does_not_pass_wrapper_stack_down() {
        let err = spawn_reader(AggregateError::new().with(io_failed()).with(io_failed()));
        let text = render(&err, &SummaryConfig::default());
        assert!(!text.contains("spawn_reader"));
    }

    #[test]
    fn test_out_of_range_indent_falls_back_to_defaults() {
        let agg = AggregateError::new()
            .with(AggregateError::new().with(plain("x")).with(plain("y")))
            .with(plain("z"));

        let huge = SummaryConfig::new().with_indent_width(usize::MAX / 2 + 1);
        assert_eq!(render(&agg, &huge), render(&agg, &SummaryConfig::default()));

        let zero = no_stack().with_indent_width(0);
        assert_eq!(render(&agg, &zero), render(&agg, &SummaryConfig::default()));
    }

    #[test]
    fn test_empty_aggregate_renders_as_leaf() {
        let text = render(&AggregateError::new(), &no_stack());
        assert_eq!(text, "=== EXCEPTION SUMMARY ===\n\nno failures\n");
    }

    #[test]
    fn test_custom_indent_width() {
        let agg = AggregateError::new().with(plain("a")).with(plain("b"));
        let text = render(&agg, &no_stack().with_indent_width(2));
        assert!(text.contains("\n  1. a\n  --\n  2. b\n"));
    }

    #[test]
    fn test_empty_causal_chain() {
        let text = render(&CausalChain::default(), &no_stack());
        assert_eq!(text, "=== EXCEPTION SUMMARY ===\n\n[no failures in flight]\n");
    }

    #[test]
    fn test_aggregate_heading() {
        assert_eq!(aggregate_heading(3), "aggregate failure (3 items):");
    }
}
