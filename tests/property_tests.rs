//! Property-based tests using proptest

use proptest::prelude::*;
use treetrace::prelude::*;
use treetrace::{parse_error_args, LazyMessage, RingBuffer};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Performance),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
    ]
}

proptest! {
    /// Level comparisons agree with rank comparisons
    #[test]
    fn prop_level_ordering_matches_ranks(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.rank() <= b.rank());
        prop_assert_eq!(a < b, a.rank() < b.rank());
    }

    /// Level names parse back to the same level
    #[test]
    fn prop_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// After k insertions into a capacity-n ring, exactly the last
    /// min(k, n) values are held, oldest first
    #[test]
    fn prop_ring_buffer_fifo_overwrite(capacity in 1usize..24, count in 0usize..80) {
        let mut ring = RingBuffer::new(capacity);
        for i in 0..count {
            ring.push(i);
        }
        let held: Vec<usize> = ring.iter().copied().collect();
        let expected: Vec<usize> = (count.saturating_sub(capacity)..count).collect();
        prop_assert_eq!(held, expected);
        prop_assert_eq!(ring.len(), count.min(capacity));
    }

    /// The lazy join equals an eager join and is stable across reads
    #[test]
    fn prop_lazy_message_matches_eager_join(parts in proptest::collection::vec("[^ ]{0,12}", 0..6)) {
        let lazy = LazyMessage::new(parts.clone());
        let joined = parts.join(" ");
        prop_assert_eq!(lazy.as_str(), joined.as_str());
        prop_assert_eq!(lazy.as_str(), joined.as_str());
    }

    /// Texts-only argument lists always parse: first text is the
    /// message, the rest are params in order
    #[test]
    fn prop_parse_texts_in_order(texts in proptest::collection::vec(".{0,10}", 1..8)) {
        let args = texts.iter().cloned().map(ErrorArg::Text).collect();
        let parsed = parse_error_args(args).unwrap();
        prop_assert_eq!(&parsed.message, &texts[0]);
        prop_assert_eq!(&parsed.params[..], &texts[1..]);
        prop_assert!(parsed.cause.is_none() && parsed.info.is_none());
    }

    /// An argument list without any text never parses
    #[test]
    fn prop_parse_rejects_without_message(n_info in 0usize..2, n_cause in 0usize..2) {
        let mut args = Vec::new();
        for _ in 0..n_info {
            args.push(ErrorArg::Info(Details::new()));
        }
        for _ in 0..n_cause {
            args.push(ErrorArg::Cause(ChainedError::new("inner")));
        }
        prop_assert!(parse_error_args(args).is_err());
    }
}
