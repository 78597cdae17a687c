#[cfg(test)]
mod tests {
    use crate::parsing::weeks::{
        parse_week_bitmask, parse_week_expression, OddEvenFilter, WeekExpressionParser,
    };

    fn parse(raw: &str) -> Vec<u32> {
        parse_week_expression(raw, OddEvenFilter::None).as_slice().to_vec()
    }

    #[test]
    fn test_simple_range() {
        assert_eq!(parse("1-4"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_mixed_singles_and_ranges() {
        assert_eq!(parse("1,3,5-9"), vec![1, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_unsorted_duplicates_are_normalized() {
        assert_eq!(parse("17,2,3,4,6,3-4"), vec![2, 3, 4, 6, 17]);
    }

    #[test]
    fn test_odd_filter_from_caller() {
        let weeks = parse_week_expression("1-16(单)", OddEvenFilter::OddOnly);
        assert_eq!(weeks.as_slice(), &[1, 3, 5, 7, 9, 11, 13, 15]);
    }

    #[test]
    fn test_odd_marker_in_token_without_caller_filter() {
        let weeks = parse_week_expression("7-15(单)", OddEvenFilter::None);
        assert_eq!(weeks.as_slice(), &[7, 9, 11, 13, 15]);
    }

    #[test]
    fn test_even_marker_applies_per_token() {
        let weeks = parse_week_expression("1-4周,6-10周(双)", OddEvenFilter::None);
        assert_eq!(weeks.as_slice(), &[1, 2, 3, 4, 6, 8, 10]);
    }

    #[test]
    fn test_even_filter_from_numeric_code() {
        let filter = OddEvenFilter::from_code(2);
        let weeks = parse_week_expression("7-15,17-20", filter);
        assert_eq!(weeks.as_slice(), &[8, 10, 12, 14, 18, 20]);
        assert_eq!(OddEvenFilter::from_code(-1), OddEvenFilter::None);
        assert_eq!(OddEvenFilter::from_code(1), OddEvenFilter::OddOnly);
    }

    #[test]
    fn test_section_annotation_is_stripped() {
        assert_eq!(parse("1-16周[01-02节]"), (1..=16).collect::<Vec<_>>());
        assert_eq!(
            parse("1-9,11-17(周)[01-02节]"),
            (1..=9).chain(11..=17).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_html_and_full_width_separators() {
        assert_eq!(parse("<span>1-3</span>，5、7"), vec![1, 2, 3, 5, 7]);
        assert_eq!(parse("第2~4周"), vec![2, 3, 4]);
    }

    #[test]
    fn test_inverted_range_is_skipped_not_fatal() {
        assert_eq!(parse("9-3,12"), vec![12]);
    }

    #[test]
    fn test_garbage_tokens_are_skipped() {
        assert_eq!(parse("abc,4,--,1-2-3,5"), vec![4, 5]);
    }

    #[test]
    fn test_empty_and_unparseable_inputs() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse("待定").is_empty());
    }

    #[test]
    fn test_week_zero_is_never_emitted() {
        assert_eq!(parse("0-2"), vec![1, 2]);
    }

    #[test]
    fn test_absurd_range_is_skipped() {
        assert_eq!(parse("1-999999,3"), vec![3]);
    }

    #[test]
    fn test_marker_detection() {
        assert_eq!(OddEvenFilter::from_marker("(单)"), OddEvenFilter::OddOnly);
        assert_eq!(OddEvenFilter::from_marker("Even weeks"), OddEvenFilter::EvenOnly);
        assert_eq!(OddEvenFilter::from_marker("单双"), OddEvenFilter::None);
        assert_eq!(OddEvenFilter::from_marker("1-16"), OddEvenFilter::None);
    }

    #[test]
    fn test_bitmask() {
        assert_eq!(parse_week_bitmask("111000").as_slice(), &[1, 2, 3]);
        assert_eq!(parse_week_bitmask("0000010001").as_slice(), &[6, 10]);
        assert!(parse_week_bitmask("").is_empty());
        assert!(parse_week_bitmask("000").is_empty());
    }

    #[test]
    fn test_batch_parsing() {
        let results = WeekExpressionParser::parse_batch(&["1-2", "", "5"], OddEvenFilter::None);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 2);
        assert!(results[1].is_empty());
        assert_eq!(results[2].as_slice(), &[5]);
    }
}
