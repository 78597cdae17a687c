#[cfg(test)]
mod tests {
    use crate::core::domain::{CanonicalBlock, SectionRange, WeekSet, Weekday};
    use crate::parsing::json_parser::{
        blocks_to_json, parse_changes_json_str, parse_timetable_json, parse_timetable_json_str,
        CourseRecord, OddEvenSpec, WeekSpec,
    };
    use crate::parsing::weeks::OddEvenFilter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Test a document with both courses and changes
    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "courses": [
                {
                    "name": "Signals and Systems",
                    "teacher": "Zhao",
                    "location": "E-301",
                    "weekday": 2,
                    "startSection": 3,
                    "endSection": 4,
                    "weeks": "1-16(单)"
                }
            ],
            "changes": [
                {
                    "courseName": "Signals and Systems",
                    "targetTeacher": "Zhao",
                    "targetWeekday": 2,
                    "targetStartSection": 3,
                    "targetEndSection": 4,
                    "weeksToRemoveExpression": "5",
                    "replacement": {
                        "weekday": 4,
                        "startSection": 1,
                        "endSection": 2,
                        "weekExpression": "5",
                        "location": "E-105"
                    }
                }
            ]
        }"#;

        let input = parse_timetable_json_str(json).unwrap();
        assert_eq!(input.courses.len(), 1);
        assert_eq!(input.changes.len(), 1);

        let course = &input.courses[0];
        assert_eq!(course.name.as_deref(), Some("Signals and Systems"));
        assert_eq!(course.start_section, Some(3));
        assert_eq!(course.weeks, Some(WeekSpec::Expression("1-16(单)".into())));

        let change = &input.changes[0];
        assert_eq!(change.teacher.as_deref(), Some("Zhao"));
        assert_eq!(change.weekday, 2);
        assert_eq!(change.start_section, 3);
        let replacement = change.replacement.as_ref().unwrap();
        assert_eq!(replacement.weekday, 4);
        assert_eq!(replacement.location.as_deref(), Some("E-105"));
    }

    /// Test explicit week lists, field aliases and odd/even flags
    #[test]
    fn test_aliases_and_week_lists() {
        let json = r#"{
            "lessons": [
                {
                    "courseName": "Databases",
                    "position": "Lab 2",
                    "day": 5,
                    "sections": "07,08",
                    "weeks": [1, 2, 3, 4],
                    "oddEven": 2
                },
                {
                    "name": "Databases",
                    "day": 5,
                    "startSection": 9,
                    "endSection": 9,
                    "weekMask": "0011",
                    "oddEven": "单"
                }
            ]
        }"#;

        let input = parse_timetable_json_str(json).unwrap();
        assert_eq!(input.courses.len(), 2);
        assert!(input.changes.is_empty());

        let first = &input.courses[0];
        assert_eq!(first.location.as_deref(), Some("Lab 2"));
        assert_eq!(first.weekday, 5);
        assert_eq!(first.sections.as_deref(), Some("07,08"));
        assert_eq!(first.weeks, Some(WeekSpec::List(vec![1, 2, 3, 4])));
        assert_eq!(first.odd_even, Some(OddEvenSpec::Code(2)));
        assert!(first.teacher.is_none());

        let second = &input.courses[1];
        assert_eq!(second.week_mask.as_deref(), Some("0011"));
        assert_eq!(
            second.odd_even.as_ref().map(OddEvenSpec::to_filter),
            Some(OddEvenFilter::OddOnly)
        );
    }

    /// Test that a bare array is accepted as a course list
    #[test]
    fn test_bare_array() {
        let json = r#"[{"name": "Art", "weekday": 1, "startSection": 1, "endSection": 2, "weeks": "1-8"}]"#;
        let input = parse_timetable_json_str(json).unwrap();
        assert_eq!(input.courses.len(), 1);
        assert!(input.changes.is_empty());
    }

    #[test]
    fn test_week_spec_resolution() {
        let list = WeekSpec::List(vec![4, -1, 0, 2, 3, 2]);
        assert_eq!(list.resolve(OddEvenFilter::None).as_slice(), &[2, 3, 4]);
        assert_eq!(list.resolve(OddEvenFilter::EvenOnly).as_slice(), &[2, 4]);

        let expr = WeekSpec::Expression("1-6".into());
        assert_eq!(expr.resolve(OddEvenFilter::OddOnly).as_slice(), &[1, 3, 5]);
    }

    /// Test missing top-level key
    #[test]
    fn test_missing_courses_key() {
        let result = parse_timetable_json_str(r#"{"schedule": []}"#);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("courses"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_invalid_json_syntax() {
        let result = parse_timetable_json_str("{not json");
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Invalid JSON syntax"));
    }

    #[test]
    fn test_scalar_document_rejected() {
        assert!(parse_timetable_json_str("42").is_err());
    }

    /// Test that deserialization errors carry the JSON path
    #[test]
    fn test_error_reports_field_path() {
        let json = r#"{"courses": [
            {"name": "Ok", "weekday": 1, "weeks": "1"},
            {"name": "Bad", "weekday": "Monday", "weeks": "1"}
        ]}"#;
        let msg = parse_timetable_json_str(json).unwrap_err().to_string();
        assert!(msg.contains("courses[1].weekday"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_parse_changes_list() {
        let json = r#"[
            {"weekday": 3, "startSection": 5, "endSection": 6, "weeksToRemove": [7, 8]},
            {"day": 1, "startSection": 1, "endSection": 2, "weeksToRemoveMask": "01"}
        ]"#;
        let changes = parse_changes_json_str(json).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].weeks_to_remove, Some(WeekSpec::List(vec![7, 8])));
        assert!(changes[0].replacement.is_none());
        assert_eq!(changes[1].weekday, 1);
        assert_eq!(changes[1].weeks_to_remove_mask.as_deref(), Some("01"));
    }

    #[test]
    fn test_parse_changes_missing_slot_fails() {
        let result = parse_changes_json_str(r#"[{"weekday": 3}]"#);
        assert!(result.is_err());
    }

    /// Test reading from a file
    #[test]
    fn test_parse_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"courses": [{{"name": "Music", "weekday": 6, "sections": "1-2", "weeks": "3-5"}}]}}"#
        )
        .unwrap();

        let input = parse_timetable_json(file.path()).unwrap();
        assert_eq!(input.courses[0].name.as_deref(), Some("Music"));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_timetable_json(std::path::Path::new("/nonexistent/timetable.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read JSON file"));
    }

    #[test]
    fn test_blocks_to_json_wire_shape() {
        let block = CanonicalBlock {
            course_name: "Music".into(),
            teacher: "Sun".into(),
            location: "Hall".into(),
            weekday: Weekday::new(6).unwrap(),
            sections: SectionRange::new(1, 2).unwrap(),
            weeks: WeekSet::range(3, 5),
        };

        let json = blocks_to_json(&[block], false).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Music","teacher":"Sun","location":"Hall","weekday":6,"startSection":1,"endSection":2,"weeks":[3,4,5]}]"#
        );

        let records: Vec<CourseRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records[0].end_section, 2);

        assert_eq!(blocks_to_json(&[], true).unwrap(), "[]");
    }
}
