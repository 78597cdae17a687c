#[cfg(test)]
mod tests {
    use crate::core::domain::{CanonicalBlock, SectionRange, WeekSet, Weekday};
    use crate::io::loaders::{write_blocks, TimetableLoader};
    use crate::parsing::json_parser::CourseRecord;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    /// Helper to create a temp JSON file
    fn create_temp_json_file() -> NamedTempFile {
        let json_content = r#"{
            "courses": [
                {"name": "Genetics", "teacher": "Ma", "location": "Bio-2",
                 "weekday": 1, "startSection": 1, "endSection": 2, "weeks": "1-8"},
                {"name": "Genetics", "teacher": "Ma", "location": "Bio-2",
                 "weekday": 3, "startSection": 3, "endSection": 4, "weeks": [2, 4, 6]}
            ],
            "changes": [
                {"weekday": 1, "startSection": 1, "endSection": 2, "weeksToRemove": "4"}
            ]
        }"#;

        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json_content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = create_temp_json_file();
        let input = TimetableLoader::load_from_file(file.path()).unwrap();
        assert_eq!(input.courses.len(), 2);
        assert_eq!(input.changes.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".csv").tempfile().unwrap();
        let err = TimetableLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_missing_extension() {
        let file = NamedTempFile::new().unwrap();
        let err = TimetableLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("no extension"));
    }

    #[test]
    fn test_load_from_json_str_error_context() {
        let err = TimetableLoader::load_from_json_str("[1, 2").unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON string"));
    }

    #[test]
    fn test_load_changes_from_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"weekday": 2, "startSection": 1, "endSection": 2}]"#)
            .unwrap();
        let changes = TimetableLoader::load_changes_from_file(file.path()).unwrap();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].weeks_to_remove.is_none());
    }

    #[test]
    fn test_write_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let block = CanonicalBlock {
            course_name: "Genetics".into(),
            teacher: "Ma".into(),
            location: "Bio-2".into(),
            weekday: Weekday::new(1).unwrap(),
            sections: SectionRange::new(1, 2).unwrap(),
            weeks: WeekSet::from_weeks([1, 2, 3]),
        };

        write_blocks(&path, &[block.clone()], true).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'));
        let records: Vec<CourseRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weeks, vec![1, 2, 3]);
        assert_eq!(records[0].start_section, 1);

        write_blocks(&path, &[block], false).unwrap();
        let compact = std::fs::read_to_string(&path).unwrap();
        assert!(!compact.contains('\n'));
        let records: Vec<CourseRecord> = serde_json::from_str(&compact).unwrap();
        assert_eq!(records[0].weeks, vec![1, 2, 3]);
    }
}
