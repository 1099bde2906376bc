#[cfg(test)]
mod tests {
    use eisen::libs::task::{normalize_tag, Task, TaskKey, ValidateError, DEFAULT_DESCRIPTION};

    #[test]
    fn test_key_folds_case_and_symbols() {
        let key = TaskKey::parse("  Clean the House! #1 ").unwrap();
        assert_eq!(key.as_str(), "cleanthehouse1");

        assert_eq!(TaskKey::parse("Clean House").unwrap(), TaskKey::parse("clean-house").unwrap());
        assert_eq!(TaskKey::parse("CLEANHOUSE").unwrap(), TaskKey::parse("Clean House").unwrap());
    }

    #[test]
    fn test_key_keeps_unicode_letters() {
        let key = TaskKey::parse("Überholung & Café").unwrap();
        assert_eq!(key.as_str(), "überholungcafé");
    }

    #[test]
    fn test_key_rejects_titles_without_substance() {
        assert_eq!(TaskKey::parse(""), Err(ValidateError::Title(String::new())));
        assert!(TaskKey::parse("  ").is_err());
        assert!(TaskKey::parse("!!! --- ???").is_err());
    }

    #[test]
    fn test_key_displays_its_folded_form() {
        let key = TaskKey::parse("Display Me").unwrap();
        assert_eq!(key.to_string(), "displayme");
    }

    #[test]
    fn test_tags_normalize_like_titles() {
        assert_eq!(normalize_tag("A-1").unwrap(), "a1");
        assert_eq!(normalize_tag("  Deep Work  ").unwrap(), "deepwork");
        assert_eq!(normalize_tag("***"), Err(ValidateError::Tag("***".to_string())));
    }

    #[test]
    fn test_fresh_task_defaults() {
        let task = Task::new("Fresh");
        assert_eq!(task.title, "Fresh");
        assert_eq!(task.description, DEFAULT_DESCRIPTION);
        assert!(!task.urgent);
        assert!(!task.important);
        assert!(task.tags.is_empty());
        assert!(task.dirty);
    }

    #[test]
    fn test_task_key_tracks_the_current_title() {
        let mut task = Task::new("First Title");
        assert_eq!(task.key(), TaskKey::parse("First Title").unwrap());

        task.title = "Second Title".to_string();
        assert_eq!(task.key(), TaskKey::parse("Second Title").unwrap());
    }

    #[test]
    fn test_validate_errors_read_well() {
        let err = TaskKey::parse("!!!").unwrap_err();
        assert_eq!(err.to_string(), "task title \"!!!\" is empty or not parsable");
        let err = normalize_tag("").unwrap_err();
        assert_eq!(err.to_string(), "tag \"\" is empty or not parsable");
    }
}
