#[cfg(test)]
mod tests {
    use eisen::board::Board;
    use eisen::libs::task::TaskPatch;
    use serde_json::Value;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct RenameTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for RenameTestContext {
        fn setup() -> Self {
            RenameTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl RenameTestContext {
        fn dir(&self) -> PathBuf {
            self.temp_dir.path().join("board")
        }

        fn board(&self) -> Board {
            Board::load("test", self.dir()).unwrap()
        }

        fn task_file(&self, stem: &str) -> PathBuf {
            self.dir().join(format!("{stem}.task"))
        }
    }

    fn rename_patch(target: &str) -> TaskPatch {
        TaskPatch {
            rename: Some(target.to_string()),
            ..TaskPatch::default()
        }
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_rename_moves_the_file_at_flush(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Old Name").unwrap();
        board.flush();
        assert!(ctx.task_file("oldname").exists());

        assert!(board.rename(&task, "New Name").unwrap());
        board.flush();

        assert!(!ctx.task_file("oldname").exists());
        assert!(ctx.task_file("newname").exists());
        assert!(board.find("Old Name").unwrap().is_none());
        assert!(board.find("New Name").unwrap().unwrap().same(&task));
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_rename_keeps_bucket_membership(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Before").unwrap();
        board.set_urgent(&task, true);
        board.add_tag(&task, "sticky").unwrap();

        board.rename(&task, "After").unwrap();

        assert!(board.by_urgency(true).iter().any(|t| t.same(&task)));
        assert!(board.by_tag("sticky").iter().any(|t| t.same(&task)));
        assert_eq!(task.read().title, "After");
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_case_only_rename_keeps_the_file(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Clean House").unwrap();
        board.flush();

        assert!(board.rename(&task, "CLEAN HOUSE").unwrap());
        // Same identity, same path, nothing to trash
        assert_eq!(board.trash_len(), 0);
        board.flush();

        assert!(ctx.task_file("cleanhouse").exists());
        let value: Value = serde_json::from_str(&fs::read_to_string(ctx.task_file("cleanhouse")).unwrap()).unwrap();
        assert_eq!(value["Title"], "CLEAN HOUSE");
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_rename_to_same_title_is_a_no_op(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Stay").unwrap();
        board.flush();

        assert!(!board.rename(&task, "Stay").unwrap());
        assert_eq!(board.trash_len(), 0);
        assert!(board.pending().is_empty());
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_rename_patch_rerun_is_idempotent(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        board.get_or_create("Old Name").unwrap();

        let first = board.update("Old Name", &rename_patch("New Name")).unwrap();
        // The retry addresses a title that no longer exists; it must reach
        // the renamed record instead of materializing a fresh blank
        let second = board.update("Old Name", &rename_patch("New Name")).unwrap();

        assert!(first.same(&second));
        assert_eq!(board.len(), 1);
        assert!(board.find("Old Name").unwrap().is_none());
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_rename_onto_existing_title_supersedes(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        let survivor = board
            .update(
                "Task A",
                &TaskPatch {
                    description: Some("from a".to_string()),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        board.update(
            "Task B",
            &TaskPatch {
                description: Some("from b".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();
        board.flush();

        board.update("Task A", &rename_patch("Task B")).unwrap();
        board.flush();

        assert_eq!(board.len(), 1);
        let task = board.find("Task B").unwrap().unwrap();
        assert!(task.same(&survivor));
        assert_eq!(task.read().description, "from a");
        assert!(!ctx.task_file("taska").exists());

        let value: Value = serde_json::from_str(&fs::read_to_string(ctx.task_file("taskb")).unwrap()).unwrap();
        assert_eq!(value["Description"], "from a");
    }

    #[test_context(RenameTestContext)]
    #[test]
    fn test_rename_survives_reload(ctx: &mut RenameTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Original").unwrap();
        board.set_description(&task, "carried along");
        board.rename(&task, "Renamed").unwrap();
        board.flush();

        let reloaded = ctx.board();
        assert_eq!(reloaded.len(), 1);
        let task = reloaded.find("Renamed").unwrap().unwrap();
        assert_eq!(task.read().description, "carried along");
        assert!(reloaded.find("Original").unwrap().is_none());
    }
}
