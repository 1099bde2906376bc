#[cfg(test)]
mod tests {
    use eisen::board::Board;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ActiveTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ActiveTestContext {
        fn setup() -> Self {
            ActiveTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl ActiveTestContext {
        fn dir(&self) -> PathBuf {
            self.temp_dir.path().join("board")
        }

        fn board(&self) -> Board {
            Board::load("test", self.dir()).unwrap()
        }
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_set_active_requires_an_existing_task(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        assert!(board.set_active("Nobody").is_err());
        assert!(board.active().is_none());

        board.get_or_create("Somebody").unwrap();
        let display = board.set_active("Somebody").unwrap();
        assert_eq!(display, "Somebody");
        assert_eq!(board.active(), Some("Somebody".to_string()));
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_set_active_returns_the_display_title(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        board.get_or_create("Clean House").unwrap();

        // Any casing addresses the record; the stored spelling wins
        let display = board.set_active("clean-HOUSE").unwrap();
        assert_eq!(display, "Clean House");
        assert_eq!(board.active(), Some("Clean House".to_string()));
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_active_persists_as_a_bare_json_string(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        board.get_or_create("Persisted").unwrap();
        board.set_active("Persisted").unwrap();

        let raw = fs::read_to_string(ctx.dir().join("active.json")).unwrap();
        let stored: String = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, "Persisted");
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_active_survives_reload(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        board.get_or_create("Carry On").unwrap();
        board.set_active("Carry On").unwrap();
        board.flush();

        let reloaded = ctx.board();
        assert_eq!(reloaded.active(), Some("Carry On".to_string()));
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_clear_active_removes_the_file(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        board.get_or_create("Short Lived").unwrap();
        board.set_active("Short Lived").unwrap();
        assert!(ctx.dir().join("active.json").exists());

        board.clear_active().unwrap();
        assert!(board.active().is_none());
        assert!(!ctx.dir().join("active.json").exists());
        // Clearing twice stays quiet
        board.clear_active().unwrap();

        assert!(ctx.board().active().is_none());
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_delete_clears_a_matching_active_pointer(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        board.get_or_create("Going Away").unwrap();
        board.get_or_create("Staying").unwrap();
        board.set_active("Going Away").unwrap();

        board.delete("Going Away").unwrap();
        assert!(board.active().is_none());

        // Deleting an unrelated task leaves the pointer alone
        board.set_active("Staying").unwrap();
        board.get_or_create("Unrelated").unwrap();
        board.delete("Unrelated").unwrap();
        assert_eq!(board.active(), Some("Staying".to_string()));
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_rename_moves_a_matching_active_pointer(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Old Name").unwrap();
        board.set_active("Old Name").unwrap();

        board.rename(&task, "New Name").unwrap();
        assert_eq!(board.active(), Some("New Name".to_string()));

        // Deleting under the new name clears the pointer
        board.delete("New Name").unwrap();
        assert!(board.active().is_none());

        // A later create under the abandoned title does not become active
        board.get_or_create("Old Name").unwrap();
        assert!(board.active().is_none());
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_rename_of_an_unrelated_task_leaves_the_pointer_alone(ctx: &mut ActiveTestContext) {
        let board = ctx.board();
        board.get_or_create("Keeper").unwrap();
        board.set_active("Keeper").unwrap();

        let other = board.get_or_create("Mover").unwrap();
        board.rename(&other, "Moved").unwrap();
        assert_eq!(board.active(), Some("Keeper".to_string()));

        // A casing-only rename of the active task updates the stored spelling
        let keeper = board.find("Keeper").unwrap().unwrap();
        board.rename(&keeper, "KEEPER").unwrap();
        assert_eq!(board.active(), Some("KEEPER".to_string()));
    }

    #[test_context(ActiveTestContext)]
    #[test]
    fn test_blank_active_file_reads_as_none(ctx: &mut ActiveTestContext) {
        fs::create_dir_all(ctx.dir()).unwrap();
        fs::write(ctx.dir().join("active.json"), "\"\"").unwrap();

        assert!(ctx.board().active().is_none());
    }
}
