#[cfg(test)]
mod tests {
    use eisen::board::Board;
    use eisen::libs::task::TaskPatch;
    use std::path::PathBuf;
    use std::sync::Barrier;
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConcurrencyTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConcurrencyTestContext {
        fn setup() -> Self {
            ConcurrencyTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl ConcurrencyTestContext {
        fn dir(&self) -> PathBuf {
            self.temp_dir.path().join("board")
        }

        fn board(&self) -> Board {
            Board::load("test", self.dir()).unwrap()
        }
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_racing_get_or_create_yields_one_record(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        board.get_or_create("Shared Task").unwrap();
                    }
                });
            }
        });

        assert_eq!(board.len(), 1);
        assert_eq!(board.pending().len(), 1);
        assert_eq!(board.flush().saved, 1);

        let files: Vec<_> = std::fs::read_dir(ctx.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_racing_creates_of_distinct_titles(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();

        thread::scope(|scope| {
            for i in 0..8 {
                let board = &board;
                scope.spawn(move || {
                    board.get_or_create(&format!("Task {i}")).unwrap();
                });
            }
        });

        assert_eq!(board.len(), 8);
        assert_eq!(board.flush().saved, 8);
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_racing_opposite_flips_settle_consistently(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Contended").unwrap();

        thread::scope(|scope| {
            for i in 0..8 {
                let board = &board;
                let task = &task;
                scope.spawn(move || {
                    for step in 0..50 {
                        board.set_urgent(task, (i + step) % 2 == 0);
                        board.set_important(task, (i + step) % 2 == 1);
                    }
                });
            }
        });

        // The buckets must agree with whatever values won
        let (urgent, important) = {
            let record = task.read();
            (record.urgent, record.important)
        };
        assert!(board.by_urgency(urgent).iter().any(|t| t.same(&task)));
        assert!(!board.by_urgency(!urgent).iter().any(|t| t.same(&task)));
        assert!(board.by_importance(important).iter().any(|t| t.same(&task)));
        assert!(!board.by_importance(!important).iter().any(|t| t.same(&task)));
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_creation_race_vs_flag_flip_lands_in_one_bucket(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();
        let barrier = Barrier::new(2);

        for round in 0..200 {
            let title = format!("Task {round}");
            thread::scope(|scope| {
                let board = &board;
                let barrier = &barrier;
                let title = &title;
                scope.spawn(move || {
                    barrier.wait();
                    let task = board.get_or_create(title).unwrap();
                    board.set_urgent(&task, true);
                });
                scope.spawn(move || {
                    barrier.wait();
                    board.get_or_create(title).unwrap();
                });
            });

            let task = board.find(&title).unwrap().unwrap();
            let urgent = task.read().urgent;
            assert!(board.by_urgency(urgent).iter().any(|t| t.same(&task)));
            assert!(
                !board.by_urgency(!urgent).iter().any(|t| t.same(&task)),
                "round {round}: record sits in both urgency buckets"
            );
        }
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_delete_racing_setter_leaves_no_ghost(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();
        let barrier = Barrier::new(2);

        for round in 0..200 {
            let title = format!("Doomed {round}");
            let task = board.get_or_create(&title).unwrap();
            thread::scope(|scope| {
                let board = &board;
                let barrier = &barrier;
                let title = &title;
                let task = &task;
                scope.spawn(move || {
                    barrier.wait();
                    board.delete(title).unwrap();
                });
                scope.spawn(move || {
                    barrier.wait();
                    board.set_urgent(task, true);
                });
            });

            assert!(board.find(&title).unwrap().is_none(), "round {round}: record survived its delete");
            let ghosted = board.by_urgency(true).iter().any(|t| t.same(&task)) || board.by_urgency(false).iter().any(|t| t.same(&task));
            assert!(!ghosted, "round {round}: deleted record still sits in a bucket");
        }
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_racing_tag_adds_all_land(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Well Tagged").unwrap();

        thread::scope(|scope| {
            for i in 0..8 {
                let board = &board;
                let task = &task;
                scope.spawn(move || {
                    board.add_tag(task, &format!("tag{i}")).unwrap();
                });
            }
        });

        assert_eq!(task.read().tags.len(), 8);
        assert_eq!(board.tags().len(), 8);
        for i in 0..8 {
            assert!(board.by_tag(&format!("tag{i}")).iter().any(|t| t.same(&task)));
        }
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_racing_renames_keep_one_entry(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();
        let task = board.get_or_create("Start").unwrap();

        thread::scope(|scope| {
            for i in 0..4 {
                let board = &board;
                let task = &task;
                scope.spawn(move || {
                    for step in 0..20 {
                        board.rename(task, &format!("Name {i} {step}")).unwrap();
                    }
                });
            }
        });

        assert_eq!(board.len(), 1);
        let title = task.read().title.clone();
        assert!(board.find(&title).unwrap().unwrap().same(&task));
    }

    #[test_context(ConcurrencyTestContext)]
    #[test]
    fn test_flush_racing_mutations(ctx: &mut ConcurrencyTestContext) {
        let board = ctx.board();

        thread::scope(|scope| {
            let writer = &board;
            scope.spawn(move || {
                for step in 0..30 {
                    let patch = TaskPatch {
                        description: Some(format!("step {step}")),
                        urgent: Some(step % 2 == 0),
                        tags: Some(vec![format!("round{}", step % 3)]),
                        ..TaskPatch::default()
                    };
                    writer.update(&format!("Task {}", step % 5), &patch).unwrap();
                }
            });
            for _ in 0..10 {
                board.flush();
            }
        });
        board.flush();

        // Disk now mirrors memory exactly
        let reloaded = ctx.board();
        assert_eq!(reloaded.snapshot(), board.snapshot());
        assert!(reloaded.pending().is_empty());
    }
}
