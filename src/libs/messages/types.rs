#[derive(Debug, Clone)]
pub enum Message {
    // === BOARD MESSAGES ===
    BoardLoaded(String, usize), // name, task count
    TaskStemInvalid(String),    // file stem
    TaskFileUnreadable(String, String), // key, error
    TaskTitleMismatch(String, String),  // stem, title in file
    TaskTagDropped(String, String),     // stem, tag
    TaskSaveFailed(String, String),     // key, error
    TrashRemoveFailed(String),  // error
    FlushCompleted(usize, usize), // saved, removed
    FlushFailures(usize),       // failed count

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskNotFound(String),
    NoTasksOnBoard,
    NoChangesDetected,
    ConfirmDeleteTask(String),
    EditingTask(String),
    TaskEditingCompleted,

    // === ACTIVE TASK MESSAGES ===
    ActiveTask(String),
    ActiveTaskSet(String),
    ActiveTaskCleared,
    NoActiveTask,
    ActiveClearFailed(String),    // error
    ActiveRetargetFailed(String), // error

    // === FLUSHER MESSAGES ===
    FlusherStarted(u64), // interval seconds
    FlusherStopped,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskNewTitle,
    PromptTaskDescription,
    PromptTaskUrgent,
    PromptTaskImportant,
    PromptTaskTags,
    PromptTagName,
    PromptSelectTask,
    PromptTaskAction,
    PromptBoardName,
    PromptBoardDir,
    PromptFlushSecs,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
