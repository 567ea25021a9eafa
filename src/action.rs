#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ToggleSort,
    Refresh,
    EnterKillPrompt,
    PromptInput(char),
    PromptBackspace,
    SubmitPrompt,
    Dismiss,
    None,
}
