pub use crate::keybindings::InputMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    ToggleAppLogs,
    ToggleFollow,
    NextTab,
    PrevTab,
    /// 1-based, as shown in the tab bar.
    GoToTab(usize),
    EnterMode(InputMode),
    ExitMode,

    // Navigation
    SelectNext,
    SelectPrev,

    // Browse
    NextPage,
    PrevPage,
    FirstPage,
    Refresh,
    Open,
    ClearCategory,

    // Mutate
    Edit,
    Create,
    Delete,
    ConfirmAction,
    DenyAction,

    // Filter input
    FilterInput(char),
    FilterBackspace,
    FilterCancel,

    // Edit form
    FormNextField,
    FormPrevField,
    FormInput(char),
    FormBackspace,
    FormSave,
    FormCancel,
}
