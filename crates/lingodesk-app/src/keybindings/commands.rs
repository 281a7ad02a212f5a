use crate::command::Command;

pub(super) fn global_command_from_name(name: &str) -> Option<Command> {
    match name {
        "quit" => Some(Command::Quit),
        "app_logs" => Some(Command::ToggleAppLogs),
        "next_tab" => Some(Command::NextTab),
        "prev_tab" => Some(Command::PrevTab),
        _ => None,
    }
}

pub(super) fn global_command_description(name: &str) -> String {
    match name {
        "quit" => "Quit",
        "app_logs" => "Logs",
        "next_tab" => "Next tab",
        "prev_tab" => "Prev tab",
        _ => "Unknown",
    }
    .into()
}

pub(super) fn navigation_command_from_name(name: &str) -> Option<Command> {
    match name {
        "select_next" | "select_next_arrow" => Some(Command::SelectNext),
        "select_prev" | "select_prev_arrow" => Some(Command::SelectPrev),
        _ => None,
    }
}

pub(super) fn navigation_command_description(name: &str) -> String {
    match name {
        "select_next" | "select_next_arrow" => "Down",
        "select_prev" | "select_prev_arrow" => "Up",
        _ => "Unknown",
    }
    .into()
}

pub(super) fn browse_command_from_name(name: &str) -> Option<Command> {
    match name {
        "next_page" => Some(Command::NextPage),
        "prev_page" => Some(Command::PrevPage),
        "first_page" => Some(Command::FirstPage),
        "filter" => Some(Command::EnterMode(super::InputMode::FilterInput)),
        "refresh" => Some(Command::Refresh),
        "open" => Some(Command::Open),
        "clear_category" => Some(Command::ClearCategory),
        _ => None,
    }
}

pub(super) fn browse_command_description(name: &str) -> String {
    match name {
        "next_page" => "Next page",
        "prev_page" => "Prev page",
        "first_page" => "First page",
        "filter" => "Filter",
        "refresh" => "Refresh",
        "open" => "Open",
        "clear_category" => "All categories",
        _ => "Unknown",
    }
    .into()
}

pub(super) fn mutate_command_from_name(name: &str) -> Option<Command> {
    match name {
        "edit" => Some(Command::Edit),
        "create" => Some(Command::Create),
        "delete" => Some(Command::Delete),
        _ => None,
    }
}

pub(super) fn mutate_command_description(name: &str) -> String {
    match name {
        "edit" => "Edit",
        "create" => "New",
        "delete" => "Delete",
        _ => "Unknown",
    }
    .into()
}
