use lingodesk_core::{ControllerError, EditTarget, Record, ResourceKind, ResourceListController};

/// Cursor and flags for the edit form overlay. Field values live in the controller's edit buffer.
#[derive(Debug, Default)]
pub struct FormState {
    pub active: usize,
    pub saving: bool,
    pub error: Option<String>,
}

/// One tab: a controller plus the UI state around it.
pub struct ResourceListPane {
    controller: ResourceListController,
    /// Index into `controller.visible()`.
    pub selected: Option<usize>,
    category_label: Option<String>,
    pub form: FormState,
}

impl ResourceListPane {
    pub fn new(controller: ResourceListController) -> Self {
        Self { controller, selected: None, category_label: None, form: FormState::default() }
    }

    pub fn controller(&self) -> &ResourceListController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ResourceListController {
        &mut self.controller
    }

    pub fn kind(&self) -> ResourceKind {
        self.controller.kind()
    }

    pub fn tab_name(&self) -> String {
        self.kind().display_name().to_string()
    }

    pub fn title(&self) -> String {
        let name = self.kind().display_name();
        match (self.controller.category(), &self.category_label) {
            (Some(_), Some(label)) => format!("{name} · {label}"),
            (Some(id), None) => format!("{name} · category #{id}"),
            (None, _) => name.to_string(),
        }
    }

    pub fn set_category_label(&mut self, label: Option<String>) {
        self.category_label = label;
    }

    pub fn headers(&self) -> Vec<String> {
        self.controller.schema().headers()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        let schema = self.controller.schema();
        self.controller.visible().into_iter().map(|r| schema.row(r)).collect()
    }

    pub fn select_next(&mut self) {
        let len = self.controller.visible().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        let len = self.controller.visible().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Keeps the cursor on a row after the list or the filter changed.
    pub fn clamp_selection(&mut self) {
        let len = self.controller.visible().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|i| self.controller.visible().get(i).copied())
    }

    pub fn reset_form(&mut self) {
        self.form = FormState::default();
    }

    pub fn form_title(&self) -> String {
        let what = self.kind().singular();
        match self.controller.edit_target() {
            Some(EditTarget::Existing(id)) => format!("Edit {what} #{id}"),
            Some(EditTarget::New) => match (&self.category_label, self.controller.category()) {
                (Some(label), Some(_)) => format!("New {what} in {label}"),
                _ => format!("New {what}"),
            },
            None => String::new(),
        }
    }

    /// `(title, value)` for each field in the edit buffer, in schema order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let schema = self.controller.schema();
        let Some(buffer) = self.controller.edit_buffer() else { return Vec::new() };
        buffer
            .iter()
            .map(|(key, value)| {
                let title = schema.field(key).map_or(key, |f| f.title);
                (title.to_string(), value.to_string())
            })
            .collect()
    }

    fn active_key(&self) -> Option<String> {
        let buffer = self.controller.edit_buffer()?;
        buffer.iter().nth(self.form.active).map(|(k, _)| k.to_string())
    }

    pub fn form_next_field(&mut self) {
        let len = self.controller.edit_buffer().map_or(0, |b| b.len());
        if len > 0 {
            self.form.active = (self.form.active + 1) % len;
        }
    }

    pub fn form_prev_field(&mut self) {
        let len = self.controller.edit_buffer().map_or(0, |b| b.len());
        if len > 0 {
            self.form.active = (self.form.active + len - 1) % len;
        }
    }

    pub fn form_input(&mut self, c: char) -> Result<(), ControllerError> {
        self.edit_active(|value| value.push(c))
    }

    pub fn form_backspace(&mut self) -> Result<(), ControllerError> {
        self.edit_active(|value| {
            value.pop();
        })
    }

    fn edit_active(&mut self, f: impl FnOnce(&mut String)) -> Result<(), ControllerError> {
        let key = self.active_key().ok_or(ControllerError::NoEditSession)?;
        let mut value = self.controller.edit_buffer().and_then(|b| b.get(&key)).unwrap_or_default().to_string();
        f(&mut value);
        self.form.error = None;
        self.controller.update_edit_buffer(&key, value)
    }
}

#[cfg(test)]
mod tests;
