//! Application state and screen transitions.
//!
//! Everything that can change without touching the network lives here as a
//! plain method, so the transitions are testable without a terminal or a
//! backend. The event loop in `main` only wires key events and request
//! results to these methods.

use tareini_api::types::Task;
use tareini_api::validate::{
    CredentialErrors, TaskDraft, TaskDraftErrors, date_input_to_iso, iso_to_date_input,
};

use crate::session::Session;

/// Title and body of the forced-relogin acknowledgment prompt.
pub const RELOGIN_TITLE: &str = "Debes iniciar sesión";
pub const RELOGIN_TEXT: &str = "Por favor, inicia sesión para acceder a tus tareas.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Tasks,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

/// Fields of the create-draft popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    LimitDate,
}

/// Fields of the edit popup. Unlike the draft, the status is editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    LimitDate,
    Status,
}

/// What the task screen is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TasksMode {
    List,
    Create,
    Edit,
}

/// Login / registration form: two fields, per-field errors, a general
/// error line. Only login uses the in-flight flag.
#[derive(Debug, Default)]
pub struct CredentialForm {
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub errors: CredentialErrors,
    pub general_error: Option<String>,
    pub in_flight: bool,
}

impl CredentialForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    /// Editing a field clears its error message.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            AuthField::Email => {
                self.email.push(c);
                self.errors.email = None;
            }
            AuthField::Password => {
                self.password.push(c);
                self.errors.password = None;
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            AuthField::Email => {
                self.email.pop();
                self.errors.email = None;
            }
            AuthField::Password => {
                self.password.pop();
                self.errors.password = None;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = CredentialForm::default();
    }
}

/// Edit-in-progress slot: a snapshot of one task, with the limit date
/// unpacked into the `YYYY-MM-DD` form the input uses.
#[derive(Debug, Clone)]
pub struct EditState {
    pub task: Task,
    pub limit_date_input: String,
    pub focus: EditField,
}

impl EditState {
    fn snapshot(task: &Task) -> Self {
        Self {
            task: task.clone(),
            limit_date_input: iso_to_date_input(&task.limit_date),
            focus: EditField::Title,
        }
    }

    /// The full record to send. The edited date is converted back to the
    /// wire format when it parses; otherwise it is sent as typed (the edit
    /// path performs no validation).
    pub fn record(&self) -> Task {
        let mut task = self.task.clone();
        task.limit_date = date_input_to_iso(&self.limit_date_input)
            .unwrap_or_else(|| self.limit_date_input.clone());
        task
    }
}

pub struct AppState {
    pub screen: Screen,
    pub form: CredentialForm,
    pub tasks: Vec<Task>,
    pub selected: usize,
    pub mode: TasksMode,
    pub draft: TaskDraft,
    pub draft_errors: TaskDraftErrors,
    pub draft_focus: DraftField,
    pub editing: Option<EditState>,
    pub loading: bool,
    pub error_message: Option<String>,
    /// When set, the task screen shows the acknowledgment prompt; any key
    /// clears the session and lands on login.
    pub relogin_prompt: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            form: CredentialForm::default(),
            tasks: Vec::new(),
            selected: 0,
            mode: TasksMode::List,
            draft: TaskDraft::default(),
            draft_errors: TaskDraftErrors::default(),
            draft_focus: DraftField::Title,
            editing: None,
            loading: false,
            error_message: None,
            relogin_prompt: None,
        }
    }
}

impl AppState {
    /// Enters the task screen after a successful login or registration.
    pub fn enter_tasks(&mut self) {
        self.screen = Screen::Tasks;
        self.mode = TasksMode::List;
        self.form.reset();
        self.error_message = None;
    }

    /// Full replace of the visible collection, never a merge.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.tasks.is_empty() {
            self.selected = (self.selected + 1).min(self.tasks.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_create(&mut self) {
        self.mode = TasksMode::Create;
        self.draft_focus = DraftField::Title;
        self.draft_errors = TaskDraftErrors::default();
    }

    pub fn close_create(&mut self) {
        self.mode = TasksMode::List;
        self.draft_errors = TaskDraftErrors::default();
    }

    /// Snapshots the selected task into the edit slot.
    pub fn start_editing(&mut self) {
        if let Some(task) = self.selected_task() {
            self.editing = Some(EditState::snapshot(task));
            self.mode = TasksMode::Edit;
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
        self.mode = TasksMode::List;
    }

    /// Sign-out: clears the stored token and lands on the login screen,
    /// regardless of prior state.
    pub fn sign_out(&mut self, session: &Session) {
        session.clear();
        *self = AppState::default();
    }

    /// The backend stopped recognizing the session; ask for an
    /// acknowledgment before redirecting.
    pub fn force_relogin(&mut self) {
        self.relogin_prompt = Some(format!("{RELOGIN_TITLE}. {RELOGIN_TEXT}"));
    }

    /// Acknowledge the prompt: clear the token, back to login.
    pub fn acknowledge_relogin(&mut self, session: &Session) {
        session.clear();
        *self = AppState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tareini_api::types::TaskStatus;
    use tempfile::TempDir;

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: "Get milk and eggs".to_string(),
            status: TaskStatus::Pending,
            limit_date: "2026-08-26T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn sign_out_clears_the_token_and_lands_on_login() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(dir.path().join("token"));
        session.store("abc").unwrap();

        let mut app = AppState::default();
        app.screen = Screen::Tasks;
        app.tasks = vec![task("t1", "Buy groceries")];

        app.sign_out(&session);

        assert_eq!(app.screen, Screen::Login);
        assert!(app.tasks.is_empty());
        assert!(session.load().is_none());
    }

    #[test]
    fn acknowledging_the_relogin_prompt_clears_the_session() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(dir.path().join("token"));
        session.store("stale").unwrap();

        let mut app = AppState::default();
        app.screen = Screen::Tasks;
        app.force_relogin();
        assert!(app.relogin_prompt.as_deref().unwrap().contains(RELOGIN_TITLE));

        app.acknowledge_relogin(&session);
        assert_eq!(app.screen, Screen::Login);
        assert!(session.load().is_none());
    }

    #[test]
    fn start_editing_snapshots_the_selected_task() {
        let mut app = AppState::default();
        app.replace_tasks(vec![task("t1", "Buy groceries"), task("t2", "Walk the dog")]);
        app.selected = 1;

        app.start_editing();

        let edit = app.editing.as_ref().unwrap();
        assert_eq!(edit.task.id, "t2");
        assert_eq!(edit.limit_date_input, "2026-08-26");
        assert_eq!(app.mode, TasksMode::Edit);

        // Mutating the snapshot leaves the list untouched until refetch.
        app.editing.as_mut().unwrap().task.title = "Changed".to_string();
        assert_eq!(app.tasks[1].title, "Walk the dog");
    }

    #[test]
    fn edit_record_converts_a_parseable_date_back_to_the_wire_format() {
        let mut app = AppState::default();
        app.replace_tasks(vec![task("t1", "Buy groceries")]);
        app.start_editing();

        let edit = app.editing.as_mut().unwrap();
        edit.limit_date_input = "2027-01-15".to_string();
        assert_eq!(edit.record().limit_date, "2027-01-15T00:00:00.000Z");

        edit.limit_date_input = "whenever".to_string();
        assert_eq!(edit.record().limit_date, "whenever");
    }

    #[test]
    fn replace_tasks_clamps_the_selection() {
        let mut app = AppState::default();
        app.replace_tasks(vec![
            task("t1", "One"),
            task("t2", "Two"),
            task("t3", "Three"),
        ]);
        app.selected = 2;

        app.replace_tasks(vec![task("t1", "One")]);
        assert_eq!(app.selected, 0);

        app.replace_tasks(Vec::new());
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn editing_a_credential_field_clears_its_error() {
        let mut form = CredentialForm::default();
        form.errors.email = Some("Por favor, ingresa un correo electrónico válido.".to_string());
        form.push_char('a');
        assert!(form.errors.email.is_none());
        assert_eq!(form.email, "a");

        form.toggle_focus();
        form.errors.password = Some("La contraseña es requerida.".to_string());
        form.backspace();
        assert!(form.errors.password.is_none());
    }
}
