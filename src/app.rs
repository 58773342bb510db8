//! TUI application state and intent dispatch.
//!
//! Key events become [`Intent`]s; [`App::dispatch`] turns each intent into
//! exactly one Store call or Session change. The next frame re-renders
//! everything from the Store and Query Engine, so no view state is cached.

use crate::config::Config;
use crate::desktop::Desktop;
use crate::error::StoreError;
use crate::models::{Backend, Bookmark, BookmarkFields, FileBackend};
use crate::query::{Session, ViewMode, ranked_tags, tag_frequency, visible_list};
use crate::store::{LoadSource, Store};
use crate::ui;
use ratatui::Frame;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Form,
    Tags,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Url,
    Tags,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Url,
        FormField::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Description => "Description",
            FormField::Url => "URL *",
            FormField::Tags => "Tags (comma separated)",
        }
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw add/edit form input. Kept verbatim until submit so a failed
/// validation leaves the user's text in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkForm {
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: String,
    pub focus: FormField,
}

impl BookmarkForm {
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            url: bookmark.url.clone(),
            tags: bookmark.tags.join(", "),
            focus: FormField::Title,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Url => &self.url,
            FormField::Tags => &self.tags,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Url => &mut self.url,
            FormField::Tags => &mut self.tags,
        }
    }

    pub fn fields(&self) -> BookmarkFields {
        BookmarkFields::from_input(&self.title, &self.description, &self.url, &self.tags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification, cleared after a number of ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub ticks_left: u16,
}

/// A user action from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenAddForm,
    OpenEditForm,
    CloseForm,
    SubmitForm,
    Visit,
    CopyUrl,
    ToggleArchive,
    TogglePin,
    SetQuery(String),
    CycleSort,
    ToggleTag(String),
    ResetFilters,
    ShowView(ViewMode),
    ToggleTheme,
}

pub struct App<B: Backend = FileBackend> {
    pub store: Store<B>,
    pub session: Session,
    pub toast_ticks: u16,
    pub selected: usize,
    pub selected_tag: usize,
    pub input_mode: InputMode,
    pub form: BookmarkForm,
    pub toast: Option<Toast>,
    pub dark_theme: bool,
    desktop: Box<dyn Desktop>,
}

impl<B: Backend> App<B> {
    pub fn new(store: Store<B>, config: &Config, desktop: Box<dyn Desktop>) -> Self {
        let dark_theme = store.dark_theme();
        let mut app = Self {
            store,
            session: Session::default(),
            toast_ticks: config.toast_ticks,
            selected: 0,
            selected_tag: 0,
            input_mode: InputMode::Normal,
            form: BookmarkForm::default(),
            toast: None,
            dark_theme,
            desktop,
        };

        if app.store.load_source() == LoadSource::Recovered {
            app.set_error_message("Saved bookmarks were unreadable; starting fresh".to_string());
        }

        app
    }

    pub fn visible(&self) -> Vec<&Bookmark> {
        visible_list(self.store.bookmarks(), &self.session)
    }

    pub fn tags(&self) -> Vec<(String, usize)> {
        ranked_tags(&tag_frequency(self.store.bookmarks()))
    }

    pub fn selected_bookmark(&self) -> Option<&Bookmark> {
        self.visible().get(self.selected).copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_bookmark().map(|b| b.id.clone())
    }

    pub fn next_item(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn previous_item(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn next_tag(&mut self) {
        let len = self.tags().len();
        if len > 0 {
            self.selected_tag = (self.selected_tag + 1) % len;
        }
    }

    pub fn previous_tag(&mut self) {
        let len = self.tags().len();
        if len > 0 {
            self.selected_tag = (self.selected_tag + len - 1) % len;
        }
    }

    /// Keeps the cursors inside the lists after a filter or mutation moved
    /// items out of view.
    fn clamp_selection(&mut self) {
        let visible = self.visible().len();
        self.selected = self.selected.min(visible.saturating_sub(1));
        let tags = self.tags().len();
        self.selected_tag = self.selected_tag.min(tags.saturating_sub(1));
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatch");

        match intent {
            Intent::OpenAddForm => {
                self.session.editing_id = None;
                self.form = BookmarkForm::default();
                self.input_mode = InputMode::Form;
            }
            Intent::OpenEditForm => {
                let target = self
                    .selected_bookmark()
                    .map(|b| (b.id.clone(), BookmarkForm::from_bookmark(b)));
                if let Some((id, form)) = target {
                    self.session.editing_id = Some(id);
                    self.form = form;
                    self.input_mode = InputMode::Form;
                }
            }
            Intent::CloseForm => self.close_form(),
            Intent::SubmitForm => self.submit_form(),
            Intent::Visit => {
                if let Some(id) = self.selected_id() {
                    match self.store.record_visit(&id).map(|b| b.url.clone()) {
                        Ok(url) => {
                            if let Err(err) = self.desktop.open_url(&url) {
                                warn!(error = %err, url = %url, "failed to open browser");
                                self.set_error_message(format!("Could not open {url}"));
                            }
                        }
                        Err(err) => self.report_error(err),
                    }
                }
            }
            Intent::CopyUrl => {
                if let Some(url) = self.selected_bookmark().map(|b| b.url.clone()) {
                    match self.desktop.copy_text(&url) {
                        Ok(()) => self.set_success_message("URL copied".to_string()),
                        Err(err) => {
                            warn!(error = %err, "clipboard write failed");
                            self.set_error_message("Could not copy URL".to_string());
                        }
                    }
                }
            }
            Intent::ToggleArchive => {
                if let Some(id) = self.selected_id() {
                    match self.store.toggle_archived(&id) {
                        Ok(archived) => self.set_success_message(
                            if archived { "Archived" } else { "Unarchived" }.to_string(),
                        ),
                        Err(err) => self.report_error(err),
                    }
                }
            }
            Intent::TogglePin => {
                if let Some(id) = self.selected_id() {
                    match self.store.toggle_pinned(&id) {
                        Ok(pinned) => self.set_success_message(
                            if pinned { "Pinned" } else { "Unpinned" }.to_string(),
                        ),
                        Err(err) => self.report_error(err),
                    }
                }
            }
            Intent::SetQuery(query) => {
                self.session.query = query;
                self.selected = 0;
            }
            Intent::CycleSort => {
                self.session.sort = self.session.sort.next();
            }
            Intent::ToggleTag(tag) => {
                self.session.toggle_tag(&tag);
                self.selected = 0;
            }
            Intent::ResetFilters => {
                self.session.reset_filters();
            }
            Intent::ShowView(view) => {
                self.session.view = view;
                self.selected = 0;
            }
            Intent::ToggleTheme => {
                let dark = !self.dark_theme;
                match self.store.set_dark_theme(dark) {
                    Ok(()) => self.dark_theme = dark,
                    Err(err) => self.report_error(err),
                }
            }
        }

        self.clamp_selection();
    }

    fn close_form(&mut self) {
        self.input_mode = InputMode::Normal;
        self.session.editing_id = None;
        self.form = BookmarkForm::default();
    }

    fn submit_form(&mut self) {
        let fields = self.form.fields();
        let result = match self.session.editing_id.clone() {
            Some(id) => self.store.update(&id, fields).map(|_| "Bookmark updated"),
            None => self.store.create(fields).map(|_| "Bookmark added"),
        };

        match result {
            Ok(message) => {
                self.close_form();
                self.set_success_message(message.to_string());
            }
            // The form stays open with its input so the user can correct it.
            Err(StoreError::Validation(_)) => {
                self.set_error_message("Title & URL required".to_string());
            }
            Err(err) => {
                self.close_form();
                self.report_error(err);
            }
        }
    }

    /// Missing ids are dropped silently; anything else is shown.
    fn report_error(&mut self, err: StoreError) {
        match err {
            StoreError::NotFound(id) => debug!(id = %id, "bookmark vanished, ignoring"),
            StoreError::Validation(err) => self.set_error_message(err.to_string()),
            StoreError::Storage(err) => {
                error!(error = %err, "failed to persist bookmarks");
                self.set_error_message(format!("Failed to save: {err}"));
            }
        }
    }

    pub fn set_error_message(&mut self, message: String) {
        self.toast = Some(Toast {
            message,
            kind: ToastKind::Error,
            ticks_left: self.toast_ticks,
        });
    }

    pub fn set_success_message(&mut self, message: String) {
        self.toast = Some(Toast {
            message,
            kind: ToastKind::Success,
            ticks_left: self.toast_ticks,
        });
    }

    /// Called every event-loop tick; expires the toast.
    pub fn tick(&mut self) {
        if let Some(toast) = self.toast.as_mut() {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        ui::render(frame, self);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::MemoryBackend;
    use crate::store::BOOKMARKS_KEY;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    pub(crate) struct Recorded {
        pub opened: Vec<String>,
        pub copied: Vec<String>,
    }

    pub(crate) struct FakeDesktop(pub Rc<RefCell<Recorded>>);

    impl Desktop for FakeDesktop {
        fn open_url(&mut self, url: &str) -> anyhow::Result<()> {
            self.0.borrow_mut().opened.push(url.to_string());
            Ok(())
        }

        fn copy_text(&mut self, text: &str) -> anyhow::Result<()> {
            self.0.borrow_mut().copied.push(text.to_string());
            Ok(())
        }
    }

    pub(crate) fn app_with(raw: &str) -> (App<MemoryBackend>, Rc<RefCell<Recorded>>) {
        let store = Store::load(MemoryBackend::new().with_entry(BOOKMARKS_KEY, raw)).unwrap();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let desktop = Box::new(FakeDesktop(recorded.clone()));
        (App::new(store, &Config::default(), desktop), recorded)
    }

    fn fill_form(app: &mut App<MemoryBackend>, title: &str, url: &str, tags: &str) {
        app.form.title = title.to_string();
        app.form.url = url.to_string();
        app.form.tags = tags.to_string();
    }

    #[test]
    fn submit_add_form_creates_and_closes() {
        let (mut app, _) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        fill_form(&mut app, "Alpha", "https://a.com", "x, y");
        app.dispatch(Intent::SubmitForm);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.bookmarks().len(), 1);
        assert_eq!(app.store.bookmarks()[0].tags, vec!["x", "y"]);
        assert_eq!(app.toast.as_ref().unwrap().message, "Bookmark added");
    }

    #[test]
    fn invalid_submit_keeps_form_and_input() {
        let (mut app, _) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        fill_form(&mut app, "", "http://a.com", "");
        app.dispatch(Intent::SubmitForm);

        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(app.form.url, "http://a.com");
        assert!(app.store.bookmarks().is_empty());
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Title & URL required");
    }

    #[test]
    fn edit_form_updates_selected_bookmark() {
        let (mut app, _) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        fill_form(&mut app, "Alpha", "https://a.com", "");
        app.dispatch(Intent::SubmitForm);

        app.dispatch(Intent::OpenEditForm);
        assert_eq!(app.form.title, "Alpha");
        assert!(app.session.editing_id.is_some());
        app.form.title = "Alpha 2".to_string();
        app.dispatch(Intent::SubmitForm);

        assert_eq!(app.store.bookmarks().len(), 1);
        assert_eq!(app.store.bookmarks()[0].title, "Alpha 2");
        assert!(app.session.editing_id.is_none());
    }

    #[test]
    fn visit_records_and_opens_url() {
        let (mut app, recorded) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        fill_form(&mut app, "Alpha", "https://a.com", "");
        app.dispatch(Intent::SubmitForm);

        app.dispatch(Intent::Visit);
        assert_eq!(app.store.bookmarks()[0].views, 1);
        assert_eq!(recorded.borrow().opened, vec!["https://a.com"]);
    }

    #[test]
    fn copy_url_writes_clipboard_without_mutation() {
        let (mut app, recorded) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        fill_form(&mut app, "Alpha", "https://a.com", "");
        app.dispatch(Intent::SubmitForm);

        app.dispatch(Intent::CopyUrl);
        assert_eq!(recorded.borrow().copied, vec!["https://a.com"]);
        assert_eq!(app.store.bookmarks()[0].views, 0);
        assert_eq!(app.toast.as_ref().unwrap().message, "URL copied");
    }

    #[test]
    fn archiving_moves_bookmark_between_views() {
        let (mut app, _) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        fill_form(&mut app, "Alpha", "https://a.com", "x");
        app.dispatch(Intent::SubmitForm);

        app.dispatch(Intent::ToggleArchive);
        assert!(app.visible().is_empty());
        assert!(app.tags().is_empty());
        assert_eq!(app.toast.as_ref().unwrap().message, "Archived");

        app.dispatch(Intent::ShowView(ViewMode::Archived));
        assert_eq!(app.visible().len(), 1);
        app.dispatch(Intent::ToggleArchive);
        assert!(app.visible().is_empty());
        assert_eq!(app.toast.as_ref().unwrap().message, "Unarchived");
    }

    #[test]
    fn actions_with_nothing_selected_are_noops() {
        let (mut app, recorded) = app_with("[]");
        app.dispatch(Intent::Visit);
        app.dispatch(Intent::TogglePin);
        app.dispatch(Intent::CopyUrl);
        app.dispatch(Intent::OpenEditForm);

        assert!(app.toast.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(recorded.borrow().opened.is_empty());
    }

    #[test]
    fn search_and_tag_filters_narrow_the_list() {
        let (mut app, _) = app_with("[]");
        for (title, tags) in [("Rust Book", "rust"), ("Go Tour", "go"), ("Rustlings", "practice")] {
            app.dispatch(Intent::OpenAddForm);
            fill_form(&mut app, title, "https://x.dev", tags);
            app.dispatch(Intent::SubmitForm);
        }

        app.dispatch(Intent::SetQuery("rust".to_string()));
        assert_eq!(app.visible().len(), 2);

        app.dispatch(Intent::ToggleTag("practice".to_string()));
        let visible: Vec<_> = app.visible().iter().map(|b| b.title.clone()).collect();
        assert_eq!(visible, vec!["Rustlings"]);

        app.dispatch(Intent::ResetFilters);
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn theme_toggle_persists() {
        let (mut app, _) = app_with("[]");
        assert!(!app.dark_theme);
        app.dispatch(Intent::ToggleTheme);
        assert!(app.dark_theme);
        assert!(app.store.dark_theme());
    }

    #[test]
    fn toast_expires_after_configured_ticks() {
        let (mut app, _) = app_with("[]");
        app.set_success_message("hi".to_string());
        for _ in 0..app.toast_ticks {
            assert!(app.toast.is_some());
            app.tick();
        }
        assert!(app.toast.is_none());
    }

    #[test]
    fn corrupt_storage_is_announced() {
        let (app, _) = app_with("not json");
        assert!(app.store.bookmarks().is_empty());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
    }
}
