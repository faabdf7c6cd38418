//! Application state for the TUI.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::widgets::{
    confirm_dialog::{self, Answer, ConfirmDialog},
    editor::{Editor, EditorMode, EditorWidget},
    help_menu::{HelpMenu, HelpMenuWidget},
    passphrase_modal::{GatedAction, PassphraseModal, PassphraseModalWidget, Verdict},
    proof_list::ProofList,
    proof_view::{ProofView, ProofViewWidget},
    render_helpers::render_error,
    search_bar::{SearchBar, SearchBarWidget},
    selection::SelectionState,
    status_bar::StatusBar,
    tag_filter::{TagFilter, TagFilterWidget},
    theme::{Theme, ThemeMode},
    welcome::{Footer, Masthead},
    InteractiveStatefulWidget,
};
use crate::{
    error::{Error, Result},
    library::{catalog, KeyValueStorage, Proof, ProofStore},
    markup::UnicodeTypesetter,
};

const LIBRARY_KEYBINDINGS: &[(&str, &str)] = &[
    ("j/k", "nav"),
    ("Enter", "open"),
    ("/", "search"),
    ("f", "tags"),
    ("c", "clear"),
    ("a", "add"),
];
const PROOF_KEYBINDINGS: &[(&str, &str)] = &[
    ("j/k", "scroll"),
    ("e", "edit"),
    ("d", "delete"),
    ("Esc", "back"),
];
const EDITOR_KEYBINDINGS: &[(&str, &str)] = &[("Tab", "next field"), ("C-s", "save"), ("Esc", "cancel")];

/// The screen filling the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Library,
    Proof(String),
    Editor,
}

/// Modal drawn over the current screen; it takes every key while open.
#[derive(Debug)]
enum Overlay {
    Passphrase(PassphraseModal),
    ConfirmDelete(String),
}

pub struct App<S> {
    store: ProofStore<S>,
    /// Last loaded snapshot of the library.
    proofs: Vec<Proof>,
    screen: Screen,
    overlay: Option<Overlay>,
    search: SearchBar,
    tag_filter: TagFilter,
    selection: SelectionState,
    proof_view: ProofView,
    editor: Editor,
    help: HelpMenu,
    theme_mode: ThemeMode,
    typesetter: UnicodeTypesetter,
    error: Option<String>,
    notice: Option<String>,
    /// Whether app should exit.
    pub should_exit: bool,
}

impl<S: KeyValueStorage> App<S> {
    pub fn new(store: ProofStore<S>) -> Result<Self> {
        let mut app = Self {
            store,
            proofs: Vec::new(),
            screen: Screen::Library,
            overlay: None,
            search: SearchBar::default(),
            tag_filter: TagFilter::default(),
            selection: SelectionState::default(),
            proof_view: ProofView::default(),
            editor: Editor::new(),
            help: HelpMenu::default(),
            theme_mode: ThemeMode::default(),
            typesetter: UnicodeTypesetter,
            error: None,
            notice: None,
            should_exit: false,
        };
        app.reload()?;
        app.selection.reset(app.proofs.len());
        Ok(app)
    }

    /// Re-read the library and refresh everything derived from it.
    fn reload(&mut self) -> Result<()> {
        self.proofs = self.store.list()?;
        self.tag_filter.set_tags(catalog::all_tags(&self.proofs));
        self.selection.clamp(self.visible().len());
        Ok(())
    }

    fn visible(&self) -> Vec<&Proof> {
        catalog::filter(&self.proofs, self.search.query(), self.tag_filter.selected())
    }

    fn report(&mut self, error: &Error) {
        tracing::error!("{error}");
        self.error = Some(error.to_string());
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if self.overlay.is_none() && self.screen == Screen::Library {
                    let before = self.selection.selected();
                    if self.selection.handle_click(mouse.column, mouse.row)
                        && before == self.selection.selected()
                    {
                        self.open_selected();
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }
        self.error = None;
        self.notice = None;

        if let Some(Overlay::Passphrase(modal)) = &mut self.overlay {
            match modal.handle_key(key) {
                Verdict::Pending => {}
                Verdict::Cancelled => self.overlay = None,
                Verdict::Granted(action) => {
                    self.overlay = None;
                    self.grant(action);
                }
            }
            return;
        }
        if let Some(Overlay::ConfirmDelete(id)) = &self.overlay {
            match confirm_dialog::answer(&key) {
                Some(Answer::Yes) => {
                    let id = id.clone();
                    self.overlay = None;
                    self.delete(&id);
                }
                Some(Answer::No) => self.overlay = None,
                None => {}
            }
            return;
        }
        if HelpMenuWidget::handle_key(&mut self.help, key) {
            return;
        }

        match self.screen.clone() {
            Screen::Library => self.handle_library_key(key),
            Screen::Proof(id) => self.handle_proof_key(key, id),
            Screen::Editor => self.handle_editor_key(key),
        }
    }

    fn handle_library_key(&mut self, key: KeyEvent) {
        if self.search.is_editing() {
            SearchBarWidget::handle_key(&mut self.search, key);
            self.selection.reset(self.visible().len());
            return;
        }
        if TagFilterWidget::handle_key(&mut self.tag_filter, key) {
            self.selection.reset(self.visible().len());
            return;
        }

        let count = self.visible().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.selection.select_next(count),
            KeyCode::Char('k') | KeyCode::Up => self.selection.select_previous(count),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('/') => self.search.start_editing(),
            KeyCode::Char('f') => self.tag_filter.toggle_visible(),
            KeyCode::Char('c') => {
                self.search.clear();
                self.tag_filter.clear();
                self.selection.reset(self.proofs.len());
            }
            KeyCode::Char('a') => self.ask_passphrase(GatedAction::Add),
            _ => self.handle_global_key(key),
        }
    }

    fn handle_proof_key(&mut self, key: KeyEvent, id: String) {
        if ProofViewWidget::<UnicodeTypesetter>::handle_key(&mut self.proof_view, key) {
            return;
        }
        match key.code {
            KeyCode::Char('e') => self.ask_passphrase(GatedAction::Edit(id)),
            KeyCode::Char('d') => self.ask_passphrase(GatedAction::Delete(id)),
            KeyCode::Esc | KeyCode::Backspace => self.screen = Screen::Library,
            _ => self.handle_global_key(key),
        }
    }

    /// The editor owns every key, so global shortcuts do not apply here.
    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.leave_editor(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.save(),
            _ => {
                EditorWidget::handle_key(&mut self.editor, key);
            }
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') => self.help.toggle(),
            KeyCode::Char('t') => self.theme_mode = self.theme_mode.toggle(),
            KeyCode::Char('q') => self.should_exit = true,
            _ => {}
        }
    }

    fn ask_passphrase(&mut self, action: GatedAction) {
        self.overlay = Some(Overlay::Passphrase(PassphraseModal::new(action)));
    }

    fn grant(&mut self, action: GatedAction) {
        match action {
            GatedAction::Add => {
                self.editor = Editor::new();
                self.screen = Screen::Editor;
            }
            GatedAction::Edit(id) => match self.proofs.iter().find(|p| p.id == id) {
                Some(proof) => {
                    self.editor = Editor::for_proof(proof);
                    self.screen = Screen::Editor;
                }
                None => self.missing(&id),
            },
            GatedAction::Delete(id) => self.overlay = Some(Overlay::ConfirmDelete(id)),
        }
    }

    fn open_selected(&mut self) {
        let id = self
            .selection
            .selected()
            .and_then(|i| self.visible().get(i).map(|p| p.id.clone()));
        if let Some(id) = id {
            self.open(id);
        }
    }

    /// Show a proof, or fall back to the library if it no longer exists.
    pub fn open(&mut self, id: String) {
        if self.proofs.iter().any(|p| p.id == id) {
            tracing::debug!("Opening proof {id}");
            self.proof_view.reset();
            self.screen = Screen::Proof(id);
        } else {
            self.missing(&id);
        }
    }

    fn missing(&mut self, id: &str) {
        self.report(&Error::NotFound(id.to_string()));
        self.screen = Screen::Library;
    }

    fn leave_editor(&mut self) {
        self.screen = match self.editor.mode() {
            EditorMode::Add => Screen::Library,
            EditorMode::Edit(id) => Screen::Proof(id.clone()),
        };
    }

    fn save(&mut self) {
        let result = match self.editor.mode().clone() {
            EditorMode::Add => self.store.add(self.editor.to_draft()).map(|proof| {
                self.search.clear();
                self.tag_filter.clear();
                self.notice = Some(format!("Added \"{}\"", proof.title));
                Screen::Library
            }),
            EditorMode::Edit(id) => self
                .store
                .update(&id, self.editor.to_patch())
                .and_then(|updated| updated.ok_or(Error::NotFound(id.clone())))
                .map(|proof| {
                    self.notice = Some("Saved".to_string());
                    self.proof_view.reset();
                    Screen::Proof(proof.id)
                }),
        };

        match result {
            Ok(screen) => {
                self.screen = screen;
                if let Err(e) = self.reload() {
                    self.report(&e);
                }
                if self.screen == Screen::Library {
                    self.selection.reset(self.visible().len());
                }
            }
            Err(e @ Error::Invalid(_)) => self.editor.set_error(e.to_string()),
            Err(e @ Error::NotFound(_)) => {
                self.report(&e);
                self.screen = Screen::Library;
            }
            Err(e) => self.editor.set_error(e.to_string()),
        }
    }

    fn delete(&mut self, id: &str) {
        match self.store.delete(id) {
            Ok(removed) => {
                if !removed {
                    self.report(&Error::NotFound(id.to_string()));
                }
                self.screen = Screen::Library;
                if let Err(e) = self.reload() {
                    self.report(&e);
                }
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let theme = self.theme_mode.theme();
        let [masthead_area, body_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(Masthead { theme }, masthead_area);
        let body_area = render_error(frame.buffer_mut(), body_area, self.error.as_deref(), &theme);

        let keybindings = match self.screen.clone() {
            Screen::Library => {
                self.render_library(frame, body_area, theme);
                LIBRARY_KEYBINDINGS
            }
            Screen::Proof(id) => {
                self.render_proof(frame, body_area, theme, &id);
                PROOF_KEYBINDINGS
            }
            Screen::Editor => {
                frame.render_stateful_widget(EditorWidget { theme }, body_area, &mut self.editor);
                EDITOR_KEYBINDINGS
            }
        };

        let in_library = self.screen == Screen::Library;
        frame.render_widget(
            StatusBar {
                keybindings,
                query: if in_library { self.search.query() } else { "" },
                tag: self.tag_filter.selected().filter(|_| in_library),
                notice: self.notice.as_deref(),
                theme_mode: self.theme_mode,
            },
            status_area,
        );
        frame.render_widget(Footer { theme }, footer_area);

        match &mut self.overlay {
            Some(Overlay::Passphrase(modal)) => {
                frame.render_stateful_widget(PassphraseModalWidget { theme }, frame.area(), modal);
            }
            Some(Overlay::ConfirmDelete(id)) => {
                let title = self
                    .proofs
                    .iter()
                    .find(|p| p.id == *id)
                    .map_or("", |p| p.title.as_str());
                frame.render_widget(ConfirmDialog { title, theme }, frame.area());
            }
            None => {}
        }
        if self.help.is_visible() {
            frame.render_stateful_widget(HelpMenuWidget { theme }, frame.area(), &mut self.help);
        }
    }

    fn render_library(&mut self, frame: &mut Frame, area: Rect, theme: Theme) {
        let tags_height = if self.tag_filter.is_visible() { 3 } else { 0 };
        let [search_area, tags_area, summary_area, list_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(tags_height),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_stateful_widget(SearchBarWidget { theme }, search_area, &mut self.search);
        if self.tag_filter.is_visible() {
            frame.render_stateful_widget(TagFilterWidget { theme }, tags_area, &mut self.tag_filter);
        }

        let tag = self.tag_filter.selected();
        let visible = catalog::filter(&self.proofs, self.search.query(), tag);
        frame.render_widget(
            Paragraph::new(catalog::summary(visible.len(), self.proofs.len(), tag))
                .style(theme.dim_style()),
            summary_area,
        );
        frame.render_stateful_widget(
            ProofList::new(&visible, self.proofs.len(), tag, theme),
            list_area,
            &mut self.selection,
        );
    }

    fn render_proof(&mut self, frame: &mut Frame, area: Rect, theme: Theme, id: &str) {
        let Some(proof) = self.proofs.iter().find(|p| p.id == id) else {
            frame.render_widget(
                Paragraph::new(Error::NotFound(id.to_string()).to_string()).style(theme.dim_style()),
                area,
            );
            return;
        };
        frame.render_stateful_widget(
            ProofViewWidget {
                proof,
                typesetter: &self.typesetter,
                theme,
            },
            area,
            &mut self.proof_view,
        );
    }
}
