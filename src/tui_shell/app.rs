use anyhow::Result;

use crate::form::{ConsoleView, SubDocKind};
use crate::model::ConsoleConfig;
use crate::notify::NoticeLog;
use crate::remote::RemoteClient;
use crate::shell::{ConsoleShell, MenuKind, Screen};

use super::form_rows::{self, FormRow};
use super::input::Input;

#[derive(Clone, Copy, Debug)]
pub(super) enum InputTarget {
    Search,
    NewClientDescription,
    EditClientDescription { index: usize },
    FormField(FormRow),
}

#[derive(Clone, Debug)]
pub(super) enum PendingAction {
    DeleteRoute { id: String },
    DeleteClient { id: i64, app_key: String },
}

impl PendingAction {
    pub(super) fn prompt(&self) -> String {
        match self {
            PendingAction::DeleteRoute { id } => format!("Delete route {}? [y/n]", id),
            PendingAction::DeleteClient { app_key, .. } => {
                format!("Delete API client {}? [y/n]", app_key)
            }
        }
    }
}

pub(super) struct App {
    pub(super) shell: ConsoleShell<RemoteClient>,
    pub(super) notices: NoticeLog,

    pub(super) routes_selected: usize,
    pub(super) clients_selected: usize,
    pub(super) factories_selected: usize,
    pub(super) form_selected: usize,

    pub(super) input: Input,
    pub(super) input_target: Option<InputTarget>,
    pub(super) pending: Option<PendingAction>,

    pub(super) quit: bool,
}

impl App {
    pub(super) fn load(config: ConsoleConfig) -> Result<Self> {
        let toggle_mode = config.toggle_mode;
        let backend = RemoteClient::new(config)?;
        let mut app = Self {
            shell: ConsoleShell::new(backend, toggle_mode),
            notices: NoticeLog::default(),
            routes_selected: 0,
            clients_selected: 0,
            factories_selected: 0,
            form_selected: 0,
            input: Input::default(),
            input_target: None,
            pending: None,
            quit: false,
        };
        app.shell.select_menu(MenuKind::Routes, &app.notices);
        Ok(app)
    }

    pub(super) fn screen(&self) -> Screen {
        self.shell.screen()
    }

    pub(super) fn select_menu(&mut self, kind: MenuKind) {
        self.shell.select_menu(kind, &self.notices);
        self.clamp_selections();
    }

    fn clamp_selections(&mut self) {
        self.routes_selected = self
            .routes_selected
            .min(self.shell.routes.items().len().saturating_sub(1));
        self.clients_selected = self
            .clients_selected
            .min(self.shell.clients.items().len().saturating_sub(1));
        self.factories_selected = self
            .factories_selected
            .min(self.shell.factories.items().len().saturating_sub(1));
    }

    pub(super) fn move_selection(&mut self, delta: i64) {
        let (selected, len) = match self.screen() {
            Screen::RouteList => (&mut self.routes_selected, self.shell.routes.items().len()),
            Screen::ClientList => (&mut self.clients_selected, self.shell.clients.items().len()),
            Screen::FactoryList => (
                &mut self.factories_selected,
                self.shell.factories.items().len(),
            ),
            Screen::RouteForm => {
                let len = self
                    .shell
                    .controller
                    .form()
                    .map(|f| form_rows::form_rows(f).len())
                    .unwrap_or(0);
                (&mut self.form_selected, len)
            }
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        let next = (*selected as i64 + delta).clamp(0, len as i64 - 1);
        *selected = next as usize;
    }

    pub(super) fn begin_search(&mut self) {
        let current = match self.shell.active() {
            MenuKind::Routes => self.shell.routes.query(),
            MenuKind::ApiClients => self.shell.clients.query(),
            MenuKind::Factories => "",
        };
        self.input.set(current.to_string());
        self.input_target = Some(InputTarget::Search);
    }

    pub(super) fn begin_new_client(&mut self) {
        self.input.clear();
        self.input_target = Some(InputTarget::NewClientDescription);
    }

    pub(super) fn begin_edit_client(&mut self) {
        let Some(client) = self.shell.clients.items().get(self.clients_selected) else {
            return;
        };
        self.input.set(client.description.clone());
        self.input_target = Some(InputTarget::EditClientDescription {
            index: self.clients_selected,
        });
    }

    /// Enter on a form row: toggles flip in place, text rows open the
    /// input line seeded with the current value.
    pub(super) fn begin_edit_form_row(&mut self) {
        let Some(form) = self.shell.controller.form() else {
            return;
        };
        let rows = form_rows::form_rows(form);
        let Some(&row) = rows.get(self.form_selected) else {
            return;
        };
        let is_edit = form.is_edit();

        if !form_rows::row_is_text(row, is_edit) {
            if let Some(form) = self.shell.controller.form_mut() {
                form_rows::toggle_row(form, row);
            }
            return;
        }
        let value = form_rows::row_value(form, row);
        self.input.set(value);
        self.input_target = Some(InputTarget::FormField(row));
    }

    pub(super) fn cancel_input(&mut self) {
        self.input.clear();
        self.input_target = None;
    }

    pub(super) fn commit_input(&mut self) {
        let Some(target) = self.input_target.take() else {
            return;
        };
        let text = std::mem::take(&mut self.input.buf);
        self.input.clear();

        match target {
            InputTarget::Search => {
                self.shell.search_active(text.trim(), &self.notices);
                self.clamp_selections();
            }
            InputTarget::NewClientDescription => {
                self.shell.create_client(&text, &self.notices);
                self.clamp_selections();
            }
            InputTarget::EditClientDescription { index } => {
                let Some(client) = self.shell.clients.items().get(index) else {
                    return;
                };
                let mut updated = client.clone();
                updated.description = text.trim().to_string();
                self.shell.update_client(&updated, &self.notices);
            }
            InputTarget::FormField(row) => {
                if let Some(form) = self.shell.controller.form_mut() {
                    form_rows::apply_text(form, row, text);
                }
            }
        }
    }

    pub(super) fn open_create_form(&mut self) {
        self.shell.controller.show_create_form();
        self.form_selected = 0;
    }

    pub(super) fn open_edit_form(&mut self) {
        let Some(route) = self.shell.routes.items().get(self.routes_selected).cloned() else {
            return;
        };
        self.shell.controller.show_edit_form(&route);
        self.form_selected = 0;
    }

    pub(super) fn close_form(&mut self) {
        self.shell.controller.show_list_view();
        self.form_selected = 0;
    }

    pub(super) fn submit_form(&mut self) {
        self.shell.submit_route(&self.notices);
        if self.shell.controller.view() == ConsoleView::ListView {
            self.form_selected = 0;
            self.clamp_selections();
        }
    }

    pub(super) fn add_sub_document(&mut self, kind: SubDocKind) {
        self.shell.controller.add_sub_document(kind);
        // Land on the new row's name field.
        if let Some(form) = self.shell.controller.form() {
            let rows = form_rows::form_rows(form);
            let target = match kind {
                SubDocKind::Predicate => {
                    FormRow::PredicateName(form.predicates.len().saturating_sub(1))
                }
                SubDocKind::Filter => FormRow::FilterName(form.filters.len().saturating_sub(1)),
            };
            if let Some(pos) = rows.iter().position(|r| *r == target) {
                self.form_selected = pos;
            }
        }
    }

    pub(super) fn remove_selected_sub_document(&mut self) {
        let Some(form) = self.shell.controller.form() else {
            return;
        };
        let rows = form_rows::form_rows(form);
        let Some(&row) = rows.get(self.form_selected) else {
            return;
        };
        if let Some((kind, index)) = form_rows::row_subdoc(row) {
            self.shell.controller.remove_sub_document(kind, index);
            let remaining = self
                .shell
                .controller
                .form()
                .map(|f| form_rows::form_rows(f).len())
                .unwrap_or(0);
            self.form_selected = self.form_selected.min(remaining.saturating_sub(1));
        }
    }

    pub(super) fn toggle_selected(&mut self) {
        match self.screen() {
            Screen::RouteList => {
                let Some(route) = self.shell.routes.items().get(self.routes_selected).cloned()
                else {
                    return;
                };
                self.shell.toggle_route(&route, &self.notices);
            }
            Screen::ClientList => {
                let Some(client) = self
                    .shell
                    .clients
                    .items()
                    .get(self.clients_selected)
                    .cloned()
                else {
                    return;
                };
                self.shell.toggle_client(&client, &self.notices);
            }
            _ => {}
        }
        self.clamp_selections();
    }

    pub(super) fn request_delete(&mut self) {
        match self.screen() {
            Screen::RouteList => {
                if let Some(route) = self.shell.routes.items().get(self.routes_selected) {
                    self.pending = Some(PendingAction::DeleteRoute {
                        id: route.id.clone(),
                    });
                }
            }
            Screen::ClientList => {
                if let Some(client) = self.shell.clients.items().get(self.clients_selected) {
                    self.pending = Some(PendingAction::DeleteClient {
                        id: client.id,
                        app_key: client.app_key.clone(),
                    });
                }
            }
            _ => {}
        }
    }

    pub(super) fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };
        match action {
            PendingAction::DeleteRoute { id } => {
                self.shell.delete_route(&id, &self.notices);
            }
            PendingAction::DeleteClient { id, .. } => {
                self.shell.delete_client(id, &self.notices);
            }
        }
        self.clamp_selections();
    }

    pub(super) fn refresh_active(&mut self) {
        self.shell.reset_active(&self.notices);
        self.clamp_selections();
    }
}
