use cosmic::app::{Core, Task as CosmicTask};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, nav_bar, row, text};
use cosmic::{Application, Element, executor, theme};
use cosmic_config::CosmicConfigEntry;

use crate::config::DocketConfig;
use crate::fl;
use crate::message::{EntityKind, Message};
use crate::pages;
use crate::state::{Change, Intent, Tracker};
use crate::store::{self, Gateway};
use crate::view::{
    CalendarState, ClientForm, EditClientDialog, EditProjectDialog, EditTaskDialog, OpenDialogs, ProjectForm, Tab,
    TaskForm,
};

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct Docket {
    core: Core,
    nav_model: nav_bar::Model,
    cosmic_config: cosmic_config::Config,
    /// As stored; environment overrides are applied only when opening the backend.
    config: DocketConfig,
    active_tab: Tab,

    // Data; None until the backend is connected
    tracker: Option<Tracker>,
    loading: bool,
    /// Last backend failure, shown until dismissed or the next success.
    error: Option<String>,

    // Forms
    client_form: ClientForm,
    project_form: ProjectForm,
    task_form: TaskForm,

    // Edit dialogs
    client_dialogs: OpenDialogs<EditClientDialog>,
    project_dialogs: OpenDialogs<EditProjectDialog>,
    task_dialogs: OpenDialogs<EditTaskDialog>,

    calendar: CalendarState,
}

pub struct Flags {
    pub cosmic_config: cosmic_config::Config,
    pub config: DocketConfig,
}

impl Application for Docket {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = crate::config::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let Flags { cosmic_config, config } = flags;
        let effective = config.effective();

        let mut nav_model = nav_bar::Model::default();
        for tab in Tab::ALL {
            nav_model
                .insert()
                .text(pages::tab_title(*tab))
                .icon(icon::from_name(tab.icon_name()).icon())
                .data(*tab);
        }
        nav_model.activate_position(0);

        let today = today();
        let app = Self {
            core,
            nav_model,
            active_tab: Tab::default(),
            tracker: None,
            loading: true,
            error: None,
            client_form: ClientForm::default(),
            project_form: ProjectForm::default(),
            task_form: TaskForm::new(today),
            client_dialogs: OpenDialogs::default(),
            project_dialogs: OpenDialogs::default(),
            task_dialogs: OpenDialogs::default(),
            calendar: CalendarState::new(today),
            cosmic_config,
            config,
        };

        let connect = CosmicTask::perform(
            async move { store::open(&effective).await.map(Gateway::new) },
            |result| cosmic::Action::App(Message::Connected(result)),
        );
        (app, connect)
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav_model)
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        if let Some(tab) = self.nav_model.data::<Tab>(id).copied() {
            self.active_tab = tab;
            self.nav_model.activate(id);
        }
        CosmicTask::none()
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        vec![text::title4(pages::tab_title(self.active_tab)).into()]
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let debug_label = if self.config.debug_logging {
            fl!("debug-logging-on")
        } else {
            fl!("debug-logging-off")
        };

        let mut reload = button::icon(icon::from_name("view-refresh-symbolic")).tooltip(fl!("reload"));
        if self.tracker.is_some() && !self.loading {
            reload = reload.on_press(Message::Reload);
        }

        vec![
            row()
                .spacing(4)
                .push(reload)
                .push(
                    button::icon(icon::from_name("utilities-terminal-symbolic"))
                        .tooltip(debug_label)
                        .on_press(Message::ToggleDebugLogging),
                )
                .into(),
        ]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            // --- Backend ---
            Message::Connected(Ok(gateway)) => {
                let tracker = Tracker::new(gateway);
                let load = tracker.request_load();
                self.tracker = Some(tracker);
                return CosmicTask::perform(load, |result| cosmic::Action::App(Message::Loaded(result)));
            }
            Message::Connected(Err(e)) => {
                log::error!("Could not open backend: {}", e);
                self.loading = false;
                self.error = Some(e.to_string());
            }
            Message::Reload => {
                if self.loading {
                    log::debug!("Reload ignored, a load is still running");
                } else if let Some(ref tracker) = self.tracker {
                    self.loading = true;
                    let load = tracker.request_load();
                    return CosmicTask::perform(load, |result| cosmic::Action::App(Message::Loaded(result)));
                }
            }
            Message::Loaded(result) => {
                self.loading = false;
                self.finish(result);
            }
            Message::Applied(result) => self.finish(result),
            Message::DismissError => {
                self.error = None;
            }
            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                docket::set_debug_logging(self.config.debug_logging);
                log::info!("Debug logging {}", if self.config.debug_logging { "on" } else { "off" });
                if let Err(e) = self.config.write_entry(&self.cosmic_config) {
                    log::error!("Failed to save config: {}", e);
                }
            }

            // --- Forms ---
            Message::ClientNameChanged(name) => self.client_form.name = name,
            Message::ClientSubmit => {
                if let Some(intent) = self.client_form.submit() {
                    return self.dispatch(intent);
                }
            }
            Message::ProjectClientSelected(id) => self.project_form.client_id = Some(id),
            Message::ProjectNameChanged(name) => self.project_form.name = name,
            Message::ProjectSubmit => {
                if let Some(intent) = self.project_form.submit() {
                    return self.dispatch(intent);
                }
            }
            Message::TaskProjectSelected(id) => self.task_form.project_id = Some(id),
            Message::TaskNameChanged(name) => self.task_form.name = name,
            Message::TaskDateChanged(date) => self.task_form.completion_date = Some(date),
            Message::TaskSubmit => {
                if let Some(intent) = self.task_form.submit(today()) {
                    return self.dispatch(intent);
                }
            }

            // --- Edit dialogs ---
            Message::OpenEdit(kind, id) => self.open_dialog(kind, &id),
            Message::CloseEdit(kind, id) => match kind {
                EntityKind::Client => self.client_dialogs.close(&id),
                EntityKind::Project => self.project_dialogs.close(&id),
                EntityKind::Task => self.task_dialogs.close(&id),
            },
            Message::EditNameChanged(kind, id, name) => {
                let target = match kind {
                    EntityKind::Client => self.client_dialogs.get_mut(&id).map(|d| &mut d.name),
                    EntityKind::Project => self.project_dialogs.get_mut(&id).map(|d| &mut d.name),
                    EntityKind::Task => self.task_dialogs.get_mut(&id).map(|d| &mut d.name),
                };
                if let Some(field) = target {
                    *field = name;
                }
            }
            Message::EditDateChanged(id, date) => {
                if let Some(dialog) = self.task_dialogs.get_mut(&id) {
                    dialog.completion_date = Some(date);
                }
            }
            Message::SubmitEdit(kind, id) => {
                let intent = match kind {
                    EntityKind::Client => self.client_dialogs.get(&id).and_then(EditClientDialog::submit),
                    EntityKind::Project => self.project_dialogs.get(&id).and_then(EditProjectDialog::submit),
                    EntityKind::Task => self.task_dialogs.get(&id).and_then(EditTaskDialog::submit),
                };
                if let Some(intent) = intent {
                    return self.dispatch(intent);
                }
            }

            // --- Calendar ---
            Message::CalendarPrevMonth => self.calendar.prev_month(),
            Message::CalendarNextMonth => self.calendar.next_month(),
            Message::CalendarSelectDay(date) => self.calendar.select_day(date),
        }

        CosmicTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let mut content = column().spacing(8).width(Length::Fill).height(Length::Fill);

        if let Some(ref error) = self.error {
            content = content.push(self.error_banner(error));
        }

        let Some(ref tracker) = self.tracker else {
            let status = if self.loading { fl!("loading") } else { String::new() };
            return content
                .push(
                    container(text::body(status))
                        .center_x(Length::Fill)
                        .center_y(Length::Fill),
                )
                .into();
        };

        let today = today();
        let page = match self.active_tab {
            Tab::Clients => pages::clients::clients_view(&self.client_form, tracker.clients(), &self.client_dialogs),
            Tab::Projects => pages::projects::projects_view(
                &self.project_form,
                tracker.clients(),
                tracker.projects(),
                &self.project_dialogs,
            ),
            Tab::Tasks => pages::tasks::tasks_view(
                &self.task_form,
                tracker.projects(),
                tracker.tasks(),
                &self.task_dialogs,
                today,
            ),
            Tab::Calendar => pages::calendar::calendar_view(
                &self.calendar,
                &tracker.busy_days(self.calendar.displayed_month),
                tracker.tasks_for_date(self.calendar.selected),
                tracker.projects(),
                &self.task_dialogs,
                today,
            ),
        };

        content.push(page).into()
    }
}

impl Docket {
    /// Send `intent` to the backend; the outcome comes back as `Message::Applied`.
    fn dispatch(&self, intent: Intent) -> CosmicTask<Message> {
        let Some(ref tracker) = self.tracker else {
            log::warn!("Dropping {} before the backend is ready", intent.describe());
            return CosmicTask::none();
        };
        log::debug!("Dispatching {}", intent.describe());
        let request = tracker.request(intent);
        CosmicTask::perform(request, |result| cosmic::Action::App(Message::Applied(result)))
    }

    /// Commit a backend result; failures were already logged by the tracker.
    fn finish(&mut self, result: Result<Change, store::BackendError>) {
        match result {
            Ok(change) => {
                self.error = None;
                if let Some(ref mut tracker) = self.tracker {
                    tracker.apply(change);
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn open_dialog(&mut self, kind: EntityKind, id: &str) {
        let Some(ref tracker) = self.tracker else {
            return;
        };
        match kind {
            EntityKind::Client => {
                if let Some(client) = tracker.client(id) {
                    self.client_dialogs.open(id, || EditClientDialog::open(client));
                }
            }
            EntityKind::Project => {
                if let Some(project) = tracker.project(id) {
                    self.project_dialogs.open(id, || EditProjectDialog::open(project));
                }
            }
            EntityKind::Task => {
                if let Some(task) = tracker.tasks().iter().find(|t| t.id == id) {
                    self.task_dialogs.open(id, || EditTaskDialog::open(task));
                }
            }
        }
    }

    fn error_banner<'a>(&self, error: &str) -> Element<'a, Message> {
        container(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(icon::from_name("dialog-warning-symbolic").icon())
                .push(text::body(error.to_string()).width(Length::Fill))
                .push(button::standard(fl!("error-dismiss")).on_press(Message::DismissError)),
        )
        .padding(8)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
    }
}
