mod fonts;
mod nav;

use std::path::PathBuf;

use eframe::egui::{
    self,
    Id,
};
use nav::{
    NavAction,
    NavBar,
};

use super::{
    pages::{
        CardEditorPage,
        ImportToolPage,
        Page,
        PageCommand,
        ResultsPage,
        Route,
        SelectTestPage,
        SourcesPage,
        TestRunnerPage,
    },
    session::SessionState,
    theme::{
        EguiStyle,
        ThemeProvider,
    },
    widgets::TabView,
};
use crate::{
    api::GakuClient,
    core::{
        tasks::{
            ApiReply,
            TaskManager,
            TaskResult,
        },
        GakuError,
    },
    persistence::{
        get_app_data_dir,
        load_json_or_default_in,
        save_json_in,
        FileStorage,
        SettingsData,
        SETTINGS_FILE,
    },
};

const MANAGER_TABS: [(Route, &str); 3] =
    [(Route::Cards, "Card editor"), (Route::Import, "Import"), (Route::Sources, "Sources")];

/// One instance of every page. The card manager tabs reuse the editor, import
/// and sources instances, so their state is shared with the standalone routes.
#[derive(Default)]
pub struct Pages {
    card_editor: CardEditorPage,
    import_tool: ImportToolPage,
    sources: SourcesPage,
    select_test: SelectTestPage,
    test_runner: TestRunnerPage,
    results: ResultsPage,
}

impl Pages {
    pub fn new() -> Self {
        Self {
            card_editor: CardEditorPage::new(),
            import_tool: ImportToolPage::new(),
            sources: SourcesPage::new(),
            select_test: SelectTestPage::new(),
            test_runner: TestRunnerPage::new(),
            results: ResultsPage::new(),
        }
    }

    pub fn get_mut(&mut self, route: Route) -> &mut dyn Page {
        match route {
            Route::Cards | Route::CardManager => &mut self.card_editor,
            Route::Import => &mut self.import_tool,
            Route::Sources => &mut self.sources,
            Route::SelectTest => &mut self.select_test,
            Route::Test => &mut self.test_runner,
            Route::Results => &mut self.results,
        }
    }
}

pub struct GakuApp {
    ctx: egui::Context,
    data_dir: PathBuf,
    settings: SettingsData,
    storage: FileStorage,
    theme: ThemeProvider,
    style: EguiStyle,
    session: SessionState,
    task_manager: TaskManager,
    route: Route,
    manager_tab: Option<Route>,
    pages: Pages,
}

impl GakuApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: SettingsData,
        client: GakuClient,
    ) -> Result<Self, GakuError> {
        let ctx = cc.egui_ctx.clone();
        let data_dir = get_app_data_dir();
        let task_manager = TaskManager::new(client)?.with_repaint(ctx.clone());

        let mut session = SessionState::new();
        session.mount(task_manager.spawn_session_poll(settings.session_poll_interval()));

        let storage = FileStorage::open(&data_dir);
        let theme = ThemeProvider::load(&storage);

        let mut app = Self {
            ctx,
            data_dir,
            settings,
            storage,
            theme,
            style: EguiStyle::default(),
            session,
            task_manager,
            route: Route::default(),
            manager_tab: None,
            pages: Pages::new(),
        };

        fonts::setup_fonts(&cc.egui_ctx);
        app.apply_theme();
        cc.egui_ctx.set_zoom_factor(app.settings.zoom);
        tracing::info!(api_url = %app.task_manager.client().base_url(), "gaku started");

        app.navigate(Route::default());
        Ok(app)
    }

    fn apply_theme(&mut self) {
        self.theme.apply(&mut self.style, &mut self.storage);
        self.style.install(&self.ctx, self.theme.current());
    }

    fn navigate(&mut self, route: Route) {
        tracing::debug!(from = ?self.route, to = ?route, "navigate");
        self.route = route;
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Title(route.window_title().into()));

        if route == Route::CardManager {
            // The selected tab is mounted on the next frame.
            self.manager_tab = None;
            return;
        }
        self.mount(route);
    }

    fn mount(&mut self, route: Route) {
        let commands = self.pages.get_mut(route).mount();
        self.run_commands(route, commands);
    }

    fn run_commands(&mut self, owner: Route, commands: Vec<PageCommand>) {
        for command in commands {
            match command {
                PageCommand::Call(call) => self.task_manager.dispatch(owner, call),
                PageCommand::Navigate(route) => self.navigate(route),
            }
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        tracing::trace!(task = result.task_type(), "task finished");
        match result {
            TaskResult::SessionPoll(active) => self.session.update(&active),
            TaskResult::Api { route, reply } => {
                if let ApiReply::SessionActive(active) = &reply {
                    self.session.update(active);
                }
                let commands = self.pages.get_mut(route).on_reply(reply);
                self.run_commands(route, commands);
            }
        }
    }

    fn show_route(&mut self, ui: &mut egui::Ui) -> Vec<(Route, Vec<PageCommand>)> {
        let Self { pages, session, route, manager_tab, .. } = self;

        if *route != Route::CardManager {
            return vec![(*route, pages.get_mut(*route).show(ui, session))];
        }

        let mut batches = Vec::new();
        let shown = TabView::new(Id::new("card_manager_tabs"), &MANAGER_TABS).show(ui, |ui, tab| {
            if *manager_tab != Some(tab) {
                *manager_tab = Some(tab);
                batches.push((tab, pages.get_mut(tab).mount()));
            }
            batches.push((tab, pages.get_mut(tab).show(ui, session)));
        });
        if shown.is_none() {
            tracing::warn!("card manager has no tabs");
        }
        batches
    }

    /// Keeps the stored zoom in step with ctrl +/- changes.
    fn persist_zoom(&mut self, ctx: &egui::Context) {
        let zoom = ctx.zoom_factor();
        if (zoom - self.settings.zoom).abs() < f32::EPSILON {
            return;
        }
        self.settings.zoom = zoom;

        // Reload so environment overrides applied at startup are not written back.
        let mut stored: SettingsData = load_json_or_default_in(&self.data_dir, SETTINGS_FILE);
        stored.zoom = zoom;
        if let Err(e) = save_json_in(&self.data_dir, &stored, SETTINGS_FILE) {
            tracing::warn!("Failed to save settings: {e}");
        }
    }
}

impl eframe::App for GakuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        match NavBar::show(ctx, self.route, self.theme.current(), self.session.is_active()) {
            Some(NavAction::ToggleTheme) => {
                self.theme.toggle();
                self.apply_theme();
            }
            Some(NavAction::Navigate(route)) => self.navigate(route),
            None => {}
        }

        let mut batches = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                batches = self.show_route(ui);
            });
        });
        for (owner, commands) in batches {
            self.run_commands(owner, commands);
        }

        self.persist_zoom(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tasks::ApiCall;

    #[test]
    fn manager_routes_share_the_editor_instance() {
        let mut pages = Pages::new();
        let via_cards = pages.get_mut(Route::Cards).mount();
        let via_manager = pages.get_mut(Route::CardManager).mount();
        assert_eq!(via_cards, via_manager);
        assert!(via_cards.contains(&PageCommand::Call(ApiCall::GetCards)));
    }

    #[test]
    fn each_route_mounts_its_own_page() {
        let mut pages = Pages::new();
        assert_eq!(
            pages.get_mut(Route::Results).mount(),
            vec![PageCommand::Call(ApiCall::TestResults)]
        );
        assert_eq!(pages.get_mut(Route::Sources).mount(), vec![PageCommand::Call(ApiCall::GetSources)]);
        assert!(pages.get_mut(Route::Import).mount().contains(&PageCommand::Call(ApiCall::GetSources)));
    }

    #[test]
    fn manager_tabs_cover_editor_import_and_sources() {
        let routes: Vec<Route> = MANAGER_TABS.iter().map(|(route, _)| *route).collect();
        assert_eq!(routes, vec![Route::Cards, Route::Import, Route::Sources]);
    }
}
