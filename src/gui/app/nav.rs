use eframe::egui::{
    self,
    containers,
};

use crate::gui::{
    pages::Route,
    theme::ThemeType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    ToggleTheme,
    Navigate(Route),
}

pub struct NavBar;

impl NavBar {
    pub fn show(
        ctx: &egui::Context,
        current: Route,
        theme: ThemeType,
        session_active: bool,
    ) -> Option<NavAction> {
        let mut action = None;

        egui::TopBottomPanel::top("nav_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                action = Self::links(ui, current, theme, session_active);
            });
        });

        action
    }

    /// Draws the theme toggle and route links. Split out so it can be drawn into any `Ui`.
    pub fn links(
        ui: &mut egui::Ui,
        current: Route,
        theme: ThemeType,
        session_active: bool,
    ) -> Option<NavAction> {
        let mut action = None;

        if ui.button(theme.icon()).on_hover_text("Toggle theme").clicked() {
            action = Some(NavAction::ToggleTheme);
        }
        ui.separator();

        for route in Self::visible_routes(session_active) {
            if ui.selectable_label(current == route, route.label()).clicked() {
                action = Some(NavAction::Navigate(route));
            }
        }

        action
    }

    pub fn visible_routes(session_active: bool) -> Vec<Route> {
        let mut routes = Route::NAV.to_vec();
        if session_active {
            routes.push(Route::Test);
        }
        routes
    }
}
