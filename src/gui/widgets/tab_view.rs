use eframe::egui::{
    Id,
    Ui,
};

/// Tab strip with a single visible body. Selection lives in egui memory and
/// defaults to the first tab.
pub struct TabView<'a, T> {
    id: Id,
    tabs: &'a [(T, &'a str)],
}

impl<'a, T> TabView<'a, T>
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    pub fn new(id: Id, tabs: &'a [(T, &'a str)]) -> Self {
        Self { id, tabs }
    }

    pub fn selected(&self, ui: &Ui) -> Option<T> {
        let first = self.tabs.first().map(|(tab, _)| *tab)?;
        Some(ui.data(|d| d.get_temp::<T>(self.id)).unwrap_or(first))
    }

    /// Draws the strip and calls `body` with the selected tab.
    pub fn show<R>(self, ui: &mut Ui, body: impl FnOnce(&mut Ui, T) -> R) -> Option<R> {
        let mut selected = self.selected(ui)?;

        ui.horizontal(|ui| {
            for (tab, label) in self.tabs {
                if ui.selectable_label(selected == *tab, *label).clicked() {
                    selected = *tab;
                }
            }
        });
        ui.data_mut(|d| d.insert_temp(self.id, selected));
        ui.separator();

        Some(body(ui, selected))
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{
        CentralPanel,
        Context,
        RawInput,
    };

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Tab {
        Editor,
        Import,
    }

    #[test]
    fn first_tab_is_selected_by_default() {
        let ctx = Context::default();
        let mut shown = None;

        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let tabs = [(Tab::Editor, "Card editor"), (Tab::Import, "Import")];
                shown = TabView::new(Id::new("tabs"), &tabs).show(ui, |_, tab| tab);
            });
        });

        assert_eq!(shown, Some(Tab::Editor));
    }

    #[test]
    fn stored_selection_is_kept() {
        let ctx = Context::default();
        ctx.data_mut(|d| d.insert_temp(Id::new("tabs"), Tab::Import));
        let mut shown = None;

        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let tabs = [(Tab::Editor, "Card editor"), (Tab::Import, "Import")];
                shown = TabView::new(Id::new("tabs"), &tabs).show(ui, |_, tab| tab);
            });
        });

        assert_eq!(shown, Some(Tab::Import));
    }

    #[test]
    fn empty_tab_list_shows_nothing() {
        let ctx = Context::default();
        let mut shown = Some(());

        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let tabs: [(Tab, &str); 0] = [];
                shown = TabView::new(Id::new("tabs"), &tabs).show(ui, |_, _| ());
            });
        });

        assert_eq!(shown, None);
    }
}
