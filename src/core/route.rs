/// Screens reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    Cards,
    CardManager,
    Sources,
    Import,
    #[default]
    SelectTest,
    Test,
    Results,
}

impl Route {
    /// Routes linked from the navigation bar, in display order.
    pub const NAV: [Route; 5] =
        [Route::Cards, Route::CardManager, Route::Sources, Route::Import, Route::SelectTest];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Cards => "Cards",
            Route::CardManager => "Card Manager",
            Route::Sources => "Sources",
            Route::Import => "Import",
            Route::SelectTest => "Select Test",
            Route::Test => "Continue Test",
            Route::Results => "Results",
        }
    }

    pub fn window_title(&self) -> &'static str {
        match self {
            Route::Cards | Route::CardManager => "Gaku - Card Editor",
            Route::Sources => "Gaku - Card Sources",
            Route::Import => "Gaku - Import Tool",
            Route::SelectTest => "Gaku - Select Test",
            Route::Test => "Gaku - Test Flashcards",
            Route::Results => "Gaku - Test Results",
        }
    }
}
