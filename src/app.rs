//! Top-level application state: the current page and navigation between
//! pages. Navigating replaces the page controller wholesale and reloads its
//! data from the server, the terminal equivalent of a full page load.

use anyhow::Result;
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::api::{CheckApi, HttpApi};
use crate::form::FormPage;
use crate::list::ListPage;
use crate::settings::Settings;
use crate::types::CheckId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Where a page handler wants to go next.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Nav {
    None,
    ToList,
    ToAdd,
    ToEdit(CheckId),
    Quit,
}

pub enum Page {
    List(ListPage),
    Form(FormPage),
}

/// Which page the client opens on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StartPage {
    List,
    Add,
    Edit(CheckId),
}

pub struct App {
    pub settings: Settings,
    page: Page,
    api: Box<dyn CheckApi>,
    should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, start: StartPage) -> Result<Self> {
        let api = HttpApi::new(&settings.server_url, settings.request_timeout())?;
        Ok(Self::with_api(Box::new(api), settings, start))
    }

    pub fn with_api(api: Box<dyn CheckApi>, settings: Settings, start: StartPage) -> Self {
        let mut app = Self {
            settings,
            page: Page::List(ListPage {
                rows: Vec::new(),
                cursor: 0,
                active_row: None,
                status: None,
            }),
            api,
            should_quit: false,
        };
        let nav = match start {
            StartPage::List => Nav::ToList,
            StartPage::Add => Nav::ToAdd,
            StartPage::Edit(id) => Nav::ToEdit(id),
        };
        app.navigate(nav);
        app
    }

    pub fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Key(key) => {
                let nav = match &mut self.page {
                    Page::List(page) => page.handle_key(key, self.api.as_ref()),
                    Page::Form(page) => page.handle_key(key, self.api.as_ref()),
                };
                self.navigate(nav);
            }
            Message::Resize(..) | Message::Tick => {}
        }
        Ok(())
    }

    fn navigate(&mut self, nav: Nav) {
        match nav {
            Nav::None => {}
            Nav::Quit => self.should_quit = true,
            Nav::ToList => {
                debug!("navigating to check list");
                self.page = Page::List(ListPage::load(self.api.as_ref()));
            }
            Nav::ToAdd => {
                debug!("navigating to add page");
                self.page = Page::Form(FormPage::add());
            }
            Nav::ToEdit(id) => {
                debug!(%id, "navigating to edit page");
                self.page = Page::Form(FormPage::edit(self.api.as_ref(), id));
            }
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::form::FormMode;
    use crate::types::{CheckDraft, CheckSummary};

    struct StubApi;

    impl CheckApi for StubApi {
        fn list_checks(&self) -> Result<Vec<CheckSummary>> {
            Ok(vec![CheckSummary {
                id: 12,
                name: "web portal".to_string(),
                server: "NKP02".to_string(),
                check_type: "URL".to_string(),
                check_category: "external".to_string(),
            }])
        }

        fn fetch_check(&self, id: CheckId) -> Result<CheckDraft> {
            let mut draft = CheckDraft::blank();
            draft.id = id.to_string();
            Ok(draft)
        }

        fn create_check(&self, _draft: &CheckDraft) -> Result<CheckId> {
            bail!("not used");
        }

        fn update_check(&self, _draft: &CheckDraft) -> Result<()> {
            Ok(())
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Message::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .expect("update should succeed");
    }

    #[test]
    fn starts_on_the_requested_page() {
        let app = App::with_api(Box::new(StubApi), Settings::default(), StartPage::Add);
        match app.page() {
            Page::Form(page) => assert_eq!(page.mode(), FormMode::Add),
            Page::List(_) => panic!("expected the add form"),
        }
    }

    #[test]
    fn add_navigation_from_list() {
        let mut app = App::with_api(Box::new(StubApi), Settings::default(), StartPage::List);
        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(app.page(), Page::Form(page) if page.mode() == FormMode::Add));
    }

    #[test]
    fn edit_navigation_loads_selected_check() {
        let mut app = App::with_api(Box::new(StubApi), Settings::default(), StartPage::List);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));

        match app.page() {
            Page::Form(page) => {
                assert_eq!(page.mode(), FormMode::Edit);
                assert_eq!(page.draft.id, "12");
            }
            Page::List(_) => panic!("expected the edit form"),
        }
    }

    #[test]
    fn escape_returns_to_a_fresh_list() {
        let mut app = App::with_api(Box::new(StubApi), Settings::default(), StartPage::Add);
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.page(), Page::List(page) if page.rows.len() == 1));
    }

    #[test]
    fn quit_sets_the_flag() {
        let mut app = App::with_api(Box::new(StubApi), Settings::default(), StartPage::List);
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn ticks_are_inert() {
        let mut app = App::with_api(Box::new(StubApi), Settings::default(), StartPage::List);
        app.update(Message::Tick).expect("tick should succeed");
        app.update(Message::Resize(80, 24))
            .expect("resize should succeed");
        assert!(matches!(app.page(), Page::List(_)));
    }
}
