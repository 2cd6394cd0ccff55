use wedding_navigation::NavTab;

use crate::PageSurface;

pub const NAVIGATION_ELEMENT_ID: &str = "navigation";
pub const LOADING_ELEMENT_ID: &str = "loading";
pub const ERROR_ELEMENT_ID: &str = "error";
pub const WELCOME_ELEMENT_ID: &str = "welcome";
pub const USER_NAME_ELEMENT_ID: &str = "userName";

const DEFAULT_PAGE_TITLE: &str = "Notre mariage";
const DEFAULT_LOADING_TEXT: &str = "Chargement de votre invitation...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Elements addressed by the gate, keyed by their DOM identifier.
pub enum PageElementId {
    Navigation,
    Loading,
    Error,
    Welcome,
    UserName,
}

impl PageElementId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Navigation => NAVIGATION_ELEMENT_ID,
            Self::Loading => LOADING_ELEMENT_ID,
            Self::Error => ERROR_ELEMENT_ID,
            Self::Welcome => WELCOME_ELEMENT_ID,
            Self::UserName => USER_NAME_ELEMENT_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementDisplay {
    Hidden,
    Block,
    Inline,
    Grid,
}

impl ElementDisplay {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Hidden => "display: none",
            Self::Block => "display: block",
            Self::Inline => "display: inline",
            Self::Grid => "display: grid",
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    pub display: ElementDisplay,
    pub text: String,
}

impl PageElement {
    pub fn new(display: ElementDisplay, text: impl Into<String>) -> Self {
        Self {
            display,
            text: text.into(),
        }
    }

    pub fn hidden() -> Self {
        Self::new(ElementDisplay::Hidden, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One clickable navigation tile as it appears on the page.
pub struct RenderedTile {
    pub href: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub badge: Option<String>,
}

impl From<&NavTab> for RenderedTile {
    fn from(tab: &NavTab) -> Self {
        Self {
            href: tab.page.clone(),
            icon: tab.icon.clone(),
            title: tab.title.clone(),
            description: tab.description.clone(),
            badge: tab.badge.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationMount {
    pub display: ElementDisplay,
    pub tiles: Vec<RenderedTile>,
}

impl Default for NavigationMount {
    fn default() -> Self {
        Self {
            display: ElementDisplay::Hidden,
            tiles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory page state. Absent elements are `None`.
pub struct PageDocument {
    pub title: String,
    pub loading: Option<PageElement>,
    pub error: Option<PageElement>,
    pub welcome: Option<PageElement>,
    pub user_name: Option<PageElement>,
    pub navigation: Option<NavigationMount>,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self {
            title: DEFAULT_PAGE_TITLE.to_string(),
            loading: Some(PageElement::new(ElementDisplay::Block, DEFAULT_LOADING_TEXT)),
            error: Some(PageElement::hidden()),
            welcome: Some(PageElement::hidden()),
            user_name: Some(PageElement::new(ElementDisplay::Inline, "")),
            navigation: Some(NavigationMount::default()),
        }
    }
}

impl PageDocument {
    pub fn without_element(mut self, element: PageElementId) -> Self {
        match element {
            PageElementId::Navigation => self.navigation = None,
            PageElementId::Loading => self.loading = None,
            PageElementId::Error => self.error = None,
            PageElementId::Welcome => self.welcome = None,
            PageElementId::UserName => self.user_name = None,
        }
        self
    }

    pub fn has_element(&self, element: PageElementId) -> bool {
        match element {
            PageElementId::Navigation => self.navigation.is_some(),
            PageElementId::Loading => self.loading.is_some(),
            PageElementId::Error => self.error.is_some(),
            PageElementId::Welcome => self.welcome.is_some(),
            PageElementId::UserName => self.user_name.is_some(),
        }
    }

    pub fn tiles(&self) -> &[RenderedTile] {
        self.navigation
            .as_ref()
            .map(|mount| mount.tiles.as_slice())
            .unwrap_or_default()
    }

    pub fn is_loading_visible(&self) -> bool {
        is_visible(self.loading.as_ref())
    }

    pub fn is_welcome_visible(&self) -> bool {
        is_visible(self.welcome.as_ref())
    }

    /// Text of the error element while it is shown.
    pub fn visible_error(&self) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|element| element.display.is_visible())
            .map(|element| element.text.as_str())
    }

    pub fn user_name_text(&self) -> Option<&str> {
        self.user_name.as_ref().map(|element| element.text.as_str())
    }
}

fn is_visible(element: Option<&PageElement>) -> bool {
    element.is_some_and(|element| element.display.is_visible())
}

impl PageSurface for PageDocument {
    fn render_tabs(&mut self, tabs: &[NavTab]) {
        let Some(mount) = self.navigation.as_mut() else {
            tracing::error!(
                element_id = NAVIGATION_ELEMENT_ID,
                tab_count = tabs.len(),
                "navigation mount point not found; tiles not rendered"
            );
            return;
        };
        mount.tiles.clear();
        mount.tiles.extend(tabs.iter().map(RenderedTile::from));
        mount.display = ElementDisplay::Grid;
        tracing::debug!(tile_count = mount.tiles.len(), "navigation tiles rendered");
    }

    fn show_error(&mut self, message: &str) {
        tracing::error!(message, "access gate halted");
        if let Some(error) = self.error.as_mut() {
            error.text = message.to_string();
            error.display = ElementDisplay::Block;
        }
        self.hide_loading();
    }

    fn show_welcome(&mut self, display_name: &str) {
        if let Some(user_name) = self.user_name.as_mut() {
            user_name.text = display_name.to_string();
        }
        if let Some(welcome) = self.welcome.as_mut() {
            welcome.display = ElementDisplay::Block;
        }
    }

    fn hide_loading(&mut self) {
        if let Some(loading) = self.loading.as_mut() {
            loading.display = ElementDisplay::Hidden;
        }
    }
}
