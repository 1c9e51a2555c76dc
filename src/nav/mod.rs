//! Mobile navigation menu model.
//!
//! The menu is either open or closed; the toggle button and every link flip
//! it. The trailing account link depends on the session status reported by
//! the authentication provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Session status as reported by the authentication provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl FromStr for AuthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loading" => Ok(AuthStatus::Loading),
            "authenticated" => Ok(AuthStatus::Authenticated),
            "unauthenticated" => Ok(AuthStatus::Unauthenticated),
            other => Err(format!("unknown auth status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: &'static str,
    pub path: &'static str,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.path)
    }
}

pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem { title: "Home", path: "/" },
    MenuItem { title: "Timeline", path: "/timeline" },
    MenuItem { title: "Sponsors", path: "/sponsors" },
    MenuItem { title: "Team", path: "/team" },
];

pub const LOGIN_LINK: MenuItem = MenuItem { title: "Login", path: "/api/auth/signin" };
pub const PROFILE_LINK: MenuItem = MenuItem { title: "Profile", path: "/profile" };

/// Only an explicit `unauthenticated` gets the login link; a session that is
/// still loading is treated as signed in.
pub fn account_link(status: AuthStatus) -> MenuItem {
    match status {
        AuthStatus::Unauthenticated => LOGIN_LINK,
        AuthStatus::Authenticated | AuthStatus::Loading => PROFILE_LINK,
    }
}

/// Snapshot of what the menu shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub state: MenuState,
    pub items: Vec<MenuItem>,
    pub account: MenuItem,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileNav {
    state: MenuState,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// The menu button
    pub fn toggle(&mut self) -> MenuState {
        self.state = self.state.toggled();
        self.state
    }

    /// Following a link toggles the menu, like the button does. Returns the
    /// path to navigate to.
    pub fn follow(&mut self, item: MenuItem) -> &'static str {
        self.toggle();
        item.path
    }

    pub fn view(&self, status: AuthStatus) -> NavView {
        NavView {
            state: self.state,
            items: MENU_ITEMS.to_vec(),
            account: account_link(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_toggles() {
        let mut nav = MobileNav::new();
        assert_eq!(nav.state(), MenuState::Closed);
        assert_eq!(nav.toggle(), MenuState::Open);
        assert_eq!(nav.toggle(), MenuState::Closed);
    }

    #[test]
    fn following_a_link_flips_state() {
        let mut nav = MobileNav::new();
        nav.toggle();
        assert_eq!(nav.follow(MENU_ITEMS[1]), "/timeline");
        assert!(!nav.state().is_open());
    }

    #[test]
    fn account_link_depends_on_status() {
        assert_eq!(account_link(AuthStatus::Unauthenticated), LOGIN_LINK);
        assert_eq!(account_link(AuthStatus::Authenticated), PROFILE_LINK);
        assert_eq!(account_link(AuthStatus::Loading), PROFILE_LINK);
    }

    #[test]
    fn view_lists_static_menu() {
        let view = MobileNav::new().view(AuthStatus::Unauthenticated);
        let titles: Vec<_> = view.items.iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["Home", "Timeline", "Sponsors", "Team"]);
        assert_eq!(view.account.path, "/api/auth/signin");
    }

    #[test]
    fn parses_status_strings() {
        assert_eq!("unauthenticated".parse::<AuthStatus>(), Ok(AuthStatus::Unauthenticated));
        assert_eq!("Authenticated".parse::<AuthStatus>(), Ok(AuthStatus::Authenticated));
        assert!("guest".parse::<AuthStatus>().is_err());
    }
}
