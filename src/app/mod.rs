//! Application state types and entry glue.
//!
//! Defines the routes, the request/response envelopes exchanged with the
//! network tasks, the theme, and the top-level `AppState`. The event loop is
//! re-exported as `run`.
//!
pub mod effects;
pub mod fields;
pub mod form;
pub mod keymap;
pub mod list;
pub mod page;
pub mod update;

use ratatui::style::Color;
use std::path::{Path, PathBuf};

use crate::api::{Entity, EntityId, Product, User};
use crate::error::ApiError;
use keymap::Keymap;
use page::{Page, PaneFocus};

/// Top-level route of the navigation shell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Products,
    Users,
}

impl Route {
    pub fn title(self) -> &'static str {
        match self {
            Route::Products => "Products",
            Route::Users => "Users",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Route::Products => Route::Users,
            Route::Users => Route::Products,
        }
    }
}

/// Current input mode for key handling, derived from the active page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// List pane focused; keys go through the keymap.
    Normal,
    /// Form pane focused; keys edit the draft.
    Form,
    /// Delete confirmation open.
    Confirm,
}

/// Operation a view wants performed against the backend.
#[derive(Clone, Debug)]
pub enum Command<E: Entity> {
    Fetch,
    Create(E::Draft),
    Update(EntityId, E::Draft),
    Delete(EntityId),
}

/// Completed [`Command`].
#[derive(Debug)]
pub enum Outcome<E: Entity> {
    Fetched(Result<Vec<E>, ApiError>),
    Created(Result<E, ApiError>),
    Updated(Result<E, ApiError>),
    Deleted(Result<(), ApiError>),
}

/// Identifies the page mount and list mount a request was issued from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub page: u64,
    pub refresh: u64,
}

#[derive(Clone, Debug)]
pub struct Request<E: Entity> {
    pub ticket: Ticket,
    pub command: Command<E>,
}

#[derive(Debug)]
pub struct Response<E: Entity> {
    pub ticket: Ticket,
    pub outcome: Outcome<E>,
}

#[derive(Clone, Debug)]
pub enum AppRequest {
    Products(Request<Product>),
    Users(Request<User>),
}

#[derive(Debug)]
pub enum AppResponse {
    Products(Response<Product>),
    Users(Response<User>),
}

/// The mounted page. Only one exists at a time; switching routes drops it.
#[derive(Clone, Debug)]
pub enum ActivePage {
    Products(Page<Product>),
    Users(Page<User>),
}

impl ActivePage {
    pub fn route(&self) -> Route {
        match self {
            ActivePage::Products(_) => Route::Products,
            ActivePage::Users(_) => Route::Users,
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error_fg: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
        }
    }

    /// Load theme from a key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let Some(color) = Self::parse_color(val) else {
                continue;
            };
            match key.trim() {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "error_fg" => theme.error_fg = color,
                _ => {}
            }
        }
        theme
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Persist the theme in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# crud-console theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::White => "#FFFFFF".to_string(),
                // anything else has no stable hex form
                _ => "reset".to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };
        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error_fg", self.error_fg);

        std::fs::write(path, buf)
    }

    /// Load `path`; if missing, write the default theme there and return it.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(err) = t.write_file(path) {
            tracing::warn!(error = %err, path = %path.display(), "could not write default theme");
        }
        t
    }
}

pub struct AppState {
    pub page: ActivePage,
    pub theme: Theme,
    pub keymap: Keymap,
    pub api_url: String,
    pub should_quit: bool,
    mounts: u64,
}

impl AppState {
    /// Mount the default route. The returned request is its first fetch.
    pub fn new(api_url: impl Into<String>, theme: Theme, keymap: Keymap) -> (Self, AppRequest) {
        let (page, fetch) = Page::mount(1);
        let app = Self {
            page: ActivePage::Products(page),
            theme,
            keymap,
            api_url: api_url.into(),
            should_quit: false,
            mounts: 1,
        };
        (app, AppRequest::Products(fetch))
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    /// Unmount the current page and mount `route` fresh.
    pub fn navigate(&mut self, route: Route) -> AppRequest {
        self.mounts += 1;
        let mount = self.mounts;
        tracing::info!(route = route.title(), mount, "navigating");
        match route {
            Route::Products => {
                let (page, req) = Page::mount(mount);
                self.page = ActivePage::Products(page);
                AppRequest::Products(req)
            }
            Route::Users => {
                let (page, req) = Page::mount(mount);
                self.page = ActivePage::Users(page);
                AppRequest::Users(req)
            }
        }
    }

    pub fn input_mode(&self) -> InputMode {
        let (pending, focus) = match &self.page {
            ActivePage::Products(p) => (p.list.pending_delete.is_some(), p.focus),
            ActivePage::Users(p) => (p.list.pending_delete.is_some(), p.focus),
        };
        if pending {
            InputMode::Confirm
        } else if focus == PaneFocus::Form {
            InputMode::Form
        } else {
            InputMode::Normal
        }
    }
}

/// Directory holding `theme.conf`, `keybinds.conf` and the log file.
///
/// `$XDG_CONFIG_HOME/crud-console`, else `$HOME/.config/crud-console`, else the working directory.
pub fn default_config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
    match base {
        Some(b) => b.join("crud-console"),
        None => PathBuf::from("."),
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse_overrides_known_keys_only() {
        let t = Theme::parse("# c\ntext = #010203\nerror_fg=reset\nbogus = #FFFFFF\nborder = nothex\n");
        assert_eq!(t.text, Color::Rgb(1, 2, 3));
        assert_eq!(t.error_fg, Color::Reset);
        assert_eq!(t.border, Theme::mocha().border);
    }

    #[test]
    fn navigation_remounts_with_a_new_identity() {
        let (mut app, first) = AppState::new("http://x", Theme::dark(), Keymap::default());
        assert!(matches!(first, AppRequest::Products(_)));
        assert_eq!(app.route(), Route::Products);
        let req = app.navigate(Route::Users);
        match req {
            AppRequest::Users(r) => {
                assert_eq!(r.ticket.page, 2);
                assert!(matches!(r.command, Command::Fetch));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.route(), Route::Users);
        assert_eq!(app.input_mode(), InputMode::Normal);
    }
}
