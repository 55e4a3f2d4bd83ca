//! Styles for the loader's status lines

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    /// The "Loading ..." banner
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    /// Icon and label of a `label: value` line
    pub label: Style,
}

impl Theme {
    pub fn new(colored: bool) -> Self {
        let pick = |style: Style| if colored { style } else { Style::new() };
        Self {
            header: pick(Style::new().cyan().bold()),
            success: pick(Style::new().green().bold()),
            error: pick(Style::new().red().bold()),
            warn: pick(Style::new().yellow()),
            label: pick(Style::new().bright_black()),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(|| {
        Theme::new(console::Term::stdout().is_term() && console::colors_enabled())
    })
}
