use dioxus::prelude::*;

/// Local storage key for the appearance preference.
pub const APPEARANCE_KEY: &str = "lms.appearance";

/// Colour scheme preference chosen on the Appearance page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    Light,
    Dark,
    /// Follow the operating system's `prefers-color-scheme`.
    #[default]
    System,
}

/// All appearances in display order.
pub const ALL_APPEARANCES: &[Appearance] = &[Appearance::Light, Appearance::Dark, Appearance::System];

impl Appearance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
            Appearance::System => "system",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Appearance::Light => "Light",
            Appearance::Dark => "Dark",
            Appearance::System => "System",
        }
    }

    /// Parse a stored key, falling back to `System`.
    pub fn from_key(s: &str) -> Self {
        match s.trim() {
            "light" => Appearance::Light,
            "dark" => Appearance::Dark,
            _ => Appearance::System,
        }
    }

    /// Resolve to the `data-theme` value given the OS preference.
    pub fn resolve(&self, system_prefers_dark: bool) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
            Appearance::System if system_prefers_dark => "dark",
            Appearance::System => "light",
        }
    }
}

/// Appearance shared between the sidebar toggle and the Appearance page.
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub appearance: Signal<Appearance>,
}

impl ThemeState {
    pub fn new(initial: Appearance) -> Self {
        Self {
            appearance: Signal::new(initial),
        }
    }

    /// Store and apply a new preference.
    pub fn set(&mut self, appearance: Appearance) {
        self.appearance.set(appearance);
        apply_appearance(appearance);
    }
}

/// Apply the stored preference on startup. Render once near the root.
#[component]
pub fn ThemeSeed() -> Element {
    use_effect(|| {
        document::eval(&format!(
            r#"
            (function() {{
                var pref = null;
                try {{ pref = localStorage.getItem('{APPEARANCE_KEY}'); }} catch(e) {{}}
                var dark = window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches;
                var theme = pref === 'dark' || (pref !== 'light' && dark) ? 'dark' : 'light';
                document.documentElement.setAttribute('data-theme', theme);
            }})();
            "#
        ));
    });

    rsx! {}
}

/// Persist the preference and update the document root.
pub fn apply_appearance(appearance: Appearance) {
    let key = appearance.as_str();
    let light = Appearance::System.resolve(false);
    let dark = Appearance::System.resolve(true);
    let fixed = match appearance {
        Appearance::System => "null".to_string(),
        other => format!("'{}'", other.resolve(false)),
    };
    document::eval(&format!(
        r#"
        (function() {{
            try {{ localStorage.setItem('{APPEARANCE_KEY}', '{key}'); }} catch(e) {{}}
            var fixed = {fixed};
            var dark = window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches;
            document.documentElement.setAttribute('data-theme', fixed || (dark ? '{dark}' : '{light}'));
        }})();
        "#,
    ));
}
