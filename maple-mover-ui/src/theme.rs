//! # Design tokens
//!
//! Material 3 colour roles, emitted once as `--md-sys-color-*` custom properties on `:root`.
//! Component rules only ever refer to a role through `var(...)`,
//! so swapping the [`Theme`] restyles every page.

/// Component and layout rules.
///
/// Colours are referenced by token only.
pub const COMPONENT_RULES: &str = include_str!("components.css");

const CUSTOM_PROPERTY_PREFIX: &str = "--md-sys-color-";

/// A Material 3 colour role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Primary,
    OnPrimary,
    PrimaryContainer,
    OnPrimaryContainer,
    SecondaryContainer,
    OnSecondaryContainer,
    TertiaryContainer,
    OnTertiaryContainer,
    Surface,
    OnSurface,
    SurfaceVariant,
    OnSurfaceVariant,
}

impl Token {
    pub const ALL: [Token; 12] = [
        Token::Primary,
        Token::OnPrimary,
        Token::PrimaryContainer,
        Token::OnPrimaryContainer,
        Token::SecondaryContainer,
        Token::OnSecondaryContainer,
        Token::TertiaryContainer,
        Token::OnTertiaryContainer,
        Token::Surface,
        Token::OnSurface,
        Token::SurfaceVariant,
        Token::OnSurfaceVariant,
    ];

    /// The role name, in the kebab case used by custom properties.
    pub fn name(self) -> &'static str {
        match self {
            Token::Primary => "primary",
            Token::OnPrimary => "on-primary",
            Token::PrimaryContainer => "primary-container",
            Token::OnPrimaryContainer => "on-primary-container",
            Token::SecondaryContainer => "secondary-container",
            Token::OnSecondaryContainer => "on-secondary-container",
            Token::TertiaryContainer => "tertiary-container",
            Token::OnTertiaryContainer => "on-tertiary-container",
            Token::Surface => "surface",
            Token::OnSurface => "on-surface",
            Token::SurfaceVariant => "surface-variant",
            Token::OnSurfaceVariant => "on-surface-variant",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }

    /// e.g. `--md-sys-color-primary`
    pub fn custom_property(self) -> String {
        format!("{CUSTOM_PROPERTY_PREFIX}{}", self.name())
    }
}

/// A value for every colour role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    colors: [&'static str; 12],
}

impl Default for Theme {
    fn default() -> Self {
        Self::material_light()
    }
}

impl Theme {
    /// The baseline Material 3 light scheme.
    pub fn material_light() -> Self {
        // Same order as `Token::ALL`
        Self {
            colors: [
                "#6750a4", "#ffffff", "#eaddff", "#21005d", "#e8def8", "#1d192b", "#ffd8e4",
                "#31111d", "#fffbfe", "#1c1b1f", "#e7e0ec", "#49454f",
            ],
        }
    }

    pub fn color(&self, token: Token) -> &'static str {
        self.colors[token as usize]
    }

    /// The `:root` block declaring every token.
    pub fn root_block(&self) -> String {
        let mut css = String::from(":root {\n");
        for token in Token::ALL {
            css.push_str(&format!("  {}: {};\n", token.custom_property(), self.color(token)));
        }
        css.push_str("}\n");
        css
    }

    /// The complete stylesheet: token declarations followed by [`COMPONENT_RULES`].
    pub fn stylesheet(&self) -> String {
        let mut css = self.root_block();
        css.push('\n');
        css.push_str(COMPONENT_RULES);
        css
    }
}

/// Every token name referenced through `var(--md-sys-color-...)` in `css`.
pub fn referenced_tokens(css: &str) -> impl Iterator<Item = &str> {
    css.split("var(")
        .skip(1)
        .filter_map(|rest| rest.split_once(')'))
        .filter_map(|(name, _)| name.strip_prefix(CUSTOM_PROPERTY_PREFIX))
}
