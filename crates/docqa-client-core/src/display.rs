use serde::Serialize;

/// The three result regions are mutually exclusive; at most one is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRegion {
    #[default]
    Hidden,
    Loading,
    Results,
    Error,
}

impl DisplayRegion {
    pub const ALL_VISIBLE: [DisplayRegion; 3] = [Self::Loading, Self::Results, Self::Error];

    pub fn shows(self, region: DisplayRegion) -> bool {
        self != Self::Hidden && self == region
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Loading => "loading",
            Self::Results => "results",
            Self::Error => "error",
        }
    }
}
