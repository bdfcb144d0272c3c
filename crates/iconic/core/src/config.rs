/// Module configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconicConfig {
    /// Display name of this module as the host lists it.
    pub module_name: String,
    /// Icon shown when a queued unit has no icon of its own.
    pub fallback_icon: String,
    /// Ignore list used when the host supplies no override.
    pub default_ignore_list: Vec<String>,
}

impl IconicConfig {
    /// Side length of the square selection grid, in cells.
    pub const GRID_SIZE: u32 = 32;
    /// Side length of one icon cell in the sprite sheet, in pixels.
    pub const SPRITE_CELL: u32 = 32;

    pub const DEFAULT_MODULE_NAME: &'static str = "Iconic";
    pub const DEFAULT_FALLBACK_ICON: &'static str = "Blank";

    /// Units whose solves are deferred until the absorption pass.
    pub const DEFAULT_IGNORED_MODULES: &'static [&'static str] = &[
        "+",
        "14",
        "A>N<D",
        "Black Arrows",
        "Brainf---",
        "Busy Beaver",
        "Cube Synchronization",
        "Don't Touch Anything",
        "Floor Lights",
        "Forget Everything",
        "Forget Any Color",
        "Forget Enigma",
        "Forget It Not",
        "Forget Maze Not",
        "Forget Infinity",
        "Forget Me Later",
        "Forget Me Not",
        "Forget Perspective",
        "Forget The Colors",
        "Forget Them All",
        "Forget This",
        "Forget Us Not",
        "Gemory",
        "Iconic",
        "Keypad Directionality",
        "Kugelblitz",
        "OmegaForget",
        "Organization",
        "Out of Time",
        "Purgatory",
        "RPS Judging",
        "Security Council",
        "Shoddy Chess",
        "Simon Forgets",
        "Simon's Stages",
        "Soulscream",
        "Souvenir",
        "Tallordered Keys",
        "Tetrahedron",
        "The Board Walk",
        "The Twin",
        "The Very Annoying Button",
        "Ultimate Custom Night",
        "Whiteout",
        "Übermodule",
        "Bamboozling Time Keeper",
        "Doomsday Button",
        "OmegaDestroyer",
        "Password Destroyer",
        "The Time Keeper",
        "Timing is Everything",
        "Turn The Key",
        "Zener Cards",
    ];

    pub fn new() -> Self {
        Self {
            module_name: Self::DEFAULT_MODULE_NAME.to_string(),
            fallback_icon: Self::DEFAULT_FALLBACK_ICON.to_string(),
            default_ignore_list: Self::DEFAULT_IGNORED_MODULES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn with_fallback_icon(mut self, fallback_icon: impl Into<String>) -> Self {
        self.fallback_icon = fallback_icon.into();
        self
    }

    pub fn with_default_ignore_list<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.default_ignore_list = names.iter().map(|name| name.as_ref().to_string()).collect();
        self
    }
}

impl Default for IconicConfig {
    fn default() -> Self {
        Self::new()
    }
}
