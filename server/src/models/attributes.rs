/// Gobblegum restriction recorded on a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GumMode {
    None,
    ClassicsOnly,
    Any,
}

impl GumMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NONE" => Some(GumMode::None),
            "CLASSICS_ONLY" => Some(GumMode::ClassicsOnly),
            "ANY" => Some(GumMode::Any),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GumMode::None => "No Gobblegums",
            GumMode::ClassicsOnly => "Classic Gobblegums Only",
            GumMode::Any => "All Gobblegums",
        }
    }
}

/// Elixir (consumable) restriction recorded on a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElixirMode {
    None,
    ClassicsOnly,
    Any,
}

impl ElixirMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NONE" => Some(ElixirMode::None),
            "CLASSICS_ONLY" => Some(ElixirMode::ClassicsOnly),
            "ANY" => Some(ElixirMode::Any),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElixirMode::None => "No Elixirs",
            ElixirMode::ClassicsOnly => "Classic Elixirs Only",
            ElixirMode::Any => "All Elixirs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Casual,
    Normal,
    Hardcore,
    Realistic,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CASUAL" => Some(Difficulty::Casual),
            "NORMAL" => Some(Difficulty::Normal),
            "HARDCORE" => Some(Difficulty::Hardcore),
            "REALISTIC" => Some(Difficulty::Realistic),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Casual => "Casual",
            Difficulty::Normal => "Normal",
            Difficulty::Hardcore => "Hardcore",
            Difficulty::Realistic => "Realistic",
        }
    }
}

/// Optional game-specific rule attributes of a run. Every field is sparse:
/// `None` means the run did not record that rule, which keeps it out of the
/// matching filtered leaderboards. Which fields matter depends on the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunAttributes {
    pub gum_mode: Option<GumMode>,
    pub aats_used: Option<bool>,
    pub elixir_mode: Option<ElixirMode>,
    pub difficulty: Option<Difficulty>,
    pub support_used: Option<bool>,
    pub rampage_inducer_used: Option<bool>,
    pub relics_used: Option<bool>,
}
