use crate::models::attributes::{Difficulty, ElixirMode, GumMode, RunAttributes};
use std::collections::{BTreeMap, BTreeSet};

/// An optional rule dimension that can split a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Gobblegums,
    Aats,
    Elixirs,
    Difficulty,
    Support,
    RampageInducer,
    Relics,
}

/// A recorded value, tagged with the dimension it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionValue {
    Gum(GumMode),
    Aats(bool),
    Elixir(ElixirMode),
    Difficulty(Difficulty),
    Support(bool),
    RampageInducer(bool),
    Relics(bool),
}

impl DimensionValue {
    pub fn label(self) -> String {
        let text = match self {
            DimensionValue::Gum(mode) => mode.label(),
            DimensionValue::Aats(true) => "AATs Used",
            DimensionValue::Aats(false) => "No AATs",
            DimensionValue::Elixir(mode) => mode.label(),
            DimensionValue::Difficulty(difficulty) => {
                return format!("{} Difficulty", difficulty.label());
            }
            DimensionValue::Support(true) => "Support Used",
            DimensionValue::Support(false) => "No Support",
            DimensionValue::RampageInducer(true) => "Rampage Inducer",
            DimensionValue::RampageInducer(false) => "No Rampage Inducer",
            DimensionValue::Relics(true) => "Relics Used",
            DimensionValue::Relics(false) => "No Relics",
        };
        text.to_string()
    }
}

/// How one dimension is read off a run. Display text comes from the
/// value itself, see [`DimensionValue::label`].
pub struct DimensionDescriptor {
    pub dimension: Dimension,
    pub read: fn(&RunAttributes) -> Option<DimensionValue>,
}

const GOBBLEGUMS: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::Gobblegums,
    read: |a| a.gum_mode.map(DimensionValue::Gum),
};

const AATS: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::Aats,
    read: |a| a.aats_used.map(DimensionValue::Aats),
};

const ELIXIRS: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::Elixirs,
    read: |a| a.elixir_mode.map(DimensionValue::Elixir),
};

const DIFFICULTY: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::Difficulty,
    read: |a| a.difficulty.map(DimensionValue::Difficulty),
};

const SUPPORT: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::Support,
    read: |a| a.support_used.map(DimensionValue::Support),
};

const RAMPAGE_INDUCER: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::RampageInducer,
    read: |a| a.rampage_inducer_used.map(DimensionValue::RampageInducer),
};

const RELICS: DimensionDescriptor = DimensionDescriptor {
    dimension: Dimension::Relics,
    read: |a| a.relics_used.map(DimensionValue::Relics),
};

const GAME_DIMENSIONS: &[(&str, &[DimensionDescriptor])] = &[
    ("BO3", &[GOBBLEGUMS, AATS]),
    ("BO4", &[ELIXIRS, DIFFICULTY]),
    ("BOCW", &[SUPPORT, RAMPAGE_INDUCER]),
    ("BO6", &[GOBBLEGUMS, SUPPORT, RAMPAGE_INDUCER]),
    ("VG", &[RELICS]),
];

/// The optional dimensions a game's leaderboards can be filtered by.
pub fn dimensions_for(game_code: &str) -> &'static [DimensionDescriptor] {
    GAME_DIMENSIONS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(game_code))
        .map(|(_, dimensions)| *dimensions)
        .unwrap_or(&[])
}

/// One leaderboard view over the optional dimensions. Empty means unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilterVariant(BTreeMap<Dimension, DimensionValue>);

impl FilterVariant {
    pub fn unfiltered() -> Self {
        FilterVariant::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, DimensionValue)> + '_ {
        self.0.iter().map(|(dimension, value)| (*dimension, *value))
    }

    /// Display labels in dimension order.
    pub fn labels(&self) -> Vec<String> {
        self.0.values().map(|value| value.label()).collect()
    }
}

impl FromIterator<(Dimension, DimensionValue)> for FilterVariant {
    fn from_iter<I: IntoIterator<Item = (Dimension, DimensionValue)>>(iter: I) -> Self {
        FilterVariant(iter.into_iter().collect())
    }
}

/// Every filter variant a run competes under: always the unfiltered view,
/// one single-dimension view per recorded dimension, and a combined view
/// when the game has several dimensions and the run recorded more than one.
pub fn expand_variants(game_code: &str, attributes: &RunAttributes) -> BTreeSet<FilterVariant> {
    let descriptors = dimensions_for(game_code);
    let present: Vec<(Dimension, DimensionValue)> = descriptors
        .iter()
        .filter_map(|d| (d.read)(attributes).map(|value| (d.dimension, value)))
        .collect();

    let mut variants: BTreeSet<FilterVariant> = BTreeSet::new();
    variants.insert(FilterVariant::unfiltered());
    for entry in &present {
        variants.insert(std::iter::once(*entry).collect());
    }
    if descriptors.len() > 1 && present.len() > 1 {
        variants.insert(present.into_iter().collect());
    }
    variants
}
