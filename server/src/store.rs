use crate::error::AppError;
use crate::models::runs::{ChallengeRun, EasterEggRun, MapContext};

/// Read access to everything the world record computation needs. A failed
/// read fails the whole computation; partial fact sets would silently move
/// bucket winners.
pub trait FactStore {
    fn map_catalog(&self) -> Result<Vec<MapContext>, AppError>;
    fn challenge_runs(&self) -> Result<Vec<ChallengeRun>, AppError>;
    fn easter_egg_runs(&self) -> Result<Vec<EasterEggRun>, AppError>;
}

/// Pre-fetched store contents.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub maps: Vec<MapContext>,
    pub challenge_runs: Vec<ChallengeRun>,
    pub easter_egg_runs: Vec<EasterEggRun>,
}

impl Snapshot {
    pub fn capture(store: &impl FactStore) -> Result<Self, AppError> {
        Ok(Snapshot {
            maps: store.map_catalog()?,
            challenge_runs: store.challenge_runs()?,
            easter_egg_runs: store.easter_egg_runs()?,
        })
    }
}

impl FactStore for Snapshot {
    fn map_catalog(&self) -> Result<Vec<MapContext>, AppError> {
        Ok(self.maps.clone())
    }

    fn challenge_runs(&self) -> Result<Vec<ChallengeRun>, AppError> {
        Ok(self.challenge_runs.clone())
    }

    fn easter_egg_runs(&self) -> Result<Vec<EasterEggRun>, AppError> {
        Ok(self.easter_egg_runs.clone())
    }
}
