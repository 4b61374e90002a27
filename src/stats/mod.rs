//! Body measurements and personal records.
//!
//! Every field is free text as the user typed it; nothing is parsed or
//! validated.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::store::{self, KeyValueStore, StoreError};

/// Store key for user stats.
pub const STATS_KEY: &str = "userStats";

/// Body type classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum BodyType {
    #[default]
    Ectomorph,
    Mesomorph,
    Endomorph,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Ectomorph => "Ectomorph",
            BodyType::Mesomorph => "Mesomorph",
            BodyType::Endomorph => "Endomorph",
        }
    }
}

/// The user's stats as stored under [`STATS_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub weight: String,
    pub height: String,
    pub body_type: BodyType,
    pub pr_chest: String,
    pub pr_arms: String,
    pub pr_back: String,
    pub pr_legs: String,
    pub pr_core: String,
    pub pr_miles_ran: String,
}

/// Fields to overwrite in [`UserStats::update`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsUpdate {
    pub weight: Option<String>,
    pub height: Option<String>,
    pub body_type: Option<BodyType>,
    pub pr_chest: Option<String>,
    pub pr_arms: Option<String>,
    pub pr_back: Option<String>,
    pub pr_legs: Option<String>,
    pub pr_core: Option<String>,
    pub pr_miles_ran: Option<String>,
}

impl StatsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl UserStats {
    /// Loads stats from `store`, or defaults if nothing usable is stored.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        match store::load::<Self, _>(store, STATS_KEY) {
            Ok(stats) => Ok(stats.unwrap_or_default()),
            Err(e) if e.is_corrupt() => {
                warn!("Discarding unreadable stats: {}", e);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store::save(store, STATS_KEY, self)?;
        info!("User stats saved");
        Ok(())
    }

    /// Applies every field present in `update`.
    pub fn update(&mut self, update: StatsUpdate) {
        fn apply<T>(field: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *field = value;
            }
        }

        apply(&mut self.weight, update.weight);
        apply(&mut self.height, update.height);
        apply(&mut self.body_type, update.body_type);
        apply(&mut self.pr_chest, update.pr_chest);
        apply(&mut self.pr_arms, update.pr_arms);
        apply(&mut self.pr_back, update.pr_back);
        apply(&mut self.pr_legs, update.pr_legs);
        apply(&mut self.pr_core, update.pr_core);
        apply(&mut self.pr_miles_ran, update.pr_miles_ran);
    }

    /// Personal records as (label, value) pairs, in display order.
    pub fn records(&self) -> [(&'static str, &str); 6] {
        [
            ("Chest", self.pr_chest.as_str()),
            ("Arms", self.pr_arms.as_str()),
            ("Back", self.pr_back.as_str()),
            ("Legs", self.pr_legs.as_str()),
            ("Core", self.pr_core.as_str()),
            ("Miles ran", self.pr_miles_ran.as_str()),
        ]
    }
}
