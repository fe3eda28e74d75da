mod catalog;
mod ids;
mod scenario;
mod session;

pub use catalog::{Catalog, CatalogError};
pub use ids::{ParseIdError, ScenarioId};
pub use scenario::{
    MfaOption, MfaScenario, Outcome, PasswordScenario, PhishingScenario, Scenario, ScenarioKind,
};
pub use session::{InputError, MAX_POINTS_DELTA, PointsDelta, Position, Session};
