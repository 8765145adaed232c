use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MineralType {
    Iron,
    Copper,
    FuelDeposit,
    RareEarth,
    Salt,
    Crystal,
    ScrapMetal,
}

/// Deposits for one cell. `v` is the mineral noise remapped to [0, 1]; each
/// rule gates it by an elevation, stress or volcanism band. Rules are checked
/// in a fixed order, so the returned list is ordered too.
pub fn deposits(v: f32, elevation: f32, stress: f32, volcanic: f32) -> Vec<MineralType> {
    let e = elevation;
    let rules = [
        (MineralType::Iron, stress > 0.5 && v > 0.6),
        (MineralType::FuelDeposit, e > 0.35 && e < 0.5 && volcanic < 0.2 && v > 0.7),
        (MineralType::Copper, e > 0.45 && e < 0.65 && v > 0.75),
        (MineralType::RareEarth, volcanic > 0.4 && v > 0.8),
        (MineralType::Salt, e > 0.35 && e < 0.42 && v < 0.3),
        (MineralType::Crystal, e > 0.65 && stress > 0.3 && v < 0.15),
        (MineralType::ScrapMetal, e > 0.38 && e < 0.55 && v > 0.85),
    ];
    rules
        .into_iter()
        .filter_map(|(mineral, present)| present.then_some(mineral))
        .collect()
}
