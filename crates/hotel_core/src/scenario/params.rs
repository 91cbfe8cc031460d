use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::demand::DemandConfig;
use crate::distributions::{
    ExponentialHours, FixedInterval, InterArrivalDistribution, UniformHours,
};
use crate::error::ConfigError;
use crate::policy::BookingPolicyKind;
use crate::room::{Cost, RoomCatalog, RoomCosts, RoomCounts};

/// Default hotel: the standard catalog, cheapest first.
const DEFAULT_ROOMS: [(&str, u32, Cost); 5] = [
    ("Single", 10, 3000),
    ("Double", 8, 4000),
    ("DoubleWithSofa", 6, 4500),
    ("HalfLux", 6, 5000),
    ("Lux", 4, 10000),
];

/// Gap between booking requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterArrivalParams {
    Uniform { min_hours: u32, max_hours: u32 },
    Fixed { hours: u32 },
    Exponential { mean_hours: f64 },
}

impl Default for InterArrivalParams {
    fn default() -> Self {
        InterArrivalParams::Uniform {
            min_hours: 1,
            max_hours: 5,
        }
    }
}

impl InterArrivalParams {
    pub fn build(&self) -> Result<Box<dyn InterArrivalDistribution>, ConfigError> {
        Ok(match *self {
            InterArrivalParams::Uniform {
                min_hours,
                max_hours,
            } => Box::new(UniformHours::new(min_hours, max_hours)?),
            InterArrivalParams::Fixed { hours } => Box::new(FixedInterval::new(hours)),
            InterArrivalParams::Exponential { mean_hours } => {
                Box::new(ExponentialHours::from_mean_hours(mean_hours)?)
            }
        })
    }

    /// Expected gap of the distribution these parameters build.
    pub fn mean_hours(&self) -> Result<f64, ConfigError> {
        Ok(self.build()?.mean_hours())
    }
}

/// Demand generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandParams {
    pub inter_arrival: InterArrivalParams,
    pub lead_days_min: u32,
    pub lead_days_max: u32,
    pub stay_days_min: u32,
    pub stay_days_max: u32,
    /// Request weight per room type name. Empty means the default
    /// cheapest-first weighting; types left out get weight 0.
    pub room_weights: BTreeMap<String, f64>,
    pub max_bookings: Option<u64>,
}

impl Default for DemandParams {
    fn default() -> Self {
        Self {
            inter_arrival: InterArrivalParams::default(),
            lead_days_min: 1,
            lead_days_max: 10,
            stay_days_min: 1,
            stay_days_max: 10,
            room_weights: BTreeMap::new(),
            max_bookings: None,
        }
    }
}

/// Everything needed to build a hotel simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelParams {
    /// Room type names in upgrade order (cheapest first).
    pub room_types: Vec<String>,
    pub room_counts: BTreeMap<String, u32>,
    pub room_costs: BTreeMap<String, Cost>,
    pub policy: BookingPolicyKind,
    pub demand: DemandParams,
    /// Seed for the demand RNG; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for HotelParams {
    fn default() -> Self {
        Self {
            room_types: DEFAULT_ROOMS.iter().map(|(n, _, _)| n.to_string()).collect(),
            room_counts: DEFAULT_ROOMS
                .iter()
                .map(|(n, c, _)| (n.to_string(), *c))
                .collect(),
            room_costs: DEFAULT_ROOMS
                .iter()
                .map(|(n, _, c)| (n.to_string(), *c))
                .collect(),
            policy: BookingPolicyKind::default(),
            demand: DemandParams::default(),
            seed: None,
        }
    }
}

impl HotelParams {
    /// A hotel with no room types; add them with [HotelParams::with_room].
    pub fn empty() -> Self {
        Self {
            room_types: Vec::new(),
            room_counts: BTreeMap::new(),
            room_costs: BTreeMap::new(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a room type after the existing ones, with its capacity and price.
    pub fn with_room(mut self, name: &str, count: u32, cost: Cost) -> Self {
        if !self.room_types.iter().any(|n| n == name) {
            self.room_types.push(name.to_string());
        }
        self.room_counts.insert(name.to_string(), count);
        self.room_costs.insert(name.to_string(), cost);
        self
    }

    pub fn with_room_count(mut self, name: &str, count: u32) -> Self {
        self.room_counts.insert(name.to_string(), count);
        self
    }

    pub fn with_room_cost(mut self, name: &str, cost: Cost) -> Self {
        self.room_costs.insert(name.to_string(), cost);
        self
    }

    /// Multiply every capacity by `factor`, rounding to the nearest room.
    pub fn with_capacity_scale(mut self, factor: f64) -> Self {
        for count in self.room_counts.values_mut() {
            *count = (*count as f64 * factor.max(0.0)).round() as u32;
        }
        self
    }

    pub fn with_policy(mut self, policy: BookingPolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_demand(mut self, demand: DemandParams) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_inter_arrival(mut self, inter_arrival: InterArrivalParams) -> Self {
        self.demand.inter_arrival = inter_arrival;
        self
    }

    pub fn with_lead_days(mut self, min: u32, max: u32) -> Self {
        self.demand.lead_days_min = min;
        self.demand.lead_days_max = max;
        self
    }

    pub fn with_stay_days(mut self, min: u32, max: u32) -> Self {
        self.demand.stay_days_min = min;
        self.demand.stay_days_max = max;
        self
    }

    pub fn with_room_weight(mut self, name: &str, weight: f64) -> Self {
        self.demand.room_weights.insert(name.to_string(), weight);
        self
    }

    pub fn with_max_bookings(mut self, max: u64) -> Self {
        self.demand.max_bookings = Some(max);
        self
    }

    pub fn catalog(&self) -> Result<RoomCatalog, ConfigError> {
        RoomCatalog::new(self.room_types.iter().cloned())
    }

    /// Counts keyed by type. Completeness is checked when the inventory is built.
    pub fn room_counts(&self, catalog: &RoomCatalog) -> Result<RoomCounts, ConfigError> {
        catalog.resolve_names(&self.room_counts)
    }

    pub fn room_costs(&self, catalog: &RoomCatalog) -> Result<RoomCosts, ConfigError> {
        catalog.resolve_names(&self.room_costs)
    }

    pub fn demand_config(&self, catalog: &RoomCatalog) -> Result<DemandConfig, ConfigError> {
        let demand = &self.demand;
        let room_weights = if demand.room_weights.is_empty() {
            Vec::new()
        } else {
            let by_type = catalog.resolve_names(&demand.room_weights)?;
            catalog
                .types()
                .map(|t| by_type.get(&t).copied().unwrap_or(0.0))
                .collect()
        };

        let mut config = DemandConfig::default()
            .with_inter_arrival(demand.inter_arrival.build()?)
            .with_lead_days(demand.lead_days_min, demand.lead_days_max)
            .with_stay_days(demand.stay_days_min, demand.stay_days_max)
            .with_room_weights(room_weights);
        if let Some(max) = demand.max_bookings {
            config = config.with_max_bookings(max);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    pub fn total_rooms(&self) -> u64 {
        self.room_counts.values().map(|c| *c as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomType;

    #[test]
    fn defaults_cover_standard_catalog() {
        let params = HotelParams::default();
        let catalog = params.catalog().unwrap();
        assert_eq!(catalog, RoomCatalog::standard());
        assert_eq!(params.room_counts(&catalog).unwrap().len(), 5);
        assert_eq!(
            params.room_costs(&catalog).unwrap().get(&RoomType(4)),
            Some(&10000)
        );
        assert_eq!(params.total_rooms(), 34);
    }

    #[test]
    fn json_round_trip_keeps_every_field() {
        let params = HotelParams::empty()
            .with_room("Single", 2, 100)
            .with_room("Suite", 1, 900)
            .with_policy(BookingPolicyKind::Trivial)
            .with_inter_arrival(InterArrivalParams::Exponential { mean_hours: 2.5 })
            .with_seed(4);
        let json = params.to_json_string().unwrap();
        assert_eq!(HotelParams::from_json_str(&json).unwrap(), params);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params = HotelParams::from_json_str(r#"{ "policy": "trivial", "seed": 9 }"#).unwrap();
        assert_eq!(params.policy, BookingPolicyKind::Trivial);
        assert_eq!(params.seed, Some(9));
        assert_eq!(params.room_types.len(), 5);

        let uniform = HotelParams::from_json_str(
            r#"{ "demand": { "inter_arrival": { "kind": "fixed", "hours": 3 } } }"#,
        )
        .unwrap();
        assert_eq!(uniform.demand.inter_arrival, InterArrivalParams::Fixed { hours: 3 });
        assert_eq!(uniform.demand.stay_days_max, 10);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            HotelParams::from_json_str("{ room_types: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn weights_follow_catalog_order() {
        let params = HotelParams::default()
            .with_room_weight("Lux", 2.0)
            .with_room_weight("Single", 1.0);
        let catalog = params.catalog().unwrap();
        let config = params.demand_config(&catalog).unwrap();
        assert_eq!(config.room_weights, vec![1.0, 0.0, 0.0, 0.0, 2.0]);

        let unknown = HotelParams::default().with_room_weight("Attic", 1.0);
        assert_eq!(
            unknown.demand_config(&catalog).err(),
            Some(ConfigError::UnknownRoomType("Attic".to_string()))
        );
    }

    #[test]
    fn mean_hours_comes_from_the_built_distribution() {
        assert_eq!(InterArrivalParams::default().mean_hours(), Ok(3.0));
        assert_eq!(InterArrivalParams::Fixed { hours: 0 }.mean_hours(), Ok(1.0));
        assert_eq!(
            InterArrivalParams::Exponential { mean_hours: 2.5 }.mean_hours(),
            Ok(2.5)
        );
        assert_eq!(
            InterArrivalParams::Exponential { mean_hours: 0.0 }.mean_hours(),
            Err(ConfigError::InvalidRate(f64::INFINITY))
        );
    }

    #[test]
    fn capacity_scale_rounds() {
        let params = HotelParams::empty()
            .with_room("Single", 3, 1)
            .with_capacity_scale(0.5);
        assert_eq!(params.room_counts["Single"], 2);
    }
}
