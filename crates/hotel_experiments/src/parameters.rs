//! Parameter variation framework for hotel experiments.
//!
//! A [ParameterSpace] lists the values to explore along each dimension. Grid
//! search takes the Cartesian product; random sampling draws combinations
//! from the same lists. Dimensions left empty fall back to the base
//! [HotelParams].

use std::collections::HashSet;

use hotel_core::policy::BookingPolicyKind;
use hotel_core::scenario::{HotelParams, InterArrivalParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Days simulated when the space does not vary the horizon.
pub const DEFAULT_SIMULATION_DAYS: u32 = 30;

/// One runnable configuration: parameters plus the metadata needed to
/// identify and reproduce the run.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    /// Hotel parameters (seed not yet applied).
    pub params: HotelParams,
    /// Identifies the parameter combination. Runs that differ only in seed share it.
    pub experiment_id: String,
    /// Index of the seed within the experiment.
    pub run_id: usize,
    pub seed: u64,
    /// Simulated days.
    pub days: u32,
}

impl ParameterSet {
    pub fn new(params: HotelParams, experiment_id: String, run_id: usize, seed: u64, days: u32) -> Self {
        Self {
            params,
            experiment_id,
            run_id,
            seed,
            days,
        }
    }

    /// The hotel params with this run's seed applied.
    pub fn hotel_params(&self) -> HotelParams {
        self.params.clone().with_seed(self.seed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Combination {
    policy: BookingPolicyKind,
    capacity_scale: f64,
    mean_inter_arrival_hours: Option<f64>,
    days: u32,
}

impl Combination {
    fn apply(&self, base: &HotelParams) -> HotelParams {
        let mut params = base
            .clone()
            .with_policy(self.policy)
            .with_capacity_scale(self.capacity_scale);
        if let Some(mean_hours) = self.mean_inter_arrival_hours {
            params = params.with_inter_arrival(InterArrivalParams::Exponential { mean_hours });
        }
        params
    }

    /// Hashable identity; floats compared bitwise.
    fn key(&self) -> (BookingPolicyKind, u64, Option<u64>, u32) {
        (
            self.policy,
            self.capacity_scale.to_bits(),
            self.mean_inter_arrival_hours.map(f64::to_bits),
            self.days,
        )
    }
}

/// Defines the values explored along each experiment dimension.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    base: HotelParams,
    policy_kinds: Vec<BookingPolicyKind>,
    capacity_scales: Vec<f64>,
    mean_inter_arrival_hours: Vec<f64>,
    simulation_days: Vec<u32>,
    seeds: Vec<u64>,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self {
            base: HotelParams::default(),
            policy_kinds: vec![],
            capacity_scales: vec![],
            mean_inter_arrival_hours: vec![],
            simulation_days: vec![],
            seeds: vec![],
        }
    }

    /// Create a new parameter space for grid search.
    pub fn grid() -> Self {
        Self::new()
    }

    pub fn policy_kinds(mut self, kinds: Vec<BookingPolicyKind>) -> Self {
        self.policy_kinds = kinds;
        self
    }

    /// Factors applied to every room count of the base hotel.
    pub fn capacity_scales(mut self, scales: Vec<f64>) -> Self {
        self.capacity_scales = scales;
        self
    }

    /// Mean gaps between booking requests. Each value switches the run to
    /// exponential inter-arrivals with that mean.
    pub fn mean_inter_arrival_hours(mut self, hours: Vec<f64>) -> Self {
        self.mean_inter_arrival_hours = hours;
        self
    }

    pub fn simulation_days(mut self, days: Vec<u32>) -> Self {
        self.simulation_days = days;
        self
    }

    /// Seeds to repeat every combination with. Each seed is one run.
    pub fn seeds(mut self, seeds: Vec<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Set base parameters (used as defaults).
    pub fn with_base(mut self, base: HotelParams) -> Self {
        self.base = base;
        self
    }

    pub fn base(&self) -> &HotelParams {
        &self.base
    }

    fn policy_values(&self) -> Vec<BookingPolicyKind> {
        or_default(&self.policy_kinds, self.base.policy)
    }

    fn scale_values(&self) -> Vec<f64> {
        or_default(&self.capacity_scales, 1.0)
    }

    fn inter_arrival_values(&self) -> Vec<Option<f64>> {
        if self.mean_inter_arrival_hours.is_empty() {
            vec![None]
        } else {
            self.mean_inter_arrival_hours.iter().copied().map(Some).collect()
        }
    }

    fn day_values(&self) -> Vec<u32> {
        or_default(&self.simulation_days, DEFAULT_SIMULATION_DAYS)
    }

    fn seed_values(&self, experiment_index: usize) -> Vec<u64> {
        if self.seeds.is_empty() {
            vec![derived_seed(experiment_index)]
        } else {
            self.seeds.clone()
        }
    }

    fn combinations(&self) -> Vec<Combination> {
        let mut combos = Vec::new();
        for policy in self.policy_values() {
            for capacity_scale in self.scale_values() {
                for mean_inter_arrival_hours in self.inter_arrival_values() {
                    for days in self.day_values() {
                        combos.push(Combination {
                            policy,
                            capacity_scale,
                            mean_inter_arrival_hours,
                            days,
                        });
                    }
                }
            }
        }
        combos
    }

    /// Number of parameter sets [Self::generate] yields.
    pub fn len(&self) -> usize {
        self.policy_values().len()
            * self.scale_values().len()
            * self.inter_arrival_values().len()
            * self.day_values().len()
            * self.seeds.len().max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate all parameter sets using grid search (Cartesian product).
    ///
    /// Every seed of a combination shares its `experiment_id`; `run_id` is the
    /// seed's position. Without explicit seeds each combination gets one
    /// seed derived from its index.
    pub fn generate(&self) -> Vec<ParameterSet> {
        self.combinations()
            .into_iter()
            .enumerate()
            .flat_map(|(index, combo)| {
                let params = combo.apply(&self.base);
                self.seed_values(index)
                    .into_iter()
                    .enumerate()
                    .map(move |(run_id, seed)| {
                        ParameterSet::new(params.clone(), format!("exp_{index}"), run_id, seed, combo.days)
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Draw up to `count` distinct combinations at random (Monte Carlo).
    ///
    /// Stops early when the space has fewer distinct combinations than
    /// `count`. Each sampled set runs with the first configured seed, or a
    /// derived one.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        const MAX_ATTEMPTS: usize = 10_000;

        let mut rng = StdRng::seed_from_u64(seed);
        let policies = self.policy_values();
        let scales = self.scale_values();
        let arrivals = self.inter_arrival_values();
        let days = self.day_values();

        let mut seen = HashSet::new();
        let mut sets = Vec::new();
        let mut attempts = 0;
        while sets.len() < count && attempts < MAX_ATTEMPTS {
            attempts += 1;
            let combo = Combination {
                policy: pick(&mut rng, &policies),
                capacity_scale: pick(&mut rng, &scales),
                mean_inter_arrival_hours: pick(&mut rng, &arrivals),
                days: pick(&mut rng, &days),
            };
            if !seen.insert(combo.key()) {
                continue;
            }
            let index = sets.len();
            let run_seed = self.seeds.first().copied().unwrap_or_else(|| derived_seed(index));
            sets.push(ParameterSet::new(
                combo.apply(&self.base),
                format!("sample_{index}"),
                0,
                run_seed,
                combo.days,
            ));
        }
        sets
    }
}

fn or_default<T: Copy>(values: &[T], default: T) -> Vec<T> {
    if values.is_empty() {
        vec![default]
    } else {
        values.to_vec()
    }
}

fn pick<T: Copy>(rng: &mut StdRng, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

fn derived_seed(index: usize) -> u64 {
    (index as u64).wrapping_mul(0x9e3779b9)
}
