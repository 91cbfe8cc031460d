//! Ready-made parameter spaces.

use hotel_core::policy::BookingPolicyKind;

use crate::ParameterSpace;

/// Both policies under light, normal and heavy demand, five seeds each.
pub fn policy_comparison_space() -> ParameterSpace {
    ParameterSpace::grid()
        .policy_kinds(BookingPolicyKind::ALL.to_vec())
        .mean_inter_arrival_hours(vec![6.0, 3.0, 1.5])
        .simulation_days(vec![60])
        .seeds(vec![1, 2, 3, 4, 5])
}

/// How much capacity each policy needs for the default demand.
pub fn capacity_sensitivity_space() -> ParameterSpace {
    ParameterSpace::grid()
        .policy_kinds(BookingPolicyKind::ALL.to_vec())
        .capacity_scales(vec![0.25, 0.5, 0.75, 1.0, 1.5, 2.0])
        .simulation_days(vec![60])
        .seeds(vec![1, 2, 3])
}

/// Smoke-test sized space.
pub fn minimal_space() -> ParameterSpace {
    ParameterSpace::grid()
        .policy_kinds(BookingPolicyKind::ALL.to_vec())
        .simulation_days(vec![7])
        .seeds(vec![1])
}

/// Resolve a preset by name, as accepted on the command line.
pub fn space_by_name(name: &str) -> Option<ParameterSpace> {
    match name {
        "policy_comparison" | "policy-comparison" => Some(policy_comparison_space()),
        "capacity_sensitivity" | "capacity-sensitivity" => Some(capacity_sensitivity_space()),
        "minimal" => Some(minimal_space()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_sizes() {
        assert_eq!(policy_comparison_space().generate().len(), 30);
        assert_eq!(capacity_sensitivity_space().generate().len(), 36);
        assert_eq!(minimal_space().generate().len(), 2);
    }

    #[test]
    fn presets_resolve_by_name() {
        assert!(space_by_name("policy-comparison").is_some());
        assert!(space_by_name("minimal").is_some());
        assert!(space_by_name("everything").is_none());
    }
}
