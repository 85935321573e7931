//! Tests for stacking reconciliation across the bucket, definition and wire
//! adapters.

use vizexec::afm::{Afm, AfmMeasure};
use vizexec::dimensions::generate_dimensions;
use vizexec::execution::ExecutionDefinition;
use vizexec::model::{
    names, ArithmeticOperator, Attribute, Bucket, ChartType, Derivation, Measure, ObjRef,
};
use vizexec::sanitize::{
    sanitize_afm, sanitize_buckets, sanitize_definition, ChartConfig, RatioScope,
    SanitizeOptions,
};

fn measure(id: &str, compute_ratio: bool) -> Measure {
    Measure::simple(id, ObjRef::identifier(format!("fact.{id}"))).with_compute_ratio(compute_ratio)
}

fn stacked() -> ChartConfig {
    ChartConfig {
        stack_measures: true,
        stack_measures_to_percent: true,
        ..Default::default()
    }
}

fn assert_forced_off(config: &ChartConfig) {
    assert!(!config.stack_measures, "stack_measures should be off");
    assert!(
        !config.stack_measures_to_percent,
        "stack_measures_to_percent should be off"
    );
}

// ============================================================================
// Bucket adapter
// ============================================================================

#[test]
fn test_single_ratio_measure_forces_stacking_off() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("m1", true)]),
        Bucket::new(
            names::VIEW,
            vec![Attribute::new("a1", ObjRef::identifier("label.region"))],
        ),
    ];

    for scope in [RatioScope::Primary, RatioScope::DualAxis] {
        let sanitized = sanitize_buckets(&buckets, &stacked(), scope, &SanitizeOptions::default());
        assert_forced_off(&sanitized);
    }
}

#[test]
fn test_ratio_ignored_with_several_measures() {
    for flags in [[true, true], [true, false], [false, true]] {
        let buckets = vec![Bucket::new(
            names::MEASURES,
            vec![measure("m1", flags[0]), measure("m2", flags[1])],
        )];
        let sanitized = sanitize_buckets(
            &buckets,
            &stacked(),
            RatioScope::Primary,
            &SanitizeOptions::default(),
        );
        assert_eq!(sanitized, stacked(), "flags {flags:?}");
    }
}

#[test]
fn test_single_measure_without_ratio_passes_through() {
    let buckets = vec![Bucket::new(names::MEASURES, vec![measure("m1", false)])];
    let sanitized = sanitize_buckets(
        &buckets,
        &stacked(),
        RatioScope::Primary,
        &SanitizeOptions::default(),
    );
    assert_eq!(sanitized, stacked());
}

#[test]
fn test_secondary_measures_excluded_when_dual_axis_on() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("m1", true)]),
        Bucket::new(names::SECONDARY_MEASURES, vec![measure("m2", false)]),
    ];

    // dual axis unset → default on → only m1 counts
    let sanitized = sanitize_buckets(
        &buckets,
        &stacked(),
        RatioScope::DualAxis,
        &SanitizeOptions::default(),
    );
    assert_forced_off(&sanitized);

    // dual axis off → both count → ratio ignored
    let config = ChartConfig {
        dual_axis: Some(false),
        ..stacked()
    };
    let sanitized = sanitize_buckets(
        &buckets,
        &config,
        RatioScope::DualAxis,
        &SanitizeOptions::default(),
    );
    assert_eq!(sanitized, config);
}

#[test]
fn test_dual_axis_default_is_configurable() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("m1", true)]),
        Bucket::new(names::SECONDARY_MEASURES, vec![measure("m2", false)]),
    ];
    let options = SanitizeOptions {
        dual_axis_default: false,
    };

    let sanitized = sanitize_buckets(&buckets, &stacked(), RatioScope::DualAxis, &options);

    assert_eq!(sanitized, stacked());
}

#[test]
fn test_primary_scope_counts_secondary_bucket() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("m1", true)]),
        Bucket::new(names::SECONDARY_MEASURES, vec![measure("m2", false)]),
    ];
    let sanitized = sanitize_buckets(
        &buckets,
        &stacked(),
        RatioScope::Primary,
        &SanitizeOptions::default(),
    );
    assert_eq!(sanitized, stacked());
}

#[test]
fn test_ratio_scope_by_chart_type() {
    assert_eq!(RatioScope::of(ChartType::Column), RatioScope::DualAxis);
    assert_eq!(RatioScope::of(ChartType::Combo), RatioScope::DualAxis);
    assert_eq!(RatioScope::of(ChartType::Pie), RatioScope::Primary);
    assert_eq!(RatioScope::of(ChartType::Table), RatioScope::Primary);
}

// ============================================================================
// Definition and wire adapters
// ============================================================================

#[test]
fn test_definition_adapter_matches_bucket_adapter() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("m1", true)]),
        Bucket::new(names::SECONDARY_MEASURES, vec![measure("m2", false)]),
    ];
    let definition = ExecutionDefinition::new(
        "w1",
        buckets.clone(),
        generate_dimensions(&buckets, ChartType::Column),
        vec![],
        vec![],
    )
    .unwrap();
    let options = SanitizeOptions::default();

    for config in [stacked(), ChartConfig { dual_axis: Some(false), ..stacked() }] {
        assert_eq!(
            sanitize_definition(&definition, &config, RatioScope::DualAxis, &options),
            sanitize_buckets(&buckets, &config, RatioScope::DualAxis, &options),
        );
    }
}

#[test]
fn test_afm_adapter_uses_config_secondary_list() {
    let afm = Afm {
        measures: vec![
            AfmMeasure::from(&measure("m1", true)),
            AfmMeasure::from(&measure("m2", false)),
        ],
        ..Default::default()
    };
    let options = SanitizeOptions::default();

    // without a secondary list both measures count
    let sanitized = sanitize_afm(&afm, &stacked(), RatioScope::DualAxis, &options);
    assert_eq!(sanitized, stacked());

    // m2 on the secondary axis with dual axis on: only m1 counts
    let config = ChartConfig {
        secondary_measures: vec!["m2".to_string()],
        ..stacked()
    };
    let sanitized = sanitize_afm(&afm, &config, RatioScope::DualAxis, &options);
    assert_forced_off(&sanitized);
    assert_eq!(sanitized.secondary_measures, vec!["m2".to_string()]);

    // primary scope ignores the list
    let sanitized = sanitize_afm(&afm, &config, RatioScope::Primary, &options);
    assert_eq!(sanitized, config);
}

#[test]
fn test_afm_from_definition_round_trip() {
    let buckets = vec![Bucket::new(names::MEASURES, vec![measure("m1", true)])];
    let definition = ExecutionDefinition::new(
        "w1",
        buckets.clone(),
        generate_dimensions(&buckets, ChartType::Pie),
        vec![],
        vec![],
    )
    .unwrap();
    let afm = definition.to_execution().afm;

    let sanitized = sanitize_afm(&afm, &stacked(), RatioScope::Primary, &SanitizeOptions::default());

    assert_forced_off(&sanitized);
}

#[test]
fn test_adapters_agree_on_single_computed_measure() {
    let computed = [
        Measure::arithmetic("a1", ArithmeticOperator::Ratio, ["m1", "m2"]),
        Measure::derived(
            "d1",
            "m1",
            Derivation::SamePeriodPreviousYear {
                pop_attribute: ObjRef::identifier("date.year"),
            },
        ),
    ];
    let options = SanitizeOptions::default();

    for measure in computed {
        let buckets = vec![Bucket::new(
            names::MEASURES,
            vec![measure.with_compute_ratio(true)],
        )];
        let definition = ExecutionDefinition::new(
            "w1",
            buckets.clone(),
            generate_dimensions(&buckets, ChartType::Column),
            vec![],
            vec![],
        )
        .unwrap();
        let afm = definition.to_execution().afm;

        let from_buckets = sanitize_buckets(&buckets, &stacked(), RatioScope::DualAxis, &options);
        let from_definition =
            sanitize_definition(&definition, &stacked(), RatioScope::DualAxis, &options);
        let from_afm = sanitize_afm(&afm, &stacked(), RatioScope::DualAxis, &options);

        assert_forced_off(&from_buckets);
        assert_eq!(from_definition, from_buckets);
        assert_eq!(from_afm, from_buckets);
    }
}
