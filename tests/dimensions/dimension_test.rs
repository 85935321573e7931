//! Tests for dimension assignment across chart families.

use vizexec::dimensions::{
    default_dimensions, generate_dimensions, matrix_dimensions, pivot_table_dimensions,
    pointy_dimensions, round_dimensions, stacked_dimensions, table_dimensions,
    treemap_dimensions, Dimension, DimensionFamily, StackRoles, MEASURE_GROUP,
};
use vizexec::model::{
    names, Attribute, Bucket, ChartInput, ChartType, Measure, ObjRef, Total, TotalType,
};

fn attr(id: &str) -> Attribute {
    Attribute::new(id, ObjRef::identifier(format!("label.{id}")))
}

fn measure(id: &str) -> Measure {
    Measure::simple(id, ObjRef::identifier(format!("fact.{id}")))
}

fn ids(dimensions: &[Dimension]) -> Vec<Vec<&str>> {
    dimensions
        .iter()
        .map(|d| d.item_identifiers.iter().map(String::as_str).collect())
        .collect()
}

// ============================================================================
// Stacked family
// ============================================================================

#[test]
fn test_stacked_with_stack_attribute() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A"), measure("B")]),
        Bucket::new(names::ATTRIBUTE, vec![attr("X")]),
        Bucket::new(names::STACK, vec![attr("Y")]),
    ];

    let dimensions = generate_dimensions(&buckets, ChartType::Column);

    assert_eq!(ids(&dimensions), vec![vec!["Y"], vec!["X", MEASURE_GROUP]]);
}

#[test]
fn test_stacked_without_stack_falls_back_to_default() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("X")]),
        Bucket::empty(names::STACK),
    ];

    let dimensions = stacked_dimensions(&buckets, StackRoles::VIEW_STACK);

    assert_eq!(dimensions, default_dimensions(&buckets));
    assert_eq!(ids(&dimensions), vec![vec![MEASURE_GROUP], vec!["X"]]);
}

#[test]
fn test_stacked_truncates_view_and_stack() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("V1"), attr("V2"), attr("V3")]),
        Bucket::new(names::STACK, vec![attr("S1"), attr("S2")]),
    ];

    let dimensions = generate_dimensions(&buckets, ChartType::Bar);

    assert_eq!(
        ids(&dimensions),
        vec![vec!["S1"], vec!["V1", "V2", MEASURE_GROUP]]
    );
}

#[test]
fn test_stacked_truncation_applies_before_fallback() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("V1"), attr("V2"), attr("V3")]),
    ];

    let dimensions = generate_dimensions(&buckets, ChartType::Bar);

    assert_eq!(ids(&dimensions), vec![vec![MEASURE_GROUP], vec!["V1", "V2"]]);
}

#[test]
fn test_line_uses_trend_and_segment() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::TREND, vec![attr("date")]),
        Bucket::new(names::SEGMENT, vec![attr("region")]),
    ];

    let dimensions = generate_dimensions(&buckets, ChartType::Line);

    assert_eq!(
        ids(&dimensions),
        vec![vec!["region"], vec!["date", MEASURE_GROUP]]
    );
}

// ============================================================================
// Other families
// ============================================================================

#[test]
fn test_round_without_attributes() {
    let buckets = vec![Bucket::new(names::MEASURES, vec![measure("A")])];

    let dimensions = round_dimensions(&buckets);

    assert_eq!(ids(&dimensions), vec![vec![], vec![MEASURE_GROUP]]);
}

#[test]
fn test_round_with_attribute() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("X")]),
    ];

    let dimensions = generate_dimensions(&buckets, ChartType::Pie);

    assert_eq!(ids(&dimensions), vec![vec![MEASURE_GROUP], vec!["X"]]);
}

#[test]
fn test_pointy_puts_attributes_first() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::SECONDARY_MEASURES, vec![measure("B")]),
        Bucket::new(names::ATTRIBUTE, vec![attr("X")]),
    ];

    assert_eq!(
        ids(&pointy_dimensions(&buckets)),
        vec![vec!["X"], vec![MEASURE_GROUP]]
    );
}

#[test]
fn test_matrix_truncates_each_axis() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("V1"), attr("V2")]),
        Bucket::new(names::STACK, vec![attr("S1"), attr("S2")]),
    ];

    assert_eq!(
        ids(&matrix_dimensions(&buckets)),
        vec![vec!["V1"], vec!["S1", MEASURE_GROUP]]
    );
}

#[test]
fn test_treemap_single_and_multiple_attributes() {
    let single = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("X")]),
    ];
    assert_eq!(
        ids(&treemap_dimensions(&single)),
        vec![vec![MEASURE_GROUP], vec!["X"]]
    );

    let multiple = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::VIEW, vec![attr("X")]),
        Bucket::new(names::SEGMENT, vec![attr("Y")]),
    ];
    assert_eq!(
        ids(&treemap_dimensions(&multiple)),
        vec![vec!["X", "Y"], vec![MEASURE_GROUP]]
    );
}

#[test]
fn test_table_carries_totals() {
    let totals = vec![Total::new(TotalType::Sum, "A", "X")];
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::ATTRIBUTE, vec![attr("X")]).with_totals(totals.clone()),
    ];

    let dimensions = table_dimensions(&buckets);

    assert_eq!(ids(&dimensions), vec![vec!["X"], vec![MEASURE_GROUP]]);
    assert_eq!(dimensions[0].totals, totals);
    assert!(dimensions[1].totals.is_empty());
}

#[test]
fn test_table_without_measures() {
    let buckets = vec![Bucket::new(names::ATTRIBUTE, vec![attr("X")])];

    assert_eq!(ids(&table_dimensions(&buckets)), vec![vec!["X"], vec![]]);
}

#[test]
fn test_pivot_table_columns() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::new(names::ATTRIBUTE, vec![attr("R")]),
        Bucket::new(names::COLUMNS, vec![attr("C")]),
    ];

    assert_eq!(
        ids(&pivot_table_dimensions(&buckets)),
        vec![vec!["R"], vec!["C", MEASURE_GROUP]]
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_every_family_is_idempotent_and_two_dimensional() {
    let buckets = vec![
        Bucket::new(names::MEASURES, vec![measure("A"), measure("B")]),
        Bucket::new(names::VIEW, vec![attr("X"), attr("Z")]),
        Bucket::new(names::STACK, vec![attr("Y")]),
    ];
    let families = [
        DimensionFamily::Default,
        DimensionFamily::Stacked(StackRoles::VIEW_STACK),
        DimensionFamily::Pointy,
        DimensionFamily::Round,
        DimensionFamily::Matrix,
        DimensionFamily::Bubble,
        DimensionFamily::Treemap,
        DimensionFamily::Table,
        DimensionFamily::PivotTable,
    ];

    for family in families {
        let first = family.assign(&buckets);
        let second = family.assign(&buckets);
        assert_eq!(first, second, "{family:?} is not idempotent");
        assert_eq!(first.len(), 2, "{family:?} must produce two dimensions");
    }
}

#[test]
fn test_missing_buckets_behave_like_empty() {
    let missing = vec![Bucket::new(names::MEASURES, vec![measure("A")])];
    let empty = vec![
        Bucket::new(names::MEASURES, vec![measure("A")]),
        Bucket::empty(names::VIEW),
        Bucket::empty(names::STACK),
    ];

    for chart_type in [ChartType::Column, ChartType::Heatmap, ChartType::Bubble] {
        assert_eq!(
            generate_dimensions(&missing, chart_type),
            generate_dimensions(&empty, chart_type)
        );
    }
}

#[test]
fn test_chart_input_end_to_end() {
    let input = ChartInput::new()
        .measures(vec![measure("A")])
        .view_by(vec![attr("X")])
        .stack_by(vec![attr("Y")]);

    let buckets = ChartType::Column.build_buckets(&input);

    assert_eq!(
        ids(&generate_dimensions(&buckets, ChartType::Column)),
        vec![vec!["Y"], vec!["X", MEASURE_GROUP]]
    );
}
