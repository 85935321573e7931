//! Tests for generated titles of derived and arithmetic measures.

use vizexec::model::{ArithmeticOperator, Derivation, Measure, ObjRef, PreviousPeriodDataSet};
use vizexec::titles::{
    apply_titles, resolve_titles, TitleOptions, TitleResolution, TitleResolver, ELLIPSIS,
};

fn simple(id: &str, title: &str) -> Measure {
    Measure::simple(id, ObjRef::identifier(format!("fact.{id}"))).with_title(title)
}

fn pop(id: &str, master: &str) -> Measure {
    Measure::derived(
        id,
        master,
        Derivation::SamePeriodPreviousYear {
            pop_attribute: ObjRef::identifier("date.year"),
        },
    )
}

fn previous_period(id: &str, master: &str) -> Measure {
    Measure::derived(
        id,
        master,
        Derivation::PreviousPeriod {
            date_data_sets: vec![PreviousPeriodDataSet {
                data_set: ObjRef::identifier("date"),
                periods_ago: 1,
            }],
        },
    )
}

fn title<'a>(resolution: &'a TitleResolution, id: &str) -> Option<&'a str> {
    resolution.get(id).and_then(|t| t.title.as_deref())
}

// ============================================================================
// Arithmetic titles
// ============================================================================

#[test]
fn test_arithmetic_title_keeps_operand_order() {
    let measures = vec![
        simple("m1", "Sales"),
        simple("m2", "Costs"),
        Measure::arithmetic("a1", ArithmeticOperator::Difference, ["m2", "m1"]),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(title(&resolution, "a1"), Some("Difference of Costs and Sales"));
}

#[test]
fn test_operand_alias_wins_over_title() {
    let measures = vec![
        simple("m1", "Sales").with_alias("S"),
        simple("m2", "Costs"),
        Measure::arithmetic("a1", ArithmeticOperator::Sum, ["m1", "m2"]),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(title(&resolution, "a1"), Some("Sum of S and Costs"));
}

#[test]
fn test_untitled_operand_renders_empty() {
    let measures = vec![
        Measure::simple("m1", ObjRef::identifier("fact.m1")),
        simple("m2", "Costs"),
        Measure::arithmetic("a1", ArithmeticOperator::Ratio, ["m1", "m2"]),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(title(&resolution, "a1"), Some("Ratio of  and Costs"));
}

#[test]
fn test_explicit_title_is_kept() {
    let measures = vec![
        simple("m1", "Sales"),
        simple("m2", "Costs"),
        Measure::arithmetic("a1", ArithmeticOperator::Sum, ["m1", "m2"]).with_title("Total"),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(title(&resolution, "a1"), Some("Total"));
    assert_eq!(resolution.passes, 1);
}

#[test]
fn test_truncation_never_exceeds_max_length() {
    let measures = vec![
        simple("m1", "Gross revenue from all sales channels"),
        simple("m2", "Cost of goods sold including freight"),
        Measure::arithmetic("a1", ArithmeticOperator::Multiplication, ["m1", "m2"]),
    ];

    for max_length in [1, 10, 25, 50] {
        let options = TitleOptions {
            max_length,
            ..Default::default()
        };
        let resolution = resolve_titles(&measures, options);
        let generated = title(&resolution, "a1").unwrap();
        assert!(generated.chars().count() <= max_length);
        assert!(generated.ends_with(ELLIPSIS));
    }
}

#[test]
fn test_derived_titles_are_not_truncated() {
    let long = "A very long measure title that goes well past fifty characters";
    let measures = vec![simple("m1", long), pop("d1", "m1")];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(
        title(&resolution, "d1").map(str::to_string),
        Some(format!("{long} - SP year ago"))
    );
}

// ============================================================================
// Resolution order and failure
// ============================================================================

#[test]
fn test_forward_references_resolve() {
    let measures = vec![
        pop("d1", "a1"),
        Measure::arithmetic("a1", ArithmeticOperator::Difference, ["m1", "m2"]),
        simple("m1", "Sales"),
        simple("m2", "Costs"),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(
        title(&resolution, "d1"),
        Some("Difference of Sales and Costs - SP year ago")
    );
    assert!(resolution.passes <= measures.len() + 1);

    let rendered = measures
        .iter()
        .map(|m| format!("{}: {}", m.local_identifier, title(&resolution, &m.local_identifier).unwrap_or("-")))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    d1: Difference of Sales and Costs - SP year ago
    a1: Difference of Sales and Costs
    m1: Sales
    m2: Costs
    ");
}

#[test]
fn test_missing_dependency_leaves_title_unset() {
    let measures = vec![
        simple("m1", "Sales"),
        Measure::arithmetic("a1", ArithmeticOperator::Sum, ["m1", "ghost"]),
        previous_period("d1", "ghost"),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert!(resolution.get("a1").is_none());
    assert!(resolution.get("d1").is_none());

    let applied = apply_titles(&measures, &resolution);
    assert_eq!(applied[1].title, None);
    assert_eq!(applied[2].title, None);
}

#[test]
fn test_cycle_terminates_unresolved() {
    let measures = vec![
        simple("m1", "Sales"),
        Measure::arithmetic("x", ArithmeticOperator::Sum, ["m1", "y"]),
        Measure::arithmetic("y", ArithmeticOperator::Sum, ["m1", "x"]),
        pop("d1", "x"),
    ];

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert!(resolution.get("x").is_none());
    assert!(resolution.get("y").is_none());
    assert!(resolution.get("d1").is_none());
    assert!(resolution.passes <= measures.len() + 1);
}

#[test]
fn test_long_chain_pass_bound() {
    // each measure depends on the next one, listed in reverse dependency order
    let mut measures: Vec<Measure> = (0..6)
        .map(|i| pop(&format!("d{i}"), &format!("d{}", i + 1)))
        .collect();
    measures.push(simple("d6", "Base"));

    let resolution = resolve_titles(&measures, TitleOptions::default());

    assert_eq!(
        title(&resolution, "d0"),
        Some("Base - SP year ago - SP year ago - SP year ago - SP year ago - SP year ago - SP year ago")
    );
    assert!(resolution.passes <= measures.len() + 1);
}

// ============================================================================
// Translator and application
// ============================================================================

#[test]
fn test_custom_translator() {
    let translate = |key: &str, locale: &str| -> String {
        match (key, locale) {
            ("visualizations.measure.previous_period.title", "cs-CZ") => "předchozí období".to_string(),
            ("visualizations.measure.arithmetic.sum", "cs-CZ") => "Součet".to_string(),
            _ => key.to_string(),
        }
    };
    let options = TitleOptions {
        locale: "cs-CZ".to_string(),
        ..Default::default()
    };
    let measures = vec![
        simple("m1", "Tržby"),
        simple("m2", "Náklady"),
        previous_period("d1", "m1"),
        Measure::arithmetic("a1", ArithmeticOperator::Sum, ["m1", "m2"]),
    ];

    let resolution = TitleResolver::new(&translate, options).resolve(&measures);

    assert_eq!(title(&resolution, "d1"), Some("Tržby - předchozí období"));
    assert_eq!(title(&resolution, "a1"), Some("Součet of Tržby and Náklady"));
}

#[test]
fn test_fill_missing_titles_keeps_alias() {
    let measures = vec![simple("m1", "Sales"), pop("d1", "m1").with_alias("LY")];

    let filled = TitleResolver::new(&vizexec::titles::DefaultTranslator, TitleOptions::default())
        .fill_missing_titles(&measures);

    assert_eq!(filled[1].title.as_deref(), Some("Sales - SP year ago"));
    assert_eq!(filled[1].alias.as_deref(), Some("LY"));
    assert_eq!(filled[0], measures[0]);
}
