//! Locale lookup used for generated title fragments.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::DerivationKind;

/// Translation key of the suffix appended to a derived measure's title.
pub fn derivation_suffix_key(kind: DerivationKind) -> &'static str {
    match kind {
        DerivationKind::SamePeriodPreviousYear => "visualizations.measure.pop.title",
        DerivationKind::PreviousPeriod => "visualizations.measure.previous_period.title",
    }
}

/// Locale lookup collaborator.
///
/// Any `Fn(&str, &str) -> String` closure taking `(key, locale)` implements
/// this trait.
pub trait Translator {
    fn translate(&self, key: &str, locale: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> String,
{
    fn translate(&self, key: &str, locale: &str) -> String {
        self(key, locale)
    }
}

static EN_US: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("visualizations.measure.arithmetic.sum", "Sum"),
        ("visualizations.measure.arithmetic.difference", "Difference"),
        ("visualizations.measure.arithmetic.multiplication", "Product"),
        ("visualizations.measure.arithmetic.ratio", "Ratio"),
        ("visualizations.measure.arithmetic.change", "Change"),
        ("visualizations.measure.pop.title", "SP year ago"),
        ("visualizations.measure.previous_period.title", "period ago"),
    ])
});

/// Built-in English strings. Every locale resolves to English; unknown keys
/// resolve to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, key: &str, _locale: &str) -> String {
        EN_US.get(key).copied().unwrap_or(key).to_string()
    }
}
