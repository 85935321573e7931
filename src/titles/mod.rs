//! Measure title resolution.
//!
//! Derived and arithmetic measures without an explicit title get one
//! generated from the measures they depend on. Dependencies may be listed
//! after their dependents, so resolution runs to a fixed point:
//!
//! 1. seed the table with every plain measure and every measure that already
//!    has a title
//! 2. repeat full passes over the measures, resolving each computed measure
//!    whose dependencies are all in the table, until a pass adds nothing
//! 3. copy the resolved titles onto the measures
//!
//! Each productive pass adds at least one entry, so the loop runs at most
//! `measures + 1` passes. Measures with a missing dependency or caught in a
//! cycle never resolve and keep whatever title and alias they had.

mod translator;

pub use translator::{derivation_suffix_key, DefaultTranslator, Translator};

use std::collections::HashMap;

use tracing::trace;

use crate::model::{Measure, MeasureDefinition};

/// Default maximum length of a generated arithmetic title, in characters.
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 50;

/// Marker appended to truncated titles.
pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleOptions {
    /// Maximum length of generated arithmetic titles, ellipsis included
    pub max_length: usize,
    pub locale: String,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_TITLE_LENGTH,
            locale: "en-US".to_string(),
        }
    }
}

/// Resolved display label of one measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureTitle {
    pub local_identifier: String,
    pub title: Option<String>,
    pub alias: Option<String>,
}

impl MeasureTitle {
    fn of(measure: &Measure) -> Self {
        Self {
            local_identifier: measure.local_identifier.clone(),
            title: measure.title.clone(),
            alias: measure.alias.clone(),
        }
    }

    /// Alias if present, else title, else empty.
    fn label(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

/// Outcome of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleResolution {
    /// Entries in resolution order, unique by local identifier
    pub titles: Vec<MeasureTitle>,
    /// Number of full passes made over the measures
    pub passes: usize,
}

impl TitleResolution {
    pub fn get(&self, local_identifier: &str) -> Option<&MeasureTitle> {
        self.titles
            .iter()
            .find(|t| t.local_identifier == local_identifier)
    }
}

/// Insertion-ordered table keyed by local identifier.
#[derive(Default)]
struct ResolvedTable {
    entries: Vec<MeasureTitle>,
    index: HashMap<String, usize>,
}

impl ResolvedTable {
    fn contains(&self, local_identifier: &str) -> bool {
        self.index.contains_key(local_identifier)
    }

    fn get(&self, local_identifier: &str) -> Option<&MeasureTitle> {
        self.index.get(local_identifier).map(|&i| &self.entries[i])
    }

    /// First insert for a key wins.
    fn insert(&mut self, entry: MeasureTitle) {
        if self.contains(&entry.local_identifier) {
            return;
        }
        self.index
            .insert(entry.local_identifier.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

/// Generates titles for computed measures.
pub struct TitleResolver<'t, T: Translator + ?Sized> {
    translator: &'t T,
    options: TitleOptions,
}

impl<'t, T: Translator + ?Sized> TitleResolver<'t, T> {
    pub fn new(translator: &'t T, options: TitleOptions) -> Self {
        Self {
            translator,
            options,
        }
    }

    /// Resolve titles for `measures`, the full flattened measure list of a
    /// definition.
    pub fn resolve(&self, measures: &[Measure]) -> TitleResolution {
        let mut table = ResolvedTable::default();
        for measure in measures {
            let is_plain = matches!(measure.definition, MeasureDefinition::Simple { .. });
            if is_plain || measure.title.is_some() {
                table.insert(MeasureTitle::of(measure));
            }
        }

        let mut passes = 0;
        loop {
            passes += 1;
            let mut progressed = false;

            for measure in measures {
                if table.contains(&measure.local_identifier) {
                    continue;
                }
                if let Some(title) = self.compute_title(measure, &table) {
                    trace!(
                        measure = %measure.local_identifier,
                        %title,
                        pass = passes,
                        "resolved measure title"
                    );
                    table.insert(MeasureTitle {
                        local_identifier: measure.local_identifier.clone(),
                        title: Some(title),
                        alias: measure.alias.clone(),
                    });
                    progressed = true;
                }
            }

            if !progressed {
                break;
            }
        }

        TitleResolution {
            titles: table.entries,
            passes,
        }
    }

    /// Resolve and apply in one go.
    pub fn fill_missing_titles(&self, measures: &[Measure]) -> Vec<Measure> {
        apply_titles(measures, &self.resolve(measures))
    }

    fn compute_title(&self, measure: &Measure, table: &ResolvedTable) -> Option<String> {
        match &measure.definition {
            MeasureDefinition::Simple { .. } => None,
            MeasureDefinition::Arithmetic { operator, operands } => {
                let labels = operands
                    .iter()
                    .map(|id| table.get(id).map(MeasureTitle::label))
                    .collect::<Option<Vec<_>>>()?;
                let operator_label = self
                    .translator
                    .translate(operator.label_key(), &self.options.locale);
                let title = format!("{} of {}", operator_label, labels.join(" and "));
                Some(truncate_title(&title, self.options.max_length))
            }
            MeasureDefinition::Derived { master, derivation } => {
                let master = table.get(master)?;
                let suffix = self.translator.translate(
                    derivation_suffix_key(derivation.kind()),
                    &self.options.locale,
                );
                Some(format!("{} - {}", master.label(), suffix))
            }
        }
    }
}

/// Resolve titles with the built-in English strings.
pub fn resolve_titles(measures: &[Measure], options: TitleOptions) -> TitleResolution {
    TitleResolver::new(&DefaultTranslator, options).resolve(measures)
}

/// Copy resolved titles onto a copy of `measures`.
///
/// Measures without an entry are returned unchanged.
pub fn apply_titles(measures: &[Measure], resolution: &TitleResolution) -> Vec<Measure> {
    measures
        .iter()
        .map(|measure| match resolution.get(&measure.local_identifier) {
            Some(entry) => Measure {
                title: entry.title.clone(),
                alias: entry.alias.clone(),
                ..measure.clone()
            },
            None => measure.clone(),
        })
        .collect()
}

/// Cut `title` to at most `max_length` characters, ending a cut title with
/// [`ELLIPSIS`].
pub fn truncate_title(title: &str, max_length: usize) -> String {
    if title.chars().count() <= max_length {
        return title.to_string();
    }
    if max_length == 0 {
        return String::new();
    }
    let mut truncated: String = title.chars().take(max_length - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}
