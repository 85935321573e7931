//! Filter converter: declarative filters to wire filters.
//!
//! A filter that carries no effective constraint converts to `None` and is
//! dropped from the enclosing list; it never reaches the request as `null`.
//!
//! - negative attribute filter with nothing excluded: dropped
//! - absolute/relative date filter missing `from` or `to`: dropped
//! - measure value filter without a condition: dropped
//! - everything else keeps its type and its display form / data set reference

use tracing::trace;

use crate::afm::AfmFilter;
use crate::model::Filter;

/// Convert one filter, or `None` when it constrains nothing.
pub fn convert_filter(filter: &Filter) -> Option<AfmFilter> {
    match filter {
        Filter::PositiveAttribute {
            display_form,
            elements,
        } => {
            let (in_elements, text_filter) = AfmFilter::elements(elements);
            Some(AfmFilter::PositiveAttributeFilter {
                display_form: display_form.clone(),
                in_elements,
                text_filter,
            })
        }
        Filter::NegativeAttribute {
            display_form,
            not_in,
        } => {
            if not_in.is_empty() {
                return None;
            }
            let (not_in, text_filter) = AfmFilter::elements(not_in);
            Some(AfmFilter::NegativeAttributeFilter {
                display_form: display_form.clone(),
                not_in,
                text_filter,
            })
        }
        Filter::AbsoluteDate { data_set, from, to } => match (from, to) {
            (Some(from), Some(to)) => Some(AfmFilter::AbsoluteDateFilter {
                data_set: data_set.clone(),
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        },
        Filter::RelativeDate {
            data_set,
            granularity,
            from,
            to,
        } => match (from, to) {
            (Some(from), Some(to)) => Some(AfmFilter::RelativeDateFilter {
                data_set: data_set.clone(),
                granularity: *granularity,
                from: *from,
                to: *to,
            }),
            _ => None,
        },
        Filter::MeasureValue { measure, condition } => {
            condition
                .as_ref()
                .map(|condition| AfmFilter::MeasureValueFilter {
                    measure: measure.clone(),
                    condition: condition.clone(),
                })
        }
    }
}

/// Convert a filter list, dropping filters without an effective constraint.
pub fn convert_filters(filters: &[Filter]) -> Vec<AfmFilter> {
    filters
        .iter()
        .filter_map(|filter| {
            let converted = convert_filter(filter);
            if converted.is_none() {
                trace!(?filter, "dropped filter without effective constraint");
            }
            converted
        })
        .collect()
}

/// Whether a filter survives conversion.
pub fn is_effective(filter: &Filter) -> bool {
    convert_filter(filter).is_some()
}
