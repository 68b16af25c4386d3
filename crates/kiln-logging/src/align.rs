use crate::events::MetricDescriptor;

/// Pair a compacted per-iteration value array with the full metric
/// description list.
///
/// Learn value arrays never contain entries for metrics flagged
/// `skip_on_train`, but naming and main-metric detection must still come
/// from the full, unfiltered description list. Walk both lists in
/// lockstep: for each value, advance the description cursor past skipped
/// descriptors, then pair.
///
/// If `values` is shorter than the number of non-skipped descriptors the
/// walk stops at the shorter length without error; historical iterations
/// may have fewer recorded metrics than later ones.
pub fn align_metrics<'a>(
    descriptions: &'a [MetricDescriptor],
    values: &[f64],
) -> Vec<(&'a MetricDescriptor, f64)> {
    let mut pairs = Vec::with_capacity(values.len());
    let mut desc_idx = 0;
    for &value in values {
        while desc_idx < descriptions.len() && descriptions[desc_idx].skip_on_train {
            desc_idx += 1;
        }
        let Some(description) = descriptions.get(desc_idx) else {
            break;
        };
        pairs.push((description, value));
        desc_idx += 1;
    }
    pairs
}
