use crate::dataset::{Dataset, TransferRecord};
use crate::state::{Selection, StatusFilter, TypeFilter};

/// Records of `league` that pass both filters, in source order.
pub fn filter_transfers<'a>(
    dataset: &'a Dataset,
    league: &str,
    status: StatusFilter,
    kind: TypeFilter,
) -> Vec<&'a TransferRecord> {
    dataset
        .records(league)
        .iter()
        .filter(|t| status.matches(t) && kind.matches(t))
        .collect()
}

pub fn filter_for_selection<'a>(
    dataset: &'a Dataset,
    selection: &Selection,
) -> Vec<&'a TransferRecord> {
    filter_transfers(dataset, &selection.league, selection.status, selection.kind)
}
