use tracing::{debug, info, warn};

use crate::input::InputError;
use crate::input::samples::SampleReader;
use crate::model::structures::StructureIndex;

/// Records, per requested structure, the sample positions whose acronym
/// matches exactly. Absent structures keep an empty list.
pub fn run_stage1(
    samples: &mut SampleReader,
    structures: &[String],
) -> Result<StructureIndex, InputError> {
    let mut index = StructureIndex::with_structures(structures);
    if index.is_empty() {
        return Ok(index);
    }

    let mut n_samples = 0usize;
    while let Some(sample) = samples.next_sample()? {
        n_samples += 1;
        if index.record(&sample.structure_acronym, sample.position) {
            debug!(
                position = sample.position,
                acronym = %sample.structure_acronym,
                name = %sample.structure_name,
                "matched sample"
            );
        }
    }

    for (structure, positions) in index.iter() {
        if positions.is_empty() {
            warn!(structure, n_samples, "structure not found in sample annotation");
        } else {
            info!(structure, samples = positions.len(), "indexed structure");
        }
    }

    Ok(index)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_index.rs"]
mod tests;
