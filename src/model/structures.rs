/// Sample column positions per structure, in the configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureIndex {
    entries: Vec<(String, Vec<usize>)>,
}

impl StructureIndex {
    /// Builds an index with an empty position list per name. Repeated names
    /// collapse onto their first occurrence.
    pub fn with_structures(names: &[String]) -> Self {
        let mut entries: Vec<(String, Vec<usize>)> = Vec::with_capacity(names.len());
        for name in names {
            if entries.iter().any(|(n, _)| n == name) {
                continue;
            }
            entries.push((name.clone(), Vec::new()));
        }
        Self { entries }
    }

    pub fn record(&mut self, acronym: &str, position: usize) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == acronym) {
            Some((_, positions)) => {
                positions.push(position);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn positions(&self, structure: &str) -> Option<&[usize]> {
        self.entries
            .iter()
            .find(|(n, _)| n == structure)
            .map(|(_, p)| p.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries
            .iter()
            .map(|(n, p)| (n.as_str(), p.as_slice()))
    }

    /// One group per structure, taken from `values` at the recorded positions.
    /// Returns the first out-of-range position on failure.
    pub fn gather(&self, values: &[f64]) -> Result<Vec<Vec<f64>>, usize> {
        let mut groups = Vec::with_capacity(self.entries.len());
        for (_, positions) in &self.entries {
            let mut group = Vec::with_capacity(positions.len());
            for &pos in positions {
                match values.get(pos) {
                    Some(v) => group.push(*v),
                    None => return Err(pos),
                }
            }
            groups.push(group);
        }
        Ok(groups)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/structures.rs"]
mod tests;
