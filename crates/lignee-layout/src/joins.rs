use crate::graph::FamilyGraph;

impl FamilyGraph {
    /// Counts, bottom-up, the lineage merges each person is responsible for.
    ///
    /// A person inherits the sum of their children's joins, plus one join per parent beyond the
    /// first.
    pub fn count_joins(&mut self) {
        for band in (0..self.generations.len()).rev() {
            for i in 0..self.generations[band].len() {
                let id = self.generations[band][i];
                let inherited: u32 = self[id].children.iter().map(|&c| self[c].joins).sum();
                let merges = self[id].parents.len().saturating_sub(1) as u32;
                self[id].joins += inherited + merges;
            }
        }
    }
}
