//! Turns the authoritative generation maps into a linked [`FamilyGraph`].

use crate::graph::{FamilyGraph, Person, PersonId};
use lignee_core::Generation;
use rustc_hash::FxHashSet as HashSet;

impl FamilyGraph {
    /// Builds the person graph for a validated tree.
    ///
    /// Every visible person without declared children gets one invisible spacer child in the
    /// next band. Spacers themselves stay childless. Spacers of the last generation go to an
    /// extra trailing band, which is why [`FamilyGraph::generations`] can be one longer than
    /// the input.
    ///
    /// Child names missing from the next generation are silently dropped: rejecting them is
    /// [`lignee_core::validate`]'s job.
    pub fn build(tree: &[Generation]) -> Self {
        let mut graph = Self {
            people: Vec::new(),
            generations: vec![Vec::new(); tree.len()],
            named_generations: tree.len(),
        };

        for (g, generation) in tree.iter().enumerate() {
            for (name, data) in generation {
                graph.add(Person::new(name.clone(), g, data.title().map(str::to_owned)));
            }
        }

        if graph.generations.last().is_some_and(|band| !band.is_empty()) {
            graph.generations.push(Vec::new());
        }

        let mut spacers = 0usize;
        for (g, generation) in tree.iter().enumerate() {
            let members: Vec<PersonId> = graph.generations[g].clone();
            for id in members {
                if graph[id].invisible {
                    continue;
                }
                let declared = generation
                    .get(graph[id].name.as_str())
                    .map(|data| data.children.as_slice())
                    .unwrap_or(&[]);

                let children = if declared.is_empty() {
                    let spacer = Person::spacer_for(&graph[id].name, g + 1);
                    spacers += 1;
                    vec![graph.add(spacer)]
                } else {
                    let wanted: HashSet<&str> = declared.iter().map(String::as_str).collect();
                    graph
                        .generation(g + 1)
                        .iter()
                        .copied()
                        .filter(|&c| !graph[c].invisible && wanted.contains(graph[c].name.as_str()))
                        .collect()
                };
                graph[id].children = children;
            }
        }

        if graph.generations.last().is_some_and(Vec::is_empty) {
            graph.generations.pop();
        }

        graph.link_parents();

        tracing::debug!(
            generations = graph.named_generations,
            bands = graph.generations.len(),
            people = graph.people.len(),
            spacers,
            "built family graph"
        );
        graph
    }

    /// Derives `parents` from `children`, parents listed in their band order.
    fn link_parents(&mut self) {
        for band in 0..self.generations.len() {
            for i in 0..self.generations[band].len() {
                let parent = self.generations[band][i];
                let children = self[parent].children.clone();
                for child in children {
                    self[child].parents.push(parent);
                }
            }
        }
    }
}
