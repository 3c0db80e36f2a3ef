//! Arena-backed person graph.
//!
//! People live in one `Vec` and refer to each other by [`PersonId`]. Generations ("bands") are
//! ordered lists of ids; their order is the left-to-right order once layout is done.

use crate::position::{Position, cmp_padded};
use indexmap::IndexMap;
use serde::Serialize;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(usize);

impl PersonId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub generation: usize,
    pub children: Vec<PersonId>,
    pub parents: Vec<PersonId>,
    /// `None` until the position assigner reaches this person.
    pub position: Option<Position>,
    pub joins: u32,
    pub color: Option<String>,
    pub title: Option<String>,
    /// Synthetic spacer child of a childless person; never labelled.
    pub invisible: bool,
}

impl Person {
    pub fn new(name: impl Into<String>, generation: usize, title: Option<String>) -> Self {
        Self {
            name: name.into(),
            generation,
            children: Vec::new(),
            parents: Vec::new(),
            position: None,
            joins: 0,
            color: None,
            title,
            invisible: false,
        }
    }

    pub(crate) fn spacer_for(parent: &str, generation: usize) -> Self {
        Self {
            invisible: true,
            ..Self::new(format!("inv_{parent}"), generation, None)
        }
    }

    /// Position components, empty while unassigned.
    pub fn position_slice(&self) -> &[i64] {
        self.position.as_ref().map(Position::as_slice).unwrap_or(&[])
    }

    pub fn tree_id(&self) -> Option<i64> {
        self.position.as_ref().map(Position::tree_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    pub(crate) people: Vec<Person>,
    pub(crate) generations: Vec<Vec<PersonId>>,
    pub(crate) named_generations: usize,
}

impl FamilyGraph {
    pub(crate) fn add(&mut self, person: Person) -> PersonId {
        let id = PersonId(self.people.len());
        let generation = person.generation;
        self.people.push(person);
        if let Some(band) = self.generations.get_mut(generation) {
            band.push(id);
        }
        id
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn people(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people.iter().enumerate().map(|(i, p)| (PersonId(i), p))
    }

    /// All bands, including the trailing band holding spacer children of the last generation.
    pub fn generations(&self) -> &[Vec<PersonId>] {
        &self.generations
    }

    pub fn generation(&self, index: usize) -> &[PersonId] {
        self.generations.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of generations present in the input (bands that get a label).
    pub fn named_generation_count(&self) -> usize {
        self.named_generations
    }

    /// Looks up a visible person by name within a generation.
    pub fn find(&self, generation: usize, name: &str) -> Option<PersonId> {
        self.generation(generation)
            .iter()
            .copied()
            .find(|&id| !self[id].invisible && self[id].name == name)
    }

    /// Identifier used in the graph description: `{name}_{generation}`.
    pub fn node_id(&self, id: PersonId) -> String {
        let p = &self[id];
        format!("{}_{}", p.name, p.generation)
    }

    /// People per tree id, keyed in order of first appearance (band by band).
    pub fn tree_sizes(&self) -> IndexMap<i64, usize> {
        let mut sizes: IndexMap<i64, usize> = IndexMap::new();
        for band in &self.generations {
            for &id in band {
                if let Some(tree) = self[id].tree_id() {
                    *sizes.entry(tree).or_insert(0) += 1;
                }
            }
        }
        sizes
    }

    /// Stable sort of one band by position, unassigned people reading as all zeros.
    pub(crate) fn sort_generation(&mut self, index: usize) {
        let Self {
            people,
            generations,
            ..
        } = self;
        if let Some(band) = generations.get_mut(index) {
            band.sort_by(|&a, &b| {
                cmp_padded(people[a.0].position_slice(), people[b.0].position_slice())
            });
        }
    }
}

impl Index<PersonId> for FamilyGraph {
    type Output = Person;

    fn index(&self, id: PersonId) -> &Person {
        &self.people[id.0]
    }
}

impl IndexMut<PersonId> for FamilyGraph {
    fn index_mut(&mut self, id: PersonId) -> &mut Person {
        &mut self.people[id.0]
    }
}

/// Serializable per-person layout record for hosts that overlay their own UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSummary {
    pub id: String,
    pub name: String,
    pub generation: usize,
    pub order: usize,
    pub position: Vec<i64>,
    pub joins: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub invisible: bool,
    pub parents: Vec<String>,
    pub children: Vec<String>,
}

/// One connected lineage, band by band, in final order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineage {
    pub tree_id: i64,
    pub generations: Vec<Vec<PersonId>>,
}

impl Lineage {
    pub fn len(&self) -> usize {
        self.generations.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FamilyGraph {
    pub fn summary(&self) -> Vec<PersonSummary> {
        let mut out = Vec::with_capacity(self.people.len());
        for band in &self.generations {
            for (order, &id) in band.iter().enumerate() {
                let p = &self[id];
                out.push(PersonSummary {
                    id: self.node_id(id),
                    name: p.name.clone(),
                    generation: p.generation,
                    order,
                    position: p.position_slice().to_vec(),
                    joins: p.joins,
                    color: p.color.clone(),
                    title: p.title.clone(),
                    invisible: p.invisible,
                    parents: p.parents.iter().map(|&q| self.node_id(q)).collect(),
                    children: p.children.iter().map(|&c| self.node_id(c)).collect(),
                });
            }
        }
        out
    }

    /// Splits the laid-out graph per tree id (ascending, so the biggest lineage comes first).
    pub fn lineages(&self) -> Vec<Lineage> {
        let mut tree_ids: Vec<i64> = self.tree_sizes().keys().copied().collect();
        tree_ids.sort_unstable();

        tree_ids
            .into_iter()
            .map(|tree_id| Lineage {
                tree_id,
                generations: self
                    .generations
                    .iter()
                    .map(|band| {
                        band.iter()
                            .copied()
                            .filter(|&id| self[id].tree_id() == Some(tree_id))
                            .collect()
                    })
                    .collect(),
            })
            .collect()
    }
}
