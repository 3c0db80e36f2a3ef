use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a generation: the names of this person's children in the next generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonData {
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PersonData {
    pub fn new<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            children: children.into_iter().map(Into::into).collect(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The title, with an empty string treated as "no title".
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Person name -> data, in insertion order. The key order is the initial horizontal order.
pub type Generation = IndexMap<String, PersonData>;

/// The authoritative tree as owned by the editing layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyData {
    pub first_year: i64,
    pub children_tree: Vec<Generation>,
}

impl FamilyData {
    pub fn new(first_year: i64, children_tree: Vec<Generation>) -> Self {
        Self {
            first_year,
            children_tree,
        }
    }

    /// Decodes and validates a family data document.
    ///
    /// The document is checked structurally before being decoded so that a malformed entry is
    /// reported with the person and generation it belongs to rather than a serde position.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(Error::MissingProperty {
                property: "children_tree",
            });
        };

        let tree = root.remove("children_tree").ok_or(Error::MissingProperty {
            property: "children_tree",
        })?;
        let first_year = match root.remove("first_year") {
            None | Some(Value::Null) => {
                return Err(Error::MissingProperty {
                    property: "first_year",
                });
            }
            Some(v) => integer(&v)?,
        };

        check_shape(&tree)?;
        let children_tree: Vec<Generation> = serde_json::from_value(tree)?;
        validate(&children_tree)?;

        tracing::debug!(
            generations = children_tree.len(),
            people = children_tree.iter().map(|g| g.len()).sum::<usize>(),
            "loaded family data"
        );

        Ok(Self {
            first_year,
            children_tree,
        })
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate(&self.children_tree)
    }

    pub fn person_count(&self) -> usize {
        self.children_tree.iter().map(|g| g.len()).sum()
    }
}

/// Accepts integral JSON numbers, including `2020.0`, that fit in an `i64`.
fn integer(v: &Value) -> Result<i64> {
    if let Some(i) = v.as_i64() {
        return Ok(i);
    }
    let f = v.as_f64().ok_or(Error::FirstYearNotInteger)?;
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(Error::FirstYearNotInteger);
    }
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(Error::FirstYearOutOfRange {
            value: v.to_string(),
        });
    }
    Ok(f as i64)
}

fn check_shape(tree: &Value) -> Result<()> {
    let Value::Array(generations) = tree else {
        return Err(Error::TreeNotList);
    };

    for (idx, generation) in generations.iter().enumerate() {
        let generation_no = idx + 1;
        let Value::Object(people) = generation else {
            return Err(Error::GenerationNotObject {
                generation: generation_no,
            });
        };

        for (person, data) in people {
            let Value::Object(fields) = data else {
                return Err(Error::PersonNotObject {
                    person: person.clone(),
                    generation: generation_no,
                });
            };
            let children = fields.get("children").ok_or_else(|| Error::MissingChildren {
                person: person.clone(),
                generation: generation_no,
            })?;
            let Value::Array(children) = children else {
                return Err(Error::ChildrenNotList {
                    person: person.clone(),
                    generation: generation_no,
                });
            };
            if let Some(entry) = children.iter().find(|c| !c.is_string()) {
                return Err(Error::ChildNotString {
                    entry: entry.to_string(),
                    person: person.clone(),
                    generation: generation_no,
                });
            }
            if fields.get("title").is_some_and(|t| !t.is_string() && !t.is_null()) {
                return Err(Error::TitleNotString {
                    person: person.clone(),
                    generation: generation_no,
                });
            }
        }
    }
    Ok(())
}

/// Checks that every declared child is a key of the next generation.
///
/// The layout engine relies on this and does not re-check it.
pub fn validate(generations: &[Generation]) -> Result<()> {
    for (idx, generation) in generations.iter().enumerate() {
        let next = generations.get(idx + 1);
        for (person, data) in generation {
            let Some(next) = next else {
                if !data.children.is_empty() {
                    return Err(Error::ChildrenInLastGeneration {
                        person: person.clone(),
                        generation: idx + 1,
                    });
                }
                continue;
            };
            if let Some(child) = data.children.iter().find(|c| !next.contains_key(c.as_str())) {
                return Err(Error::UnknownChild {
                    child: child.clone(),
                    person: person.clone(),
                    generation: idx + 1,
                });
            }
        }
    }
    Ok(())
}
