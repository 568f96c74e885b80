//! Hash table animations

use std::fmt::{Debug, Display};

use dsv_core::HashTable;

use crate::animated::Animated;
use crate::error::OperationError;
use crate::phase::{Highlight, PhasePlan, PhaseStep, StructureFamily};
use crate::snippets::SnippetId;

#[derive(Debug, Clone, PartialEq)]
pub enum HashTableOp<V> {
    Set { key: String, value: V },
    Get(String),
    Delete(String),
    Has(String),
}

impl<V> HashTableOp<V> {
    pub fn name(&self) -> &'static str {
        match self {
            HashTableOp::Set { .. } => "set",
            HashTableOp::Get(_) => "get",
            HashTableOp::Delete(_) => "delete",
            HashTableOp::Has(_) => "has",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            HashTableOp::Set { key, .. }
            | HashTableOp::Get(key)
            | HashTableOp::Delete(key)
            | HashTableOp::Has(key) => key,
        }
    }
}

impl<V> Animated for HashTable<V>
where
    V: Clone + Debug + Display + Send + Sync + 'static,
{
    type Op = HashTableOp<V>;
    /// `set`: whether a new entry was appended; `delete`: whether the key existed
    type Output = bool;

    const FAMILY: StructureFamily = StructureFamily::HashTable;

    fn check(&self, op: &HashTableOp<V>) -> Result<(), OperationError> {
        match op {
            HashTableOp::Delete(key) if !self.has(key) => {
                Err(OperationError::KeyNotFound(key.clone()))
            }
            _ => Ok(()),
        }
    }

    fn plan(&self, op: &HashTableOp<V>) -> PhasePlan {
        let snippet = SnippetId::new(Self::FAMILY, op.name());
        let key = op.key();
        let bucket = self.hash(key);
        let location = self.locate(key);
        let prepare = PhaseStep::new(format!(
            "hash(\"{}\") = sum of character codes mod {} = bucket {}",
            key,
            self.capacity(),
            bucket
        ))
        .with_highlight(Highlight::Bucket(bucket));

        match (op, location) {
            (HashTableOp::Set { value, .. }, Some((bucket, index))) => PhasePlan::mutating(
                snippet,
                prepare,
                PhaseStep::new(format!(
                    "\"{}\" already in bucket {}: value updated to {}",
                    key, bucket, value
                ))
                .with_highlight(Highlight::Entry { bucket, index }),
                PhaseStep::new(format!("\"{}\" updated successfully", key))
                    .with_highlight(Highlight::Entry { bucket, index }),
            ),
            (HashTableOp::Set { value, .. }, None) => {
                let index = self.buckets()[bucket].len();
                let collision = if index > 0 {
                    format!(" after {} colliding entries", index)
                } else {
                    String::new()
                };
                PhasePlan::mutating(
                    snippet,
                    prepare,
                    PhaseStep::new(format!(
                        "Appended \"{}\" = {} to bucket {}{}",
                        key, value, bucket, collision
                    ))
                    .with_highlight(Highlight::Entry { bucket, index }),
                    PhaseStep::new(format!("\"{}\" inserted successfully", key))
                        .with_highlight(Highlight::Entry { bucket, index }),
                )
            }
            (HashTableOp::Get(_), Some((bucket, index))) => {
                let value = self
                    .get(key)
                    .map(|value| value.to_string())
                    .unwrap_or_default();
                PhasePlan::new(
                    snippet,
                    prepare,
                    PhaseStep::new(format!("Found \"{}\" = {}", key, value))
                        .with_highlight(Highlight::Entry { bucket, index }),
                )
            }
            (HashTableOp::Has(_), Some((bucket, index))) => PhasePlan::new(
                snippet,
                prepare,
                PhaseStep::new(format!("\"{}\" is present", key))
                    .with_highlight(Highlight::Entry { bucket, index }),
            ),
            (HashTableOp::Get(_) | HashTableOp::Has(_) | HashTableOp::Delete(_), None) => {
                PhasePlan::new(
                    snippet,
                    prepare,
                    PhaseStep::new(format!("\"{}\" not found in bucket {}", key, bucket))
                        .with_highlight(Highlight::Bucket(bucket)),
                )
            }
            (HashTableOp::Delete(_), Some((bucket, index))) => PhasePlan::mutating(
                snippet,
                prepare.with_highlight(Highlight::Entry { bucket, index }),
                PhaseStep::new(format!("Removed \"{}\" from bucket {}", key, bucket))
                    .with_highlight(Highlight::Bucket(bucket)),
                PhaseStep::new(format!("\"{}\" deleted successfully", key)),
            ),
        }
    }

    fn apply(&mut self, op: &HashTableOp<V>) -> bool {
        match op {
            HashTableOp::Set { key, value } => self.set(key.clone(), value.clone()),
            HashTableOp::Delete(key) => self.delete(key),
            HashTableOp::Get(_) | HashTableOp::Has(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Sequencer;
    use crate::phase::Phase;

    fn set(key: &str, value: i64) -> HashTableOp<i64> {
        HashTableOp::Set {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn test_collision_is_described() {
        let mut table = HashTable::with_capacity(10);
        table.set("age", 30);

        let plan = table.plan(&set("gae", 99));
        assert_eq!(plan.prepare.highlight, Some(Highlight::Bucket(1)));
        let mutate = plan.mutate.unwrap();
        assert_eq!(mutate.highlight, Some(Highlight::Entry { bucket: 1, index: 1 }));
        assert!(mutate.description.ends_with("after 1 colliding entries"));
    }

    #[test]
    fn test_update_plan_targets_existing_entry() {
        let mut table = HashTable::with_capacity(10);
        table.set("age", 30);
        let plan = table.plan(&set("age", 31));
        assert_eq!(plan.confirm.description, "\"age\" updated successfully");
        assert_eq!(plan.confirm.highlight, Some(Highlight::Entry { bucket: 1, index: 0 }));
    }

    #[test]
    fn test_lookups_are_read_only() {
        let mut table = HashTable::with_capacity(10);
        table.set("age", 30);

        let found = table.plan(&HashTableOp::Get("age".to_string()));
        assert!(found.is_read_only());
        assert_eq!(found.confirm.description, "Found \"age\" = 30");

        let missing = table.plan(&HashTableOp::Has("gae".to_string()));
        assert!(missing.is_read_only());
        assert_eq!(missing.confirm.description, "\"gae\" not found in bucket 1");
    }

    #[test]
    fn test_delete_missing_fails_check() {
        let table: HashTable<i64> = HashTable::default();
        assert_eq!(
            table.check(&HashTableOp::Delete("nope".to_string())),
            Err(OperationError::KeyNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_animated_set_then_delete() {
        let sequencer = Sequencer::new(HashTable::with_capacity(10));

        sequencer.invoke(set("age", 30));
        sequencer.invoke(set("gae", 99));
        sequencer.run_to_idle();
        // The first set was superseded before its mutation
        assert!(!sequencer.structure().read().has("age"));
        assert_eq!(sequencer.structure().read().get("gae"), Some(&99));

        sequencer.try_invoke(HashTableOp::Delete("gae".to_string())).unwrap();
        sequencer.advance(sequencer.config().prepare_delay());
        assert_eq!(sequencer.phase(), Phase::Mutate);
        assert!(!sequencer.structure().read().has("gae"));
        assert_eq!(sequencer.last_output(), Some(true));
    }
}
