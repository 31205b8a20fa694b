/*!
Incremental multi-dimensional filtering for survey dashboards.

A [DatasetIndex] owns one or more collections of [Record]s. Each collection can
be sliced along named dimensions, filtered with exact-match predicates and
summarized with count groups. Groups are kept up to date as filters change:
only the records that cross a filter boundary are touched.

```
use survey_filter::{DatasetIndex, Filter, Record, Value};

let records: Vec<Record> = ["August", "August", "September"]
    .iter()
    .map(|round| Record::new().with("Round", *round))
    .collect();

let mut index = DatasetIndex::new();
let coll = index.create_collection(records)?;
let rounds = index.field_dimension(coll, "Round")?;
let per_round = index.group(rounds)?;

index.set_filter(rounds, Filter::Exact(Value::from("August")))?;
assert_eq!(index.visible_count(coll)?, 2);
assert_eq!(index.group_total(per_round)?, 2);
# Ok::<(), survey_filter::IndexError>(())
```
*/

mod config;
pub mod builder;
pub mod coordinator;
pub mod manual;

use log::{debug, info, log_enabled, Level};

pub use crate::config::*;

/// The maximum number of dimensions over a single collection.
pub const MAX_DIMENSIONS: usize = 64;

/// One distinct key of a group, with the number of visible records for it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupEntry {
    pub key: Value,
    pub count: u64,
}

// **** Private structures ****

type Range = (usize, usize);

#[derive(Debug, Clone)]
struct DimensionInternal {
    name: String,
    bit: u64,
    // Normalized key of each record, by record position.
    keys: Vec<Value>,
    // Record positions sorted by key. Stable for equal keys.
    order: Vec<usize>,
    filter: Filter,
    // The selected range of `order`.
    selected: Range,
}

impl DimensionInternal {
    fn range_for(&self, filter: &Filter) -> Range {
        match filter {
            Filter::Unrestricted => (0, self.order.len()),
            Filter::Exact(v) => {
                let lo = self.order.partition_point(|&r| self.keys[r] < *v);
                let hi = self.order.partition_point(|&r| self.keys[r] <= *v);
                (lo, hi)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct GroupInternal {
    dimension: usize,
    // Distinct keys, ascending.
    keys: Vec<Value>,
    // Slot in `keys` of each record, by record position.
    slots: Vec<usize>,
    counts: Vec<u64>,
}

#[derive(Debug, Clone)]
struct Collection {
    records: Vec<Record>,
    // One bit per dimension. A record is visible iff its mask is zero.
    masks: Vec<u64>,
    visible: u64,
    dimensions: Vec<DimensionInternal>,
    groups: Vec<GroupInternal>,
}

impl Collection {
    fn hide(&mut self, record: usize, bit: u64) {
        let was_visible = self.masks[record] == 0;
        self.masks[record] |= bit;
        if was_visible {
            self.visible -= 1;
            for g in self.groups.iter_mut() {
                g.counts[g.slots[record]] -= 1;
            }
        }
    }

    fn show(&mut self, record: usize, bit: u64) {
        if self.masks[record] & bit == 0 {
            return;
        }
        self.masks[record] &= !bit;
        if self.masks[record] == 0 {
            self.visible += 1;
            for g in self.groups.iter_mut() {
                g.counts[g.slots[record]] += 1;
            }
        }
    }
}

// The parts of `a` that are not covered by `b`.
fn range_difference(a: Range, b: Range) -> [Range; 2] {
    let left = (a.0, a.1.min(b.0).max(a.0));
    let right = (a.0.max(b.1).min(a.1), a.1);
    [left, right]
}

/// The registry of all the collections, dimensions and groups of a dashboard.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    collections: Vec<Collection>,
}

impl DatasetIndex {
    pub fn new() -> DatasetIndex {
        DatasetIndex::default()
    }

    /// Registers a new collection of records.
    ///
    /// Fails with [IndexError::EmptyDataset] if there is no record: the
    /// aggregations over an empty collection are meaningless.
    pub fn create_collection(&mut self, records: Vec<Record>) -> Result<CollectionId, IndexError> {
        if records.is_empty() {
            return Err(IndexError::EmptyDataset);
        }
        let id = CollectionId(self.collections.len());
        info!(
            "create_collection: collection {:?} with {} records",
            id,
            records.len()
        );
        let n = records.len();
        self.collections.push(Collection {
            records,
            masks: vec![0; n],
            visible: n as u64,
            dimensions: Vec::new(),
            groups: Vec::new(),
        });
        Ok(id)
    }

    pub fn collection_ids(&self) -> Vec<CollectionId> {
        (0..self.collections.len()).map(CollectionId).collect()
    }

    /// Creates a dimension over a collection.
    ///
    /// The key function must be pure and defined for every record. The first
    /// defined key fixes the kind of the dimension: any key of another kind is
    /// put in the undefined bucket.
    pub fn dimension<F>(
        &mut self,
        collection: CollectionId,
        name: &str,
        key_fn: F,
    ) -> Result<DimensionId, IndexError>
    where
        F: Fn(&Record) -> Value,
    {
        let coll = self.collection_mut(collection)?;
        let slot = coll.dimensions.len();
        if slot >= MAX_DIMENSIONS {
            return Err(IndexError::TooManyDimensions(collection));
        }

        let raw: Vec<Value> = coll.records.iter().map(key_fn).collect();
        let kind = raw.iter().find_map(|v| v.kind());
        let mut collapsed = 0;
        let keys: Vec<Value> = raw
            .into_iter()
            .map(|v| {
                if v.kind().is_some() && v.kind() == kind {
                    v
                } else {
                    if !v.is_undefined() {
                        collapsed += 1;
                    }
                    Value::Undefined
                }
            })
            .collect();
        if collapsed > 0 {
            debug!(
                "dimension: {}: {} keys do not match the kind {:?} and are undefined",
                name, collapsed, kind
            );
        }

        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|a, b| keys[*a].cmp(&keys[*b]));
        let n = order.len();

        coll.dimensions.push(DimensionInternal {
            name: name.to_string(),
            bit: 1u64 << slot,
            keys,
            order,
            filter: Filter::Unrestricted,
            selected: (0, n),
        });
        let id = DimensionId { collection, slot };
        debug!("dimension: created {:?} ({})", id, name);
        Ok(id)
    }

    /// A dimension keyed on the value of one field of the records.
    pub fn field_dimension(
        &mut self,
        collection: CollectionId,
        field: &str,
    ) -> Result<DimensionId, IndexError> {
        let f = field.to_string();
        self.dimension(collection, field, move |r| r.get(&f))
    }

    pub fn dimension_by_name(&self, collection: CollectionId, name: &str) -> Option<DimensionId> {
        let coll = self.collections.get(collection.0)?;
        coll.dimensions
            .iter()
            .position(|d| d.name == name)
            .map(|slot| DimensionId { collection, slot })
    }

    pub fn dimension_name(&self, dimension: DimensionId) -> Result<&str, IndexError> {
        Ok(self.dimension_ref(dimension)?.name.as_str())
    }

    pub fn dimensions(&self, collection: CollectionId) -> Result<Vec<DimensionId>, IndexError> {
        let coll = self.collection_ref(collection)?;
        Ok((0..coll.dimensions.len())
            .map(|slot| DimensionId { collection, slot })
            .collect())
    }

    /// Creates a count group over a dimension.
    ///
    /// Every distinct key of the collection has an entry, sorted ascending.
    pub fn group(&mut self, dimension: DimensionId) -> Result<GroupId, IndexError> {
        self.dimension_ref(dimension)?;
        let coll = self.collection_mut(dimension.collection)?;
        let dim = &coll.dimensions[dimension.slot];

        let mut keys: Vec<Value> = Vec::new();
        let mut slots: Vec<usize> = vec![0; dim.keys.len()];
        for &r in dim.order.iter() {
            if keys.last() != Some(&dim.keys[r]) {
                keys.push(dim.keys[r].clone());
            }
            slots[r] = keys.len() - 1;
        }
        let mut counts: Vec<u64> = vec![0; keys.len()];
        for (r, mask) in coll.masks.iter().enumerate() {
            if *mask == 0 {
                counts[slots[r]] += 1;
            }
        }

        let slot = coll.groups.len();
        debug!(
            "group: dimension {} has {} distinct keys",
            dim.name,
            keys.len()
        );
        coll.groups.push(GroupInternal {
            dimension: dimension.slot,
            keys,
            slots,
            counts,
        });
        Ok(GroupId {
            collection: dimension.collection,
            dimension: dimension.slot,
            slot,
        })
    }

    /// Applies or clears the filter of a dimension.
    ///
    /// Only the records entering or leaving the selected range are visited.
    /// The groups of the same collection are updated accordingly. Other
    /// collections are not affected.
    pub fn set_filter(&mut self, dimension: DimensionId, filter: Filter) -> Result<(), IndexError> {
        self.dimension_ref(dimension)?;
        let coll = self.collection_mut(dimension.collection)?;
        let dim = &coll.dimensions[dimension.slot];
        let old = dim.selected;
        let new = dim.range_for(&filter);
        let bit = dim.bit;

        let exited: Vec<usize> = range_difference(old, new)
            .iter()
            .flat_map(|(lo, hi)| dim.order[*lo..*hi].iter().cloned())
            .collect();
        let entered: Vec<usize> = range_difference(new, old)
            .iter()
            .flat_map(|(lo, hi)| dim.order[*lo..*hi].iter().cloned())
            .collect();
        debug!(
            "set_filter: {} {:?}: {} records exit, {} records enter",
            dim.name,
            filter,
            exited.len(),
            entered.len()
        );

        for r in exited {
            coll.hide(r, bit);
        }
        for r in entered {
            coll.show(r, bit);
        }

        let dim = &mut coll.dimensions[dimension.slot];
        dim.filter = filter;
        dim.selected = new;
        Ok(())
    }

    pub fn filter(&self, dimension: DimensionId) -> Result<&Filter, IndexError> {
        Ok(&self.dimension_ref(dimension)?.filter)
    }

    /// Resets the filter of every dimension of the collection.
    pub fn clear_all_filters(&mut self, collection: CollectionId) -> Result<(), IndexError> {
        for dim in self.dimensions(collection)? {
            self.set_filter(dim, Filter::Unrestricted)?;
        }
        Ok(())
    }

    pub fn total_count(&self, collection: CollectionId) -> Result<u64, IndexError> {
        Ok(self.collection_ref(collection)?.records.len() as u64)
    }

    /// The number of records that pass all the filters of the collection.
    pub fn visible_count(&self, collection: CollectionId) -> Result<u64, IndexError> {
        Ok(self.collection_ref(collection)?.visible)
    }

    pub fn group_entries(&self, group: GroupId) -> Result<Vec<GroupEntry>, IndexError> {
        let g = self.group_ref(group)?;
        Ok(g.keys
            .iter()
            .zip(g.counts.iter())
            .map(|(key, count)| GroupEntry {
                key: key.clone(),
                count: *count,
            })
            .collect())
    }

    /// The number of distinct keys in the group.
    pub fn group_size(&self, group: GroupId) -> Result<usize, IndexError> {
        Ok(self.group_ref(group)?.keys.len())
    }

    pub fn group_total(&self, group: GroupId) -> Result<u64, IndexError> {
        Ok(self.group_ref(group)?.counts.iter().sum())
    }

    /// The entries of a group restricted to an ordered list of categories.
    ///
    /// The entries come in the order of the domain. Keys of the group that are
    /// not in the domain are dropped, and domain values without a key are skipped.
    pub fn ordinal_entries(
        &self,
        group: GroupId,
        domain: &[Value],
    ) -> Result<Vec<GroupEntry>, IndexError> {
        let g = self.group_ref(group)?;
        let mut res: Vec<GroupEntry> = Vec::new();
        for key in domain.iter() {
            if let Ok(slot) = g.keys.binary_search(key) {
                res.push(GroupEntry {
                    key: key.clone(),
                    count: g.counts[slot],
                });
            }
        }
        if log_enabled!(Level::Debug) {
            let dropped: Vec<&Value> = g.keys.iter().filter(|k| !domain.contains(*k)).collect();
            if !dropped.is_empty() {
                debug!("ordinal_entries: keys outside of the domain: {:?}", dropped);
            }
        }
        Ok(res)
    }

    /// The visible records with the largest keys of a dimension, largest first.
    pub fn top(&self, dimension: DimensionId, n: usize) -> Result<Vec<&Record>, IndexError> {
        let dim = self.dimension_ref(dimension)?;
        let coll = self.collection_ref(dimension.collection)?;
        Ok(dim
            .order
            .iter()
            .rev()
            .filter(|r| coll.masks[**r] == 0)
            .take(n)
            .map(|r| &coll.records[*r])
            .collect())
    }

    pub fn records(&self, collection: CollectionId) -> Result<&[Record], IndexError> {
        Ok(self.collection_ref(collection)?.records.as_slice())
    }

    fn collection_ref(&self, collection: CollectionId) -> Result<&Collection, IndexError> {
        self.collections
            .get(collection.0)
            .ok_or(IndexError::UnknownCollection(collection))
    }

    fn collection_mut(&mut self, collection: CollectionId) -> Result<&mut Collection, IndexError> {
        self.collections
            .get_mut(collection.0)
            .ok_or(IndexError::UnknownCollection(collection))
    }

    fn dimension_ref(&self, dimension: DimensionId) -> Result<&DimensionInternal, IndexError> {
        self.collection_ref(dimension.collection)?
            .dimensions
            .get(dimension.slot)
            .ok_or(IndexError::UnknownDimension(dimension))
    }

    fn group_ref(&self, group: GroupId) -> Result<&GroupInternal, IndexError> {
        self.collection_ref(group.collection)?
            .groups
            .get(group.slot)
            .filter(|g| g.dimension == group.dimension)
            .ok_or(IndexError::UnknownGroup(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn survey(n: usize) -> Vec<Record> {
        let rounds = ["August", "September", "October"];
        let ethnicities = ["Brahmin", "Chhetri", "Newar", "Tamang", "Other"];
        let ages = ["15_24", "25_39", "40_54", "55_greater"];
        (0..n)
            .map(|i| {
                // The first 30 records are from August.
                let round = if i < 30 { rounds[0] } else { rounds[1 + i % 2] };
                Record::new()
                    .with("Round", round)
                    .with("Ethnicity", ethnicities[i % ethnicities.len()])
                    .with("Age", ages[(i / 3) % ages.len()])
                    .with("District", format!("D{}", i % 7))
            })
            .collect()
    }

    // Reference implementation: scan all the records.
    fn brute_visible(records: &[Record], filters: &[(&str, Option<Value>)]) -> u64 {
        records
            .iter()
            .filter(|r| {
                filters
                    .iter()
                    .all(|(field, f)| f.as_ref().map(|v| r.get(field) == *v).unwrap_or(true))
            })
            .count() as u64
    }

    #[test]
    fn empty_collection() {
        init();
        let mut index = DatasetIndex::new();
        assert_eq!(index.create_collection(vec![]), Err(IndexError::EmptyDataset));
    }

    #[test]
    fn round_filter_scenario() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index.create_collection(survey(100)).unwrap();
        let round = index.field_dimension(coll, "Round").unwrap();
        assert_eq!(index.visible_count(coll).unwrap(), 100);

        index
            .set_filter(round, Filter::Exact(Value::from("August")))
            .unwrap();
        assert_eq!(index.visible_count(coll).unwrap(), 30);

        index.set_filter(round, Filter::Unrestricted).unwrap();
        assert_eq!(index.visible_count(coll).unwrap(), 100);
        assert_eq!(index.total_count(coll).unwrap(), 100);
    }

    #[test]
    fn group_size_counts_distinct_keys_only() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index.create_collection(survey(100)).unwrap();
        let eth = index.field_dimension(coll, "Ethnicity").unwrap();
        let g = index.group(eth).unwrap();
        assert_eq!(index.group_size(g).unwrap(), 5);
        let keys: Vec<Value> = index
            .group_entries(g)
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(
            keys,
            vec![
                Value::from("Brahmin"),
                Value::from("Chhetri"),
                Value::from("Newar"),
                Value::from("Other"),
                Value::from("Tamang")
            ]
        );
    }

    #[test]
    fn filters_combine_and_groups_follow() {
        init();
        let records = survey(100);
        let mut index = DatasetIndex::new();
        let coll = index.create_collection(records.clone()).unwrap();
        let round = index.field_dimension(coll, "Round").unwrap();
        let eth = index.field_dimension(coll, "Ethnicity").unwrap();
        let age = index.field_dimension(coll, "Age").unwrap();
        let groups: Vec<GroupId> = [round, eth, age]
            .iter()
            .map(|d| index.group(*d).unwrap())
            .collect();

        let steps: Vec<(DimensionId, &str, Option<Value>)> = vec![
            (round, "Round", Some(Value::from("August"))),
            (eth, "Ethnicity", Some(Value::from("Newar"))),
            (round, "Round", Some(Value::from("September"))),
            (age, "Age", Some(Value::from("25_39"))),
            (eth, "Ethnicity", None),
            (round, "Round", Some(Value::from("no such round"))),
            (round, "Round", None),
            (age, "Age", Some(Value::from("15_24"))),
        ];
        let mut active: Vec<(&str, Option<Value>)> =
            vec![("Round", None), ("Ethnicity", None), ("Age", None)];
        for (dim, field, v) in steps {
            index.set_filter(dim, Filter::from(v.clone())).unwrap();
            for a in active.iter_mut() {
                if a.0 == field {
                    a.1 = v.clone();
                }
            }
            let expected = brute_visible(&records, &active);
            assert_eq!(index.visible_count(coll).unwrap(), expected, "{:?}", active);
            for g in groups.iter() {
                assert_eq!(index.group_total(*g).unwrap(), expected);
            }
        }
    }

    #[test]
    fn group_counts_per_key() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index.create_collection(survey(100)).unwrap();
        let round = index.field_dimension(coll, "Round").unwrap();
        let eth = index.field_dimension(coll, "Ethnicity").unwrap();
        let per_round = index.group(round).unwrap();
        index
            .set_filter(eth, Filter::Exact(Value::from("Brahmin")))
            .unwrap();
        let entries = index.group_entries(per_round).unwrap();
        // Brahmin is every 5th record: 6 in August, 7 and 7 in the other rounds.
        assert_eq!(
            entries,
            vec![
                GroupEntry {
                    key: Value::from("August"),
                    count: 6
                },
                GroupEntry {
                    key: Value::from("October"),
                    count: 7
                },
                GroupEntry {
                    key: Value::from("September"),
                    count: 7
                },
            ]
        );
    }

    #[test]
    fn clear_all_filters_is_idempotent() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index.create_collection(survey(50)).unwrap();
        let round = index.field_dimension(coll, "Round").unwrap();
        let eth = index.field_dimension(coll, "Ethnicity").unwrap();
        let g = index.group(eth).unwrap();
        index
            .set_filter(round, Filter::Exact(Value::from("August")))
            .unwrap();
        index
            .set_filter(eth, Filter::Exact(Value::from("Tamang")))
            .unwrap();
        assert!(index.visible_count(coll).unwrap() < 50);

        index.clear_all_filters(coll).unwrap();
        let once = index.group_entries(g).unwrap();
        assert_eq!(index.visible_count(coll).unwrap(), 50);
        index.clear_all_filters(coll).unwrap();
        assert_eq!(index.visible_count(coll).unwrap(), 50);
        assert_eq!(index.group_entries(g).unwrap(), once);
        assert_eq!(index.filter(round).unwrap(), &Filter::Unrestricted);
    }

    #[test]
    fn collections_are_not_linked() {
        init();
        let mut index = DatasetIndex::new();
        let survey_c = index.create_collection(survey(40)).unwrap();
        let activities = index
            .create_collection(vec![
                Record::new().with("District", "D1").with("Round", "August"),
                Record::new()
                    .with("District", "D2")
                    .with("Round", "September"),
            ])
            .unwrap();
        let round = index.field_dimension(survey_c, "Round").unwrap();
        index.field_dimension(activities, "Round").unwrap();
        index
            .set_filter(round, Filter::Exact(Value::from("August")))
            .unwrap();
        assert_eq!(index.visible_count(survey_c).unwrap(), 30);
        assert_eq!(index.visible_count(activities).unwrap(), 2);
    }

    #[test]
    fn heterogeneous_keys_are_undefined() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index
            .create_collection(vec![
                Record::new().with("Age", 25i64),
                Record::new().with("Age", "refused"),
                Record::new().with("Age", 40i64),
                Record::new(),
            ])
            .unwrap();
        let age = index.field_dimension(coll, "Age").unwrap();
        let g = index.group(age).unwrap();
        assert_eq!(
            index.group_entries(g).unwrap(),
            vec![
                GroupEntry {
                    key: Value::Undefined,
                    count: 2
                },
                GroupEntry {
                    key: Value::from(25i64),
                    count: 1
                },
                GroupEntry {
                    key: Value::from(40i64),
                    count: 1
                },
            ]
        );
        index
            .set_filter(age, Filter::Exact(Value::Undefined))
            .unwrap();
        assert_eq!(index.visible_count(coll).unwrap(), 2);
    }

    #[test]
    fn ordinal_domain_drops_unknown_keys() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index
            .create_collection(vec![
                Record::new().with("A0JS", "3___neutral"),
                Record::new().with("A0JS", "1___not_at_all"),
                Record::new().with("A0JS", "3___neutral"),
                Record::new().with("A0JS", "not_in_domain"),
            ])
            .unwrap();
        let dim = index.field_dimension(coll, "A0JS").unwrap();
        let g = index.group(dim).unwrap();
        let domain: Vec<Value> = ["1___not_at_all", "2___very_little", "3___neutral"]
            .iter()
            .map(|s| Value::from(*s))
            .collect();
        let entries = index.ordinal_entries(g, &domain).unwrap();
        assert_eq!(
            entries,
            vec![
                GroupEntry {
                    key: Value::from("1___not_at_all"),
                    count: 1
                },
                GroupEntry {
                    key: Value::from("3___neutral"),
                    count: 2
                },
            ]
        );
        // Still present in the group and in the totals.
        assert_eq!(index.group_size(g).unwrap(), 3);
        assert_eq!(index.visible_count(coll).unwrap(), 4);
    }

    #[test]
    fn top_returns_visible_records_by_descending_key() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index
            .create_collection(vec![
                Record::new().with("Age", 30i64).with("Round", "August"),
                Record::new().with("Age", 50i64).with("Round", "September"),
                Record::new().with("Age", 20i64).with("Round", "August"),
                Record::new().with("Age", 60i64).with("Round", "August"),
            ])
            .unwrap();
        let age = index.field_dimension(coll, "Age").unwrap();
        let round = index.field_dimension(coll, "Round").unwrap();
        index
            .set_filter(round, Filter::Exact(Value::from("August")))
            .unwrap();
        let ages: Vec<Value> = index
            .top(age, 2)
            .unwrap()
            .iter()
            .map(|r| r.get("Age"))
            .collect();
        assert_eq!(ages, vec![Value::from(60i64), Value::from(30i64)]);
    }

    #[test]
    fn unknown_handles() {
        init();
        let mut index = DatasetIndex::new();
        let mut other = DatasetIndex::new();
        let coll = other
            .create_collection(vec![Record::new().with("Round", "August")])
            .unwrap();
        let dim = other.field_dimension(coll, "Round").unwrap();
        assert_eq!(
            index.visible_count(coll),
            Err(IndexError::UnknownCollection(coll))
        );
        assert!(index.set_filter(dim, Filter::Unrestricted).is_err());
        assert!(index.group(dim).is_err());
    }

    #[test]
    fn too_many_dimensions() {
        init();
        let mut index = DatasetIndex::new();
        let coll = index
            .create_collection(vec![Record::new().with("Round", "August")])
            .unwrap();
        for _ in 0..MAX_DIMENSIONS {
            index.field_dimension(coll, "Round").unwrap();
        }
        assert_eq!(
            index.field_dimension(coll, "Round"),
            Err(IndexError::TooManyDimensions(coll))
        );
    }

    #[test]
    fn range_difference_cases() {
        assert_eq!(range_difference((0, 10), (3, 5)), [(0, 3), (5, 10)]);
        assert_eq!(range_difference((3, 5), (0, 10)), [(3, 3), (5, 5)]);
        assert_eq!(range_difference((0, 4), (6, 8)), [(0, 4), (4, 4)]);
        assert_eq!(range_difference((6, 8), (0, 4)), [(6, 6), (6, 8)]);
    }
}
