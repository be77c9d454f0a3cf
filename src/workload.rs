use collabc_core::prelude::*;
use collabc_core::registry::{CapabilitySet, Registry};
use collabc_core::register_recognized;
use collabc_types::{Dict, FrozenSet, List, Progression, SharedDict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Parameters shared by every workload.
#[derive(Clone, Copy, Debug)]
pub struct WorkloadConfig {
    pub seed: u64,
    pub ops_per_round: usize,
    pub rounds: usize,
    pub key_space: u32,
}

/// Statistics collected while running a workload
#[derive(Clone, Debug)]
pub struct WorkloadStats {
    pub name: String,
    pub rounds: usize,
    pub operations: usize,
    pub checks: usize,
    pub mismatches: usize,
    pub total_time: Duration,
    pub ops_per_second: f64,
}

impl WorkloadStats {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    pub fn print(&self) {
        println!("\n╔════════════════════════════════════════════════════════════╗");
        println!("║  {:<58}║", self.name);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║  Rounds:                    {:>30} ║", self.rounds);
        println!("║  Operations:                {:>30} ║", self.operations);
        println!("║  Model Checks:              {:>30} ║", self.checks);
        println!("║  Mismatches:                {:>30} ║", self.mismatches);
        println!("║  Total Time:                {:>29}s ║", format!("{:.3}", self.total_time.as_secs_f64()));
        println!("║  Operations/Second:         {:>30.0} ║", self.ops_per_second);
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

#[derive(Default)]
struct Tally {
    operations: usize,
    checks: usize,
    mismatches: usize,
}

impl Tally {
    fn check(&mut self, agrees: bool, operation: &str) {
        self.checks += 1;
        if !agrees {
            self.mismatches += 1;
            warn!(operation, "container diverged from model");
        }
    }

    fn finish(self, name: &str, config: &WorkloadConfig, total_time: Duration) -> WorkloadStats {
        let secs = total_time.as_secs_f64();
        WorkloadStats {
            name: name.to_string(),
            rounds: config.rounds,
            operations: self.operations,
            checks: self.checks,
            mismatches: self.mismatches,
            total_time,
            ops_per_second: if secs > 0.0 { self.operations as f64 / secs } else { 0.0 },
        }
    }
}

fn print_banner(name: &str, config: &WorkloadConfig) {
    println!("\n[{}] seed {} | {} rounds x {} ops | key space {}",
             name, config.seed, config.rounds, config.ops_per_round, config.key_space);
}

/// Drive a mutable mapping and a `BTreeMap` with the same random operations.
pub fn mapping_workload<M>(name: &str, config: &WorkloadConfig) -> WorkloadStats
where
    M: MutableMapping<Item = u32, Value = u64> + Default,
{
    print_banner(name, config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tally = Tally::default();
    let start = Instant::now();

    for round in 0..config.rounds {
        let mut map = M::default();
        let mut model: BTreeMap<u32, u64> = BTreeMap::new();

        for _ in 0..config.ops_per_round {
            let key = rng.gen_range(0..config.key_space);
            let value: u64 = rng.gen();
            match rng.gen_range(0..6) {
                0 | 1 => {
                    tally.check(map.set_item(key, value).is_ok(), "set_item");
                    model.insert(key, value);
                }
                2 => {
                    let expected = model.remove(&key).is_some();
                    tally.check(map.del_item(&key).is_ok() == expected, "del_item");
                }
                3 => {
                    let expected = model.remove(&key).unwrap_or(value);
                    tally.check(map.pop(&key, Some(value)) == Ok(expected), "pop");
                }
                4 => {
                    let expected = *model.entry(key).or_insert(value);
                    tally.check(map.setdefault(key, value) == Ok(expected), "setdefault");
                }
                _ => {
                    let pairs: Vec<(u32, u64)> = (0..3)
                        .map(|_| (rng.gen_range(0..config.key_space), rng.gen()))
                        .collect();
                    model.extend(pairs.iter().copied());
                    let applied = map.update(Some(UpdateSource::pairs(pairs)), std::iter::empty());
                    tally.check(applied.is_ok(), "update");
                }
            }
            tally.operations += 1;
        }

        let keys: BTreeSet<u32> = model.keys().copied().collect();
        tally.check(map.mapping_eq(&model), "mapping equality");
        tally.check(map.keys().equals(&keys), "keys view");
        tally.check(map.items().len() == model.len(), "items view");
        tally.check(map.clear().is_ok() && map.is_empty(), "clear");
        debug!(round, len = model.len(), "mapping round verified");
    }

    tally.finish(name, config, start.elapsed())
}

/// Drive a mutable sequence and a `Vec` with the same random operations.
pub fn sequence_workload<S>(name: &str, config: &WorkloadConfig) -> WorkloadStats
where
    S: MutableSequence<Item = i64> + Default,
{
    print_banner(name, config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tally = Tally::default();
    let start = Instant::now();
    let span = i64::from(config.key_space);

    for round in 0..config.rounds {
        let mut seq = S::default();
        let mut model: Vec<i64> = Vec::new();

        for _ in 0..config.ops_per_round {
            let value = rng.gen_range(0..span);
            // One past the end is valid for insert; two past is not.
            let index = rng.gen_range(0..model.len() + 2);
            match rng.gen_range(0..8) {
                0 | 1 => {
                    tally.check(seq.append(value).is_ok(), "append");
                    model.push(value);
                }
                2 => {
                    let result = seq.insert(index, value);
                    if index <= model.len() {
                        model.insert(index, value);
                        tally.check(result.is_ok(), "insert");
                    } else {
                        tally.check(result.is_err(), "insert past end");
                    }
                }
                3 => {
                    let result = seq.del_item(index);
                    if index < model.len() {
                        model.remove(index);
                        tally.check(result.is_ok(), "del_item");
                    } else {
                        tally.check(result.is_err(), "del_item past end");
                    }
                }
                4 => {
                    let expected = model.pop().ok_or(CollError::IndexOutOfRange { index: 0, length: 0 });
                    tally.check(seq.pop() == expected, "pop");
                }
                5 => {
                    let result = seq.remove(&value);
                    match model.iter().position(|v| *v == value) {
                        Some(at) => {
                            model.remove(at);
                            tally.check(result.is_ok(), "remove");
                        }
                        None => tally.check(result == Err(CollError::ValueNotFound), "remove absent"),
                    }
                }
                6 => {
                    tally.check(seq.reverse().is_ok(), "reverse");
                    model[..].reverse();
                }
                _ => {
                    let extra = [value, value + 1];
                    tally.check(seq.extend_from(extra).is_ok(), "extend_from");
                    model.extend(extra);
                }
            }
            tally.operations += 1;
        }

        let forward: Vec<i64> = seq.iterate().collect();
        let backward: Vec<i64> = seq.reversed().collect();
        tally.check(forward == model, "iteration order");
        tally.check(backward.iter().rev().eq(model.iter()), "reversed");

        let needle = rng.gen_range(0..span);
        let count = model.iter().filter(|v| **v == needle).count();
        tally.check(seq.count(&needle) == count, "count");
        tally.check(seq.index(&needle).ok() == model.iter().position(|v| *v == needle), "index");
        debug!(round, len = model.len(), "sequence round verified");
    }

    tally.finish(name, config, start.elapsed())
}

/// Drive a mutable set and a `BTreeSet` with the same random operations.
pub fn set_workload<S>(name: &str, config: &WorkloadConfig) -> WorkloadStats
where
    S: MutableSet<Item = u32> + Default,
    S::Output: Set<Item = u32>,
{
    print_banner(name, config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tally = Tally::default();
    let start = Instant::now();

    for round in 0..config.rounds {
        let mut set = S::default();
        let mut model: BTreeSet<u32> = BTreeSet::new();

        for _ in 0..config.ops_per_round {
            let value = rng.gen_range(0..config.key_space);
            let other: BTreeSet<u32> = (0..4).map(|_| rng.gen_range(0..config.key_space)).collect();
            match rng.gen_range(0..8) {
                0 | 1 => {
                    tally.check(set.add(value).is_ok(), "add");
                    model.insert(value);
                }
                2 => {
                    tally.check(set.discard(&value).is_ok(), "discard");
                    model.remove(&value);
                }
                3 => {
                    let present = model.remove(&value);
                    tally.check(set.remove(&value).is_ok() == present, "remove");
                }
                4 => match set.pop() {
                    Ok(popped) => tally.check(model.remove(&popped), "pop"),
                    Err(err) => tally.check(model.is_empty() && err == CollError::Empty("set"), "pop empty"),
                },
                5 => {
                    tally.check(set.union_update(other.iter().copied()).is_ok(), "union_update");
                    model.extend(other.iter().copied());
                }
                6 => {
                    tally.check(set.symmetric_difference_update(&other).is_ok(), "symmetric_difference_update");
                    model = model.symmetric_difference(&other).copied().collect();
                }
                _ => {
                    tally.check(set.difference_update(other.iter().copied()).is_ok(), "difference_update");
                    model.retain(|v| !other.contains(v));
                }
            }
            tally.operations += 1;
        }

        let needle: BTreeSet<u32> = (0..8).map(|_| rng.gen_range(0..config.key_space)).collect();
        tally.check(set.equals(&model), "set equality");
        tally.check(
            set.union(&needle).equals(&model.union(&needle).copied().collect::<BTreeSet<_>>()),
            "union",
        );
        tally.check(
            set.intersection(&needle).equals(&model.intersection(&needle).copied().collect::<BTreeSet<_>>()),
            "intersection",
        );
        tally.check(
            set.difference(&needle).equals(&model.difference(&needle).copied().collect::<BTreeSet<_>>()),
            "difference",
        );
        tally.check(set.is_disjoint(&needle) == model.is_disjoint(&needle), "is_disjoint");
        tally.check(set.intersection_update(&needle).is_ok(), "intersection_update");
        model.retain(|v| needle.contains(v));
        tally.check(set.equals(&model), "intersection_update result");
        debug!(round, len = model.len(), "set round verified");
    }

    tally.finish(name, config, start.elapsed())
}

/// Frozen sets built from the same elements in different orders must hash alike.
pub fn frozen_hash_workload(config: &WorkloadConfig) -> WorkloadStats {
    let name = "FrozenSet hash stability";
    print_banner(name, config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tally = Tally::default();
    let start = Instant::now();

    for _ in 0..config.rounds {
        let values: Vec<u32> = (0..config.ops_per_round.min(64))
            .map(|_| rng.gen_range(0..config.key_space))
            .collect();
        let forward: FrozenSet<u32> = values.iter().copied().collect();
        let backward: FrozenSet<u32> = values.iter().rev().copied().collect();
        tally.check(forward == backward, "frozen equality");
        tally.check(forward.set_hash() == backward.set_hash(), "frozen hash");
        tally.operations += values.len();
    }

    tally.finish(name, config, start.elapsed())
}

/// A computed progression must agree with the range it describes.
pub fn progression_workload(config: &WorkloadConfig) -> WorkloadStats {
    let name = "Progression vs Range";
    print_banner(name, config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tally = Tally::default();
    let start = Instant::now();
    let span = i64::from(config.key_space);

    for _ in 0..config.rounds {
        let from = rng.gen_range(-span..span);
        let to = rng.gen_range(-span..span);
        let step = rng.gen_range(1..5);
        let expected: Vec<i64> = (from..to).step_by(step as usize).collect();
        match Progression::until(from, to, step) {
            Some(progression) => {
                tally.check(progression.iterate().collect::<Vec<_>>() == expected, "terms");
                tally.check(progression.len() == expected.len(), "len");
                tally.check(progression.reversed().eq(expected.iter().rev().copied()), "reversed");
            }
            None => tally.check(false, "until"),
        }
        tally.operations += 1;
    }

    tally.finish(name, config, start.elapsed())
}

/// Record what each exercised container is recognized as.
pub fn capability_report(registry: &Registry) -> Vec<(&'static str, CapabilitySet)> {
    register_recognized!(registry, Dict<u32, u64>);
    register_recognized!(registry, SharedDict<u32, u64>);
    register_recognized!(registry, HashMap<u32, u64>);
    register_recognized!(registry, List<i64>);
    register_recognized!(registry, Vec<i64>);
    register_recognized!(registry, VecDeque<i64>);
    register_recognized!(registry, ListSet<u32>);
    register_recognized!(registry, HashSet<u32>);
    register_recognized!(registry, FrozenSet<u32>);
    register_recognized!(registry, Progression);

    vec![
        ("Dict", registry.capabilities::<Dict<u32, u64>>()),
        ("SharedDict", registry.capabilities::<SharedDict<u32, u64>>()),
        ("HashMap", registry.capabilities::<HashMap<u32, u64>>()),
        ("List", registry.capabilities::<List<i64>>()),
        ("Vec", registry.capabilities::<Vec<i64>>()),
        ("VecDeque", registry.capabilities::<VecDeque<i64>>()),
        ("ListSet", registry.capabilities::<ListSet<u32>>()),
        ("HashSet", registry.capabilities::<HashSet<u32>>()),
        ("FrozenSet", registry.capabilities::<FrozenSet<u32>>()),
        ("Progression", registry.capabilities::<Progression>()),
    ]
}
