//! Greedy merit-order fill with a recursive transition search.
//!
//! The fill walks the merit order and hands each plant as much of the
//! remaining load as its envelope allows. When the remainder drops below the
//! next plant's minimum, the transition search tries every later plant `Q` as
//! the one that absorbs the awkward tail:
//!
//! - `Q.min > 0`: solve `total − Q.min` over the other plants and run `Q` at
//!   its minimum
//! - `Q.min == 0`: keep the current allocation and give `Q` the remainder
//!
//! The cheapest candidate wins. Only one plant is substituted at a time, so
//! the search is not a full combinatorial optimum. Each nested sub-solve
//! excludes one more plant, which bounds the recursion depth by the fleet size.
//!
//! Loads admitted within the tolerance are clamped into the plant envelope,
//! so every allocation can be priced by [`Plant::cost_for_load`].

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use tracing::debug;
use web_time::Instant;

use merit_core::{Euros, Megawatts, MeritError, MeritResult, Plant, PlantId};

use super::{DispatchConfig, DispatchSolution};

/// Counters collected during one top-level solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of `solve` invocations, including the top-level one
    pub solves: usize,
    /// Sub-solves answered from the memo
    pub memo_hits: usize,
    /// Transition searches started
    pub transitions: usize,
    /// Deepest recursion level reached
    pub max_depth_reached: usize,
}

/// Dispatch engine over a merit-ordered plant list
#[derive(Debug, Clone, Default)]
pub struct DispatchEngine {
    config: DispatchConfig,
}

impl DispatchEngine {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Allocate `load` across `plants`, which must already be in merit order.
    pub fn solve(&self, load: Megawatts, plants: &[&Plant]) -> MeritResult<DispatchSolution> {
        self.solve_with_stats(load, plants).map(|(solution, _)| solution)
    }

    /// Like [`solve`](Self::solve), also returning search counters.
    pub fn solve_with_stats(
        &self,
        load: Megawatts,
        plants: &[&Plant],
    ) -> MeritResult<(DispatchSolution, SearchStats)> {
        if !load.is_finite() || load < Megawatts::ZERO {
            return Err(MeritError::validation(
                "load",
                format!("the load to distribute cannot be less than 0, got {}", load.value()),
            ));
        }

        let mut search = Search::new(&self.config, plants);
        let result = search.solve(load, 0, &BTreeSet::new());
        debug!(
            load = load.value(),
            solves = search.stats.solves,
            memo_hits = search.stats.memo_hits,
            transitions = search.stats.transitions,
            depth = search.stats.max_depth_reached,
            elapsed_us = search.start.elapsed().as_micros() as u64,
            "dispatch search finished"
        );
        result.map(|solution| (solution, search.stats))
    }
}

/// Plants a sub-solve may not use
type Excluded = BTreeSet<PlantId>;

/// State of one top-level solve; dropped when it returns.
struct Search<'a> {
    config: &'a DispatchConfig,
    plants: &'a [&'a Plant],
    start: Instant,
    deadline: Option<Instant>,
    /// Sub-solve results by residual load and excluded plants; `None` marks
    /// an infeasible load
    memo: HashMap<(u64, Excluded), Option<DispatchSolution>>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(config: &'a DispatchConfig, plants: &'a [&'a Plant]) -> Self {
        let start = Instant::now();
        Self {
            config,
            plants,
            start,
            deadline: config.time_budget.map(|budget| start + budget),
            memo: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    fn check_guards(&self, depth: usize) -> MeritResult<()> {
        if depth > self.config.max_depth {
            return Err(MeritError::Timeout(format!(
                "transition search exceeded max depth {}",
                self.config.max_depth
            )));
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                let budget = self.config.time_budget.unwrap_or(Duration::ZERO);
                return Err(MeritError::Timeout(format!(
                    "dispatch search exceeded time budget of {} ms",
                    budget.as_millis()
                )));
            }
        }
        Ok(())
    }

    fn solve(
        &mut self,
        load: Megawatts,
        depth: usize,
        excluded: &Excluded,
    ) -> MeritResult<DispatchSolution> {
        self.check_guards(depth)?;
        self.stats.solves += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        let tol = self.config.tolerance;
        let mut allocation = DispatchSolution::new();
        let mut remaining = load;

        for index in 0..self.plants.len() {
            let plant = self.plants[index];
            if excluded.contains(&plant.id)
                || allocation.contains(plant.id)
                || plant.max_power_when_on() <= tol
            {
                continue;
            }
            let min = plant.min_power_when_on();
            let max = plant.max_power_when_on();

            if load + tol < min {
                continue;
            }
            if remaining <= tol {
                break;
            }

            if remaining + tol >= max {
                debug!(plant = %plant.name, load = max.value(), "allocating full capacity");
                allocation.insert(plant.id, max);
                remaining -= max;
            } else if remaining + tol >= min {
                let share = remaining.max(min).min(max);
                debug!(plant = %plant.name, load = share.value(), "allocating remainder");
                allocation.insert(plant.id, share);
                remaining -= share;
            } else {
                debug!(
                    plant = %plant.name,
                    remaining = remaining.value(),
                    min = min.value(),
                    "remainder below minimum, searching transitions"
                );
                allocation = self.resolve_transition(
                    &allocation,
                    index,
                    remaining,
                    load,
                    depth,
                    excluded,
                )?;
                remaining = load - allocation.total();
            }
        }

        if remaining > tol {
            return Err(MeritError::Infeasible(format!(
                "unable to allocate {:.3} MW of {:.3} MW requested",
                remaining.value(),
                load.value()
            )));
        }
        if remaining < -tol {
            return Err(MeritError::Infeasible(format!(
                "allocation overshoots {:.3} MW request by {:.3} MW",
                load.value(),
                -remaining.value()
            )));
        }

        Ok(allocation)
    }

    /// Pick the cheapest single-plant substitution covering `total_load`.
    fn resolve_transition(
        &mut self,
        allocation: &DispatchSolution,
        from_index: usize,
        remaining: Megawatts,
        total_load: Megawatts,
        depth: usize,
        excluded: &Excluded,
    ) -> MeritResult<DispatchSolution> {
        self.stats.transitions += 1;
        let tol = self.config.tolerance;
        let mut best: Option<(DispatchSolution, Euros)> = None;

        for index in from_index..self.plants.len() {
            let candidate_plant = self.plants[index];
            let min = candidate_plant.min_power_when_on();
            let max = candidate_plant.max_power_when_on();
            if excluded.contains(&candidate_plant.id) || max <= tol || min >= total_load {
                continue;
            }

            let candidate = if min > tol {
                let mut without = excluded.clone();
                without.insert(candidate_plant.id);
                let Some(mut sub) = self.sub_solve(total_load - min, depth + 1, without)? else {
                    continue;
                };
                sub.insert(candidate_plant.id, min);
                sub
            } else {
                if allocation.contains(candidate_plant.id) || remaining > max + tol {
                    continue;
                }
                let mut extended = allocation.clone();
                extended.insert(candidate_plant.id, remaining.min(max));
                extended
            };

            let cost = candidate.total_cost(self.plants)?;
            debug!(
                via = %candidate_plant.name,
                cost = cost.value(),
                depth,
                "transition candidate"
            );
            if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
                best = Some((candidate, cost));
            }
        }

        best.map(|(solution, _)| solution).ok_or_else(|| {
            MeritError::Infeasible(format!(
                "no plant can absorb the remaining {:.3} MW of {:.3} MW",
                remaining.value(),
                total_load.value()
            ))
        })
    }

    /// Memoized recursive solve; infeasible loads come back as `None`.
    fn sub_solve(
        &mut self,
        load: Megawatts,
        depth: usize,
        excluded: Excluded,
    ) -> MeritResult<Option<DispatchSolution>> {
        let key = (load.value().to_bits(), excluded);
        if let Some(cached) = self.memo.get(&key) {
            self.stats.memo_hits += 1;
            return Ok(cached.clone());
        }

        let outcome = match self.solve(load, depth, &key.1) {
            Ok(solution) => Some(solution),
            Err(MeritError::Infeasible(reason)) => {
                debug!(load = load.value(), %reason, "sub-solve infeasible");
                None
            }
            Err(other) => return Err(other),
        };
        self.memo.insert(key, outcome.clone());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merit_order;
    use merit_core::{EurosPerMegawattHour, PlantId, PlantKind};

    fn turbojet(id: usize, price: f64, pmin: f64, pmax: f64) -> Plant {
        Plant::new(
            PlantId::new(id),
            format!("p{id}"),
            1.0,
            Megawatts(pmin),
            Megawatts(pmax),
            PlantKind::TurboJet {
                fuel_price: EurosPerMegawattHour(price),
            },
        )
        .unwrap()
    }

    #[test]
    fn transition_prefers_cheaper_substitution() {
        // A fills 100, leaving 20 below B's minimum of 50.
        let plants = vec![
            turbojet(0, 10.0, 0.0, 100.0),
            turbojet(1, 20.0, 50.0, 200.0),
        ];
        let ordered = merit_order(&plants);
        let solution = DispatchEngine::default()
            .solve(Megawatts(120.0), &ordered)
            .unwrap();

        assert!((solution.load_of(PlantId::new(0)).value() - 70.0).abs() < 1e-9);
        assert!((solution.load_of(PlantId::new(1)).value() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_floor_plant_takes_remainder() {
        let plants = vec![
            turbojet(0, 10.0, 100.0, 100.0),
            turbojet(1, 15.0, 50.0, 80.0),
            turbojet(2, 30.0, 0.0, 30.0),
        ];
        let ordered = merit_order(&plants);
        let solution = DispatchEngine::default()
            .solve(Megawatts(120.0), &ordered)
            .unwrap();

        assert_eq!(solution.load_of(PlantId::new(0)), Megawatts(100.0));
        assert_eq!(solution.load_of(PlantId::new(1)), Megawatts::ZERO);
        assert_eq!(solution.load_of(PlantId::new(2)), Megawatts(20.0));
    }

    #[test]
    fn stats_count_memo_and_transitions() {
        let plants = vec![
            turbojet(0, 10.0, 0.0, 100.0),
            turbojet(1, 20.0, 50.0, 200.0),
        ];
        let ordered = merit_order(&plants);
        let (_, stats) = DispatchEngine::default()
            .solve_with_stats(Megawatts(120.0), &ordered)
            .unwrap();

        assert_eq!(stats.transitions, 1);
        assert_eq!(stats.solves, 2);
        assert_eq!(stats.max_depth_reached, 1);
    }
}
