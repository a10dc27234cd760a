//! Route planning strategies, one per direction of travel.
//!
//! Both strategies pick hops greedily: from the current station they scan
//! outwards through every station its best vehicle can reach and land on the
//! one whose own vehicle then reaches farthest. The goal wins outright as soon
//! as it is in range. This fixes the hop count, and a direction-specific
//! refinement pass then moves intermediate stops towards smaller positions
//! without adding hops.

use tracing::trace;

use crate::error::Result;
use crate::route_vector::RouteVector;
use crate::Position;

use super::RouteDirection;

/// Trait for direction-specific route planning.
///
/// Snapshot indices refer to a [`RouteVector`] sorted by station position;
/// path entries hold station positions with an unused range column.
pub trait RoutePlanner {
    /// The direction this planner travels in.
    fn direction(&self) -> RouteDirection;

    /// Snapshot index one step past `idx` towards `goal_idx`, or `None` once
    /// `idx` is the goal.
    fn advance(&self, idx: usize, goal_idx: usize) -> Option<usize>;

    /// Rewrite the intermediate stops of a minimum-hop `path` in place,
    /// preferring smaller positions while keeping every hop feasible.
    fn refine(&self, snapshot: &RouteVector, path: &mut RouteVector) -> Result<()>;

    /// Pick the station to hop to from `current`, or `None` when its best
    /// vehicle reaches nothing.
    fn next_hop(&self, snapshot: &RouteVector, current: usize, goal_idx: usize) -> Option<usize> {
        let reach = snapshot.range(current);
        let mut best: Option<usize> = None;
        let mut candidate = self.advance(current, goal_idx);

        while let Some(idx) = candidate {
            if snapshot.distance_between(current, idx) > reach {
                break;
            }
            if idx == goal_idx {
                return Some(idx);
            }
            // Later candidates win ties: they are farther along.
            let better = best.map_or(true, |best_idx| {
                hop_score(snapshot, current, idx) >= hop_score(snapshot, current, best_idx)
            });
            if better {
                best = Some(idx);
            }
            candidate = self.advance(idx, goal_idx);
        }

        best
    }

    /// Append greedy hops from `start_idx` to `goal_idx` onto `path`.
    ///
    /// Returns `false` if some station on the way cannot reach any further
    /// station; `path` then holds the partial route.
    fn select_hops(
        &self,
        snapshot: &RouteVector,
        start_idx: usize,
        goal_idx: usize,
        path: &mut RouteVector,
    ) -> bool {
        let mut current = start_idx;
        while current != goal_idx {
            let Some(next) = self.next_hop(snapshot, current, goal_idx) else {
                return false;
            };
            trace!(
                from = snapshot.station(current),
                to = snapshot.station(next),
                "selected hop"
            );
            path.append(snapshot.station(next), 0);
            current = next;
        }
        true
    }
}

/// How far past `from` a traveller can get by hopping to `to` and then using
/// the best vehicle parked there.
fn hop_score(snapshot: &RouteVector, from: usize, to: usize) -> u64 {
    snapshot
        .distance_between(from, to)
        .saturating_add(snapshot.range(to))
}

/// Planner for queries travelling towards larger positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AscendingPlanner;

impl RoutePlanner for AscendingPlanner {
    fn direction(&self) -> RouteDirection {
        RouteDirection::Ascending
    }

    fn advance(&self, idx: usize, goal_idx: usize) -> Option<usize> {
        (idx < goal_idx).then_some(idx + 1)
    }

    /// Works backwards from the stop before the goal. Each stop becomes the
    /// smallest station that still lies after the preceding greedy stop and
    /// whose vehicle reaches the already refined stop that follows it. The
    /// snapshot cursor only moves down, so the whole pass is linear.
    fn refine(&self, snapshot: &RouteVector, path: &mut RouteVector) -> Result<()> {
        if path.len() < 3 {
            return Ok(());
        }

        let mut slot = path.len() - 2;
        let mut cursor = snapshot.find_index_of_station(path.station(slot))?;

        while slot > 0 {
            let previous = path.station(slot - 1);
            let next = path.station(slot + 1);

            while snapshot.station(cursor) > previous {
                let candidate = snapshot.get(cursor);
                if next.abs_diff(candidate.station) <= candidate.range {
                    path.set(slot, candidate.station, 0);
                }
                cursor -= 1;
            }
            slot -= 1;
        }

        Ok(())
    }
}

/// Planner for queries travelling towards smaller positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendingPlanner;

impl RoutePlanner for DescendingPlanner {
    fn direction(&self) -> RouteDirection {
        RouteDirection::Descending
    }

    fn advance(&self, idx: usize, goal_idx: usize) -> Option<usize> {
        (idx > goal_idx).then(|| idx - 1)
    }

    /// Fixpoint over consecutive `(previous, current, next)` stops. A stop is
    /// replaced by any smaller station strictly between it and the next stop
    /// that the previous stop reaches and that itself reaches the next stop;
    /// the smallest such station wins. A replacement can open up smaller
    /// choices for stops already visited, so the scan restarts from the end
    /// of the path until a full scan changes nothing. Positions only ever
    /// decrease, which bounds the number of restarts.
    fn refine(&self, snapshot: &RouteVector, path: &mut RouteVector) -> Result<()> {
        if path.len() < 3 {
            return Ok(());
        }

        let last_slot = path.len() - 2;
        let mut slot = last_slot;
        let mut restarts = 0usize;

        while slot > 0 {
            let previous_idx = snapshot.find_index_of_station(path.station(slot - 1))?;
            let current_idx = snapshot.find_index_of_station(path.station(slot))?;
            let next_idx = snapshot.find_index_of_station(path.station(slot + 1))?;
            let previous_reach = snapshot.range(previous_idx);

            let mut changed = false;
            for candidate in (next_idx + 1..current_idx).rev() {
                let reachable =
                    snapshot.distance_between(previous_idx, candidate) <= previous_reach;
                let continues =
                    snapshot.distance_between(candidate, next_idx) <= snapshot.range(candidate);
                if reachable && continues {
                    path.set(slot, snapshot.station(candidate), 0);
                    changed = true;
                }
            }

            if changed {
                restarts += 1;
                slot = last_slot;
            } else {
                slot -= 1;
            }
        }

        trace!(restarts, "descending refinement settled");
        Ok(())
    }
}

/// Select the planner for a query from `start` to `goal`.
pub fn select_planner(start: Position, goal: Position) -> Box<dyn RoutePlanner> {
    match RouteDirection::between(start, goal) {
        RouteDirection::Ascending => Box::new(AscendingPlanner),
        RouteDirection::Descending => Box::new(DescendingPlanner),
    }
}
