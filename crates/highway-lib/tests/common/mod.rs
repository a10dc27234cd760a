//! Common test utilities and a brute-force reference planner.
//!
//! The reference works on a plain sorted list of `(position, best range)`
//! pairs with breadth-first search, so it shares no code with the library.
#![allow(dead_code)]

use std::collections::VecDeque;

use highway_lib::{Highway, Position, Range};

/// Build a highway from `(position, ranges)` pairs.
pub fn highway_from(entries: &[(Position, &[Range])]) -> Highway {
    let mut highway = Highway::default();
    for &(position, ranges) in entries {
        highway.register_station_with_vehicles(position, ranges.iter().copied());
    }
    highway
}

/// Sorted `(position, best range)` view of the highway.
pub fn best_ranges(highway: &Highway) -> Vec<(Position, Range)> {
    let mut stations: Vec<_> = highway
        .stations()
        .iter()
        .map(|station| (station.position(), station.best_range()))
        .collect();
    stations.sort_unstable();
    stations
}

/// Whether a single hop `from -> to` is allowed when travelling from
/// `start` towards `goal`.
pub fn hop_allowed(
    stations: &[(Position, Range)],
    start: Position,
    goal: Position,
    from: Position,
    to: Position,
) -> bool {
    let forward = if start < goal { to > from } else { to < from };
    forward && from.abs_diff(to) <= range_at(stations, from)
}

pub fn range_at(stations: &[(Position, Range)], position: Position) -> Range {
    stations
        .iter()
        .find(|(station, _)| *station == position)
        .map(|(_, range)| *range)
        .expect("station present in reference list")
}

/// Hops needed from every station to reach `goal`, `None` when unreachable.
pub fn hops_to_goal(
    stations: &[(Position, Range)],
    start: Position,
    goal: Position,
) -> Vec<Option<usize>> {
    let mut hops = vec![None; stations.len()];
    let goal_idx = stations
        .iter()
        .position(|(station, _)| *station == goal)
        .expect("goal present");
    hops[goal_idx] = Some(0);

    let mut queue = VecDeque::from([goal_idx]);
    while let Some(target) = queue.pop_front() {
        let next_hops = hops[target].map(|h| h + 1);
        for source in 0..stations.len() {
            if hops[source].is_none()
                && hop_allowed(stations, start, goal, stations[source].0, stations[target].0)
            {
                hops[source] = next_hops;
                queue.push_back(source);
            }
        }
    }
    hops
}

/// Minimum number of hops from `start` to `goal`.
pub fn min_hops(stations: &[(Position, Range)], start: Position, goal: Position) -> Option<usize> {
    let hops = hops_to_goal(stations, start, goal);
    let start_idx = stations
        .iter()
        .position(|(station, _)| *station == start)
        .expect("start present");
    hops[start_idx]
}

/// The minimum-hop route that is smallest when compared stop by stop in
/// visiting order.
pub fn smallest_route(
    stations: &[(Position, Range)],
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    let hops = hops_to_goal(stations, start, goal);
    let total = min_hops(stations, start, goal)?;

    let mut route = vec![start];
    let mut current = start;
    for taken in 1..=total {
        let remaining = total - taken;
        current = stations
            .iter()
            .zip(&hops)
            .filter(|(_, hops)| **hops == Some(remaining))
            .map(|((station, _), _)| *station)
            .filter(|&station| hop_allowed(stations, start, goal, current, station))
            .min()
            .expect("a stop on a minimum-hop route always has a successor");
        route.push(current);
    }
    Some(route)
}
