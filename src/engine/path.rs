// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use super::raptor::{LabelKind, Raptor};
use crate::response::{Path, PathItem, PathItemType};
use crate::time::{DateTime, PositiveDuration};
use crate::transit_data::{RoutePoint, StopPoint, StopTime};

impl<'data> Raptor<'data> {
    /// Walks the labels back from `destination` at `round` and emits the
    /// journey as typed items. A forward-pass reconstruction walks backward
    /// in time, so its items and their inner sequences are reversed at the
    /// end ; a backward-pass reconstruction is chronological as emitted.
    pub(crate) fn make_path(&self, destination: RoutePoint, round: usize, reverse: bool) -> Path {
        let data = self.data;
        let mut items: Vec<PathItem> = Vec::new();
        let mut current_round = round;
        let mut current = destination;

        loop {
            let label = self.labels[current_round][current.idx];
            match label.kind {
                LabelKind::Connection
                | LabelKind::ConnectionExtension
                | LabelKind::ConnectionGuarantee => {
                    let boarding = match label.boarding {
                        Some(route_point) => route_point,
                        None => unreachable!("connection label without origin"),
                    };
                    let origin_label = self.labels[current_round][boarding.idx];
                    let item_type = match label.kind {
                        LabelKind::Connection => PathItemType::Walking,
                        LabelKind::ConnectionExtension => PathItemType::Extension,
                        _ => PathItemType::Guarantee,
                    };
                    let (departure, arrival) = if reverse {
                        (label.departure, origin_label.arrival)
                    } else {
                        (origin_label.arrival, label.departure)
                    };
                    let mut item = PathItem::walking(item_type, departure, arrival);
                    item.stop_points
                        .push(data.route_point_data(current).stop_point);
                    item.stop_points
                        .push(data.route_point_data(boarding).stop_point);
                    items.push(item);
                    current = boarding;
                }
                LabelKind::Vehicle => {
                    let boarding = match label.boarding {
                        Some(route_point) => route_point,
                        None => unreachable!("vehicle label without boarding point"),
                    };
                    let mut stop_time = match label.stop_time {
                        Some(stop_time) => stop_time,
                        None => unreachable!("vehicle label without stop time"),
                    };
                    let mut stop_time_data = data.stop_time_data(stop_time);
                    let mut item = PathItem::public_transport(stop_time_data.vehicle_journey);
                    let mut working = if reverse {
                        label.arrival
                    } else {
                        label.departure
                    };

                    while current != boarding {
                        item.stop_points
                            .push(data.route_point_data(current).stop_point);
                        if !reverse {
                            working.update_reverse(stop_time_data.departure_time);
                            item.departures.push(working);
                            working.update_reverse(stop_time_data.arrival_time);
                            item.arrivals.push(working);
                            stop_time = StopTime {
                                idx: stop_time.idx - 1,
                            };
                        } else {
                            working.update(stop_time_data.arrival_time);
                            item.arrivals.push(working);
                            working.update(stop_time_data.departure_time);
                            item.departures.push(working);
                            stop_time = StopTime {
                                idx: stop_time.idx + 1,
                            };
                        }
                        stop_time_data = data.stop_time_data(stop_time);
                        current = stop_time_data.route_point;
                    }

                    // the boarding stop point, with its own instants
                    item.stop_points
                        .push(data.route_point_data(current).stop_point);
                    if !reverse {
                        working.update_reverse(stop_time_data.departure_time);
                        item.departures.push(working);
                        working.update_reverse(stop_time_data.arrival_time);
                        item.arrivals.push(working);
                        item.arrival = item.arrivals[0];
                        item.departure = item.departures[item.departures.len() - 1];
                    } else {
                        working.update(stop_time_data.arrival_time);
                        item.arrivals.push(working);
                        working.update(stop_time_data.departure_time);
                        item.departures.push(working);
                        item.arrival = item.arrivals[item.arrivals.len() - 1];
                        item.departure = item.departures[0];
                    }
                    items.push(item);

                    debug_assert!(current_round > 0);
                    current_round -= 1;
                }
                LabelKind::Departure => break,
                LabelKind::Uninitialized => {
                    debug_assert!(false, "reconstruction reached an uninitialized label");
                    break;
                }
            }
        }

        if !reverse {
            items.reverse();
            for item in &mut items {
                item.stop_points.reverse();
                item.arrivals.reverse();
                item.departures.reverse();
            }
        }

        let duration = match (items.first(), items.last()) {
            (Some(first), Some(last)) => last.arrival - first.departure,
            _ => PositiveDuration::zero(),
        };

        let nb_visited = self
            .best
            .iter()
            .filter(|label| label.is_initialized())
            .count();
        let percent_visited = (100 * nb_visited / data.nb_of_stop_points()) as u32;

        let mut nb_changes = 0;
        if items.len() > 2 {
            for item in &items[1..items.len() - 1] {
                if item.item_type == PathItemType::Walking {
                    nb_changes += 1;
                }
            }
        }

        Path {
            items,
            duration,
            nb_changes,
            percent_visited,
            request_time: None,
        }
    }

    /// One forward reconstruction per round whose best egress-adjusted
    /// arrival among `destinations` meets the running bound, starting from
    /// `bound`. Emits the (arrival, transfers) Pareto front.
    pub(crate) fn make_paths(
        &self,
        destinations: &[(StopPoint, f64)],
        bound: DateTime,
    ) -> Vec<Path> {
        let mut result = Vec::new();
        let mut bound = bound;
        let last_round = self.count.min(self.labels.len().saturating_sub(1));

        for round in 1..=last_round {
            let mut best_route_point: Option<RoutePoint> = None;
            for (stop_point, distance) in destinations {
                let egress = PositiveDuration::from_seconds(self.params.walking_duration(*distance));
                for route_point in self.data.route_points_of_stop_point(*stop_point) {
                    let label = &self.labels[round][route_point.idx];
                    if !label.is_initialized() {
                        continue;
                    }
                    let candidate = label.arrival + egress;
                    if candidate <= bound {
                        bound = candidate;
                        best_route_point = Some(route_point);
                    }
                }
            }
            if let Some(route_point) = best_route_point {
                result.push(self.make_path(route_point, round, false));
            }
        }

        result
    }

    /// The backward dual of `make_paths` : per-round reconstructions whose
    /// best access-adjusted departure does not regress below the running
    /// bound.
    pub(crate) fn make_paths_reverse(
        &self,
        destinations: &[(StopPoint, f64)],
        bound: DateTime,
    ) -> Vec<Path> {
        let mut result = Vec::new();
        let mut bound = bound;
        let last_round = self.count.min(self.labels.len().saturating_sub(1));

        for round in 1..=last_round {
            let mut best_route_point: Option<RoutePoint> = None;
            for (stop_point, distance) in destinations {
                let egress = PositiveDuration::from_seconds(self.params.walking_duration(*distance));
                for route_point in self.data.route_points_of_stop_point(*stop_point) {
                    let label = &self.labels[round][route_point.idx];
                    if !label.is_initialized() {
                        continue;
                    }
                    let candidate = label.departure - egress;
                    if candidate >= bound {
                        bound = candidate;
                        best_route_point = Some(route_point);
                    }
                }
            }
            if let Some(route_point) = best_route_point {
                result.push(self.make_path(route_point, round, true));
            }
        }

        result
    }
}
