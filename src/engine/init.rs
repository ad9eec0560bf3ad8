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

use super::raptor::Label;
use crate::config::RequestParams;
use crate::time::{DateTime, PositiveDuration};
use crate::transit_data::{RoutePoint, StopPoint, TransitData};

/// A round-0 seed : a route point and the instant a journey is there.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Departure {
    pub route_point: RoutePoint,
    pub datetime: DateTime,
}

/// Expands (stop point, access distance) pairs into seeds on every route
/// point of each stop point, the access walk applied in journey direction.
pub(crate) fn departures(
    data: &TransitData,
    stop_points: &[(StopPoint, f64)],
    datetime: DateTime,
    clockwise: bool,
    params: &RequestParams,
) -> Vec<Departure> {
    let mut result = Vec::new();
    for (stop_point, distance) in stop_points {
        let walk = PositiveDuration::from_seconds(params.walking_duration(*distance));
        let seed_datetime = if clockwise {
            datetime + walk
        } else {
            datetime - walk
        };
        for route_point in data.route_points_of_stop_point(*stop_point) {
            result.push(Departure {
                route_point,
                datetime: seed_datetime,
            });
        }
    }
    result
}

/// Seeds for the opposite-direction enumeration passes : for each round of
/// the pass that just ran, the destination route point with the best
/// egress-adjusted instant. One seed per transfer count yields the Pareto
/// front in (instant, transfers).
pub(crate) fn per_round_seeds(
    data: &TransitData,
    labels: &[Vec<Label>],
    count: usize,
    destinations: &[(StopPoint, f64)],
    params: &RequestParams,
    clockwise_pass: bool,
) -> Vec<Departure> {
    let mut result: Vec<Departure> = Vec::new();
    let last_round = count.min(labels.len().saturating_sub(1));

    // labels only improve with rounds, so an additional transfer is worth a
    // seed only when its instant strictly beats every earlier round
    let mut emitted: Option<DateTime> = None;

    for round in 1..=last_round {
        let mut best_candidate: Option<(DateTime, Departure)> = None;
        for (stop_point, distance) in destinations {
            let egress = PositiveDuration::from_seconds(params.walking_duration(*distance));
            for route_point in data.route_points_of_stop_point(*stop_point) {
                let label = &labels[round][route_point.idx];
                if !label.is_initialized() {
                    continue;
                }
                let (candidate, seed_datetime) = if clockwise_pass {
                    (label.arrival + egress, label.arrival)
                } else {
                    (label.departure - egress, label.departure)
                };
                let improves = match best_candidate {
                    None => true,
                    Some((best, _)) => {
                        if clockwise_pass {
                            candidate < best
                        } else {
                            candidate > best
                        }
                    }
                };
                if improves {
                    best_candidate = Some((
                        candidate,
                        Departure {
                            route_point,
                            datetime: seed_datetime,
                        },
                    ));
                }
            }
        }
        if let Some((candidate, departure)) = best_candidate {
            let dominated = match emitted {
                None => false,
                Some(best) => {
                    if clockwise_pass {
                        candidate >= best
                    } else {
                        candidate <= best
                    }
                }
            };
            if !dominated {
                emitted = Some(candidate);
                result.push(departure);
            }
        }
    }

    result
}
