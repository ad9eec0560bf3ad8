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
use crate::time::{DateTime, PositiveDuration};
use crate::transit_data::RoutePoint;

/// Tracks the best label offered at a destination route point, with the
/// egress walk folded in. Its current best bounds the exploration when
/// global pruning is enabled.
#[derive(Debug, Clone)]
pub(crate) struct BestDest {
    pub best_now: Label,
    pub best_now_route_point: Option<RoutePoint>,
    pub count: usize,
    clockwise: bool,
    // egress walking duration (seconds) per destination route point
    egress: Vec<Option<u32>>,
}

impl BestDest {
    pub fn new() -> Self {
        Self {
            best_now: Label::uninitialized(true),
            best_now_route_point: None,
            count: 0,
            clockwise: true,
            egress: Vec::new(),
        }
    }

    pub fn reinit(&mut self, nb_of_route_points: usize, bound: DateTime, clockwise: bool) {
        self.best_now = Label::uninitialized(clockwise);
        if clockwise {
            self.best_now.arrival = bound;
        } else {
            self.best_now.departure = bound;
        }
        self.best_now_route_point = None;
        self.count = 0;
        self.clockwise = clockwise;
        self.egress.clear();
        self.egress.resize(nb_of_route_points, None);
    }

    pub fn add_destination(&mut self, route_point: RoutePoint, egress_seconds: u32) {
        self.egress[route_point.idx] = Some(egress_seconds);
    }

    pub fn has_reached_destination(&self) -> bool {
        self.best_now.is_initialized()
    }

    /// Offers a label stored at `route_point` during `round`. Returns `true`
    /// when the route point is a registered destination : the offer is then
    /// absorbed here (a destination needs no onward marking), improving the
    /// retained best when the egress-adjusted instant beats it.
    pub fn offer(&mut self, route_point: RoutePoint, label: &Label, round: usize) -> bool {
        let egress_seconds = match self.egress[route_point.idx] {
            None => return false,
            Some(seconds) => seconds,
        };
        let egress = PositiveDuration::from_seconds(egress_seconds);
        // meeting the initial bound exactly is a hit ; between two real
        // labels only a strict improvement wins, so ties keep the fewest
        // transfers
        let exact_hit = !self.best_now.is_initialized();
        if self.clockwise {
            let candidate = label.arrival + egress;
            if candidate < self.best_now.arrival || (exact_hit && candidate == self.best_now.arrival)
            {
                self.best_now = *label;
                self.best_now.arrival = candidate;
                self.best_now_route_point = Some(route_point);
                self.count = round;
            }
        } else {
            let candidate = label.departure - egress;
            if candidate > self.best_now.departure
                || (exact_hit && candidate == self.best_now.departure)
            {
                self.best_now = *label;
                self.best_now.departure = candidate;
                self.best_now_route_point = Some(route_point);
                self.count = round;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DateTime;

    fn vehicle_like_label(arrival: DateTime) -> Label {
        let mut label = Label::uninitialized(true);
        label.kind = super::super::raptor::LabelKind::Connection;
        label.arrival = arrival;
        label.departure = arrival;
        label
    }

    #[test]
    fn offer_is_absorbed_only_at_destinations() {
        let mut best_dest = BestDest::new();
        best_dest.reinit(3, DateTime::INF, true);
        best_dest.add_destination(RoutePoint { idx: 1 }, 60);

        let label = vehicle_like_label(DateTime::new(0, 8 * 3600));
        assert!(!best_dest.offer(RoutePoint { idx: 0 }, &label, 1));
        assert!(best_dest.offer(RoutePoint { idx: 1 }, &label, 1));
        assert!(best_dest.has_reached_destination());
        assert_eq!(best_dest.best_now.arrival, DateTime::new(0, 8 * 3600 + 60));
        assert_eq!(best_dest.count, 1);
    }

    #[test]
    fn offer_keeps_the_best_egress_adjusted_instant() {
        let mut best_dest = BestDest::new();
        best_dest.reinit(2, DateTime::INF, true);
        best_dest.add_destination(RoutePoint { idx: 0 }, 0);
        best_dest.add_destination(RoutePoint { idx: 1 }, 600);

        let early = vehicle_like_label(DateTime::new(0, 8 * 3600));
        let late = vehicle_like_label(DateTime::new(0, 9 * 3600));
        assert!(best_dest.offer(RoutePoint { idx: 1 }, &early, 1));
        assert!(best_dest.offer(RoutePoint { idx: 0 }, &late, 2));
        // 9:00 with no egress does not beat 8:00 + 10 minutes
        assert_eq!(best_dest.best_now_route_point, Some(RoutePoint { idx: 1 }));
        assert_eq!(best_dest.count, 1);
    }

    #[test]
    fn offer_accepts_an_exact_hit_on_the_initial_bound() {
        let mut best_dest = BestDest::new();
        best_dest.reinit(1, DateTime::new(0, 8 * 3600), true);
        best_dest.add_destination(RoutePoint { idx: 0 }, 0);

        let label = vehicle_like_label(DateTime::new(0, 8 * 3600));
        assert!(best_dest.offer(RoutePoint { idx: 0 }, &label, 1));
        assert!(best_dest.has_reached_destination());

        // once initialized, an equal offer no longer displaces the best
        let other = vehicle_like_label(DateTime::new(0, 8 * 3600));
        assert!(best_dest.offer(RoutePoint { idx: 0 }, &other, 2));
        assert_eq!(best_dest.count, 1);
    }

    #[test]
    fn counter_clockwise_offer_maximizes_departure() {
        let mut best_dest = BestDest::new();
        best_dest.reinit(2, DateTime::MIN, false);
        best_dest.add_destination(RoutePoint { idx: 0 }, 120);

        let mut label = Label::uninitialized(false);
        label.kind = super::super::raptor::LabelKind::Connection;
        label.departure = DateTime::new(0, 10 * 3600);
        assert!(best_dest.offer(RoutePoint { idx: 0 }, &label, 1));
        assert_eq!(
            best_dest.best_now.departure,
            DateTime::new(0, 10 * 3600 - 120)
        );
    }
}
