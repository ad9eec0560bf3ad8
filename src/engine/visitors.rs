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

use super::raptor::{Label, LabelKind};
use crate::time::DateTime;
use crate::transit_data::{Route, RoutePoint, StopTime, StopTimeData, TransitData, VehicleJourney};

/// The capability set distinguishing the two time directions of the round
/// loop. `Forward` minimizes arrival times (clockwise search), `Backward`
/// maximizes departure times. Everything else in the engine is polymorphic
/// over this trait ; both implementors are unit types so calls dispatch
/// statically.
pub(crate) trait Visitor {
    const CLOCKWISE: bool;

    const QUEUE_SENTINEL: i32;

    /// The worst possible instant in this direction.
    fn worst() -> DateTime;

    /// Strict improvement between two instants.
    fn better(a: DateTime, b: DateTime) -> bool;

    /// The instant a label is compared on : arrival forward, departure
    /// backward.
    fn instant(label: &Label) -> DateTime;

    /// Moves an instant away by `seconds`, in journey direction.
    fn combine(instant: DateTime, seconds: u32) -> DateTime;

    /// Rolls a working datetime onto a seconds-of-day, in journey direction.
    fn roll(instant: &mut DateTime, seconds: u32);

    /// The stop-time instant recorded by the route scan : arrival forward,
    /// departure backward.
    fn stored_seconds(stop_time: &StopTimeData) -> u32;

    /// The stop-time instant at which a vehicle is boarded : departure
    /// forward, arrival backward.
    fn boarding_seconds(stop_time: &StopTimeData) -> u32;

    /// Whether a journey may leave the vehicle here : drop-off forward,
    /// pick-up backward.
    fn can_alight(stop_time: &StopTimeData) -> bool;

    /// Strict improvement between route point orders in the queue.
    fn better_order(a: i32, b: i32) -> bool;

    /// The next stop time of the current trip along the scan.
    fn advance(stop_time_idx: usize) -> usize;

    /// Whether the previous-round label at a stop time still allows catching
    /// another trip there.
    fn catchable(previous: &Label, working: DateTime, stop_time: &StopTimeData) -> bool;

    fn best_trip(
        data: &TransitData,
        route: Route,
        order: usize,
        instant: DateTime,
    ) -> Option<VehicleJourney>;

    /// Route point orders visited by the scan, from the first marked one.
    fn scan_orders(from: usize, route_len: usize) -> OrderIter;

    /// The label stored when alighting from a vehicle : the scanned instant,
    /// its dual rolled onto the same date, and the boarding route point.
    fn vehicle_label(
        stop_time: StopTime,
        stop_time_data: &StopTimeData,
        instant: DateTime,
        boarding: RoutePoint,
    ) -> Label;
}

pub(crate) struct Forward;

pub(crate) struct Backward;

impl Visitor for Forward {
    const CLOCKWISE: bool = true;

    const QUEUE_SENTINEL: i32 = i32::MAX;

    fn worst() -> DateTime {
        DateTime::INF
    }

    fn better(a: DateTime, b: DateTime) -> bool {
        a < b
    }

    fn instant(label: &Label) -> DateTime {
        label.arrival
    }

    fn combine(instant: DateTime, seconds: u32) -> DateTime {
        instant + crate::time::PositiveDuration::from_seconds(seconds)
    }

    fn roll(instant: &mut DateTime, seconds: u32) {
        instant.update(seconds);
    }

    fn stored_seconds(stop_time: &StopTimeData) -> u32 {
        stop_time.arrival_time
    }

    fn boarding_seconds(stop_time: &StopTimeData) -> u32 {
        stop_time.departure_time
    }

    fn can_alight(stop_time: &StopTimeData) -> bool {
        stop_time.drop_off_allowed
    }

    fn better_order(a: i32, b: i32) -> bool {
        a < b
    }

    fn advance(stop_time_idx: usize) -> usize {
        stop_time_idx + 1
    }

    fn catchable(previous: &Label, working: DateTime, stop_time: &StopTimeData) -> bool {
        previous.arrival <= DateTime::new(working.date(), stop_time.departure_time)
    }

    fn best_trip(
        data: &TransitData,
        route: Route,
        order: usize,
        instant: DateTime,
    ) -> Option<VehicleJourney> {
        data.earliest_trip(route, order, instant)
    }

    fn scan_orders(from: usize, route_len: usize) -> OrderIter {
        OrderIter {
            next: from as i64,
            end: route_len as i64,
            step: 1,
        }
    }

    fn vehicle_label(
        stop_time: StopTime,
        stop_time_data: &StopTimeData,
        instant: DateTime,
        boarding: RoutePoint,
    ) -> Label {
        let mut departure = instant;
        departure.update(stop_time_data.departure_time);
        Label {
            arrival: instant,
            departure,
            kind: LabelKind::Vehicle,
            stop_time: Some(stop_time),
            boarding: Some(boarding),
        }
    }
}

impl Visitor for Backward {
    const CLOCKWISE: bool = false;

    const QUEUE_SENTINEL: i32 = -1;

    fn worst() -> DateTime {
        DateTime::MIN
    }

    fn better(a: DateTime, b: DateTime) -> bool {
        a > b
    }

    fn instant(label: &Label) -> DateTime {
        label.departure
    }

    fn combine(instant: DateTime, seconds: u32) -> DateTime {
        instant - crate::time::PositiveDuration::from_seconds(seconds)
    }

    fn roll(instant: &mut DateTime, seconds: u32) {
        instant.update_reverse(seconds);
    }

    fn stored_seconds(stop_time: &StopTimeData) -> u32 {
        stop_time.departure_time
    }

    fn boarding_seconds(stop_time: &StopTimeData) -> u32 {
        stop_time.arrival_time
    }

    fn can_alight(stop_time: &StopTimeData) -> bool {
        stop_time.pick_up_allowed
    }

    fn better_order(a: i32, b: i32) -> bool {
        a > b
    }

    fn advance(stop_time_idx: usize) -> usize {
        stop_time_idx - 1
    }

    fn catchable(previous: &Label, working: DateTime, stop_time: &StopTimeData) -> bool {
        previous.departure >= DateTime::new(working.date(), stop_time.arrival_time)
    }

    fn best_trip(
        data: &TransitData,
        route: Route,
        order: usize,
        instant: DateTime,
    ) -> Option<VehicleJourney> {
        data.tardiest_trip(route, order, instant)
    }

    fn scan_orders(from: usize, _route_len: usize) -> OrderIter {
        OrderIter {
            next: from as i64,
            end: -1,
            step: -1,
        }
    }

    fn vehicle_label(
        stop_time: StopTime,
        stop_time_data: &StopTimeData,
        instant: DateTime,
        boarding: RoutePoint,
    ) -> Label {
        let mut arrival = instant;
        arrival.update_reverse(stop_time_data.arrival_time);
        Label {
            arrival,
            departure: instant,
            kind: LabelKind::Vehicle,
            stop_time: Some(stop_time),
            boarding: Some(boarding),
        }
    }
}

/// Route point orders visited by a scan, in route direction.
pub(crate) struct OrderIter {
    next: i64,
    end: i64,
    step: i64,
}

impl Iterator for OrderIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == self.end {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(current as usize)
    }
}
