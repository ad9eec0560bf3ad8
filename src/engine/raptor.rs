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

use super::best_dest::BestDest;
use super::init::Departure;
use super::visitors::Visitor;
use crate::config::RequestParams;
use crate::filters::Filters;
use crate::time::DateTime;
use crate::transit_data::{
    ConnectionKind, Route, RoutePoint, StopPoint, StopTime, TransitData, VehicleJourney,
};
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelKind {
    Uninitialized,
    /// Seeded at an origin route point before the first round.
    Departure,
    /// Alighted from a vehicle here.
    Vehicle,
    /// Reached by a generic walking transfer.
    Connection,
    /// Reached by a same-vehicle continuation edge.
    ConnectionExtension,
    /// Reached by an operator-guaranteed transfer edge.
    ConnectionGuarantee,
}

/// The value computed for one (round, route point) : the instants there and
/// how they were obtained. For a `Vehicle` label, `stop_time` is the stop
/// time alighted from and `boarding` the route point where the vehicle was
/// boarded ; for connection kinds, `boarding` is the route point the
/// connection comes from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Label {
    pub arrival: DateTime,
    pub departure: DateTime,
    pub kind: LabelKind,
    pub stop_time: Option<StopTime>,
    pub boarding: Option<RoutePoint>,
}

impl Label {
    pub fn uninitialized(clockwise: bool) -> Self {
        let instant = if clockwise {
            DateTime::INF
        } else {
            DateTime::MIN
        };
        Self {
            arrival: instant,
            departure: instant,
            kind: LabelKind::Uninitialized,
            stop_time: None,
            boarding: None,
        }
    }

    pub fn departure_seed(datetime: DateTime) -> Self {
        Self {
            arrival: datetime,
            departure: datetime,
            kind: LabelKind::Departure,
            stop_time: None,
            boarding: None,
        }
    }

    pub fn connection(kind: LabelKind, datetime: DateTime, from: RoutePoint) -> Self {
        debug_assert!(matches!(
            kind,
            LabelKind::Connection | LabelKind::ConnectionExtension | LabelKind::ConnectionGuarantee
        ));
        Self {
            arrival: datetime,
            departure: datetime,
            kind,
            stop_time: None,
            boarding: Some(from),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.kind != LabelKind::Uninitialized
    }
}

// boarding state while scanning one route
struct Onboard {
    trip: VehicleJourney,
    boarding: RoutePoint,
    // current position in the flat stop_times array
    cursor: usize,
}

/// The engine. Owns every piece of per-query mutable state ; the timetable
/// view is shared by reference and never written.
pub struct Raptor<'data> {
    pub(crate) data: &'data TransitData,
    pub(crate) params: RequestParams,

    // labels[round][route_point]
    pub(crate) labels: Vec<Vec<Label>>,
    pub(crate) best: Vec<Label>,

    // earliest (forward) or latest (backward) marked order per route
    pub(crate) queue: Vec<i32>,
    marked_route_points: FixedBitSet,
    marked_stop_points: FixedBitSet,

    pub(crate) best_dest: BestDest,
    valid_routes: FixedBitSet,

    // current round
    pub(crate) count: usize,

    seed_labels_forward: Vec<Label>,
    seed_labels_backward: Vec<Label>,
}

impl<'data> Raptor<'data> {
    pub fn new(data: &'data TransitData) -> Self {
        Self::with_params(data, RequestParams::default())
    }

    pub fn with_params(data: &'data TransitData, params: RequestParams) -> Self {
        let nb_of_route_points = data.nb_of_route_points();
        Self {
            data,
            params,
            labels: Vec::new(),
            best: Vec::new(),
            queue: vec![i32::MAX; data.nb_of_routes()],
            marked_route_points: FixedBitSet::with_capacity(nb_of_route_points),
            marked_stop_points: FixedBitSet::with_capacity(data.nb_of_stop_points()),
            best_dest: BestDest::new(),
            valid_routes: FixedBitSet::with_capacity(data.nb_of_routes()),
            count: 0,
            seed_labels_forward: vec![Label::uninitialized(true); nb_of_route_points],
            seed_labels_backward: vec![Label::uninitialized(false); nb_of_route_points],
        }
    }

    pub fn nb_of_rounds(&self) -> usize {
        self.count
    }

    /// Routes worth scanning : not forbidden, and served by at least one
    /// vehicle journey within one day of `date`.
    pub(crate) fn set_valid_routes(&mut self, date: u16, forbidden: &Filters<'_>) {
        self.set_valid_routes_for_dates(&[date], forbidden);
    }

    /// Multi-datetime variant : a route is kept when it runs around any of
    /// the requested dates.
    pub(crate) fn set_valid_routes_for_dates(&mut self, dates: &[u16], forbidden: &Filters<'_>) {
        self.valid_routes.clear();
        for route_idx in 0..self.data.nb_of_routes() {
            let route = Route { idx: route_idx };
            if forbidden.is_route_forbidden(route, self.data) {
                continue;
            }
            if dates
                .iter()
                .any(|date| self.data.is_route_running_around(route, *date))
            {
                self.valid_routes.insert(route_idx);
            }
        }
    }

    fn seed_labels<V: Visitor>(&self) -> Vec<Label> {
        if V::CLOCKWISE {
            self.seed_labels_forward.clone()
        } else {
            self.seed_labels_backward.clone()
        }
    }

    /// Resets the per-query state and seeds round 0, the queue and the
    /// destination tracker. With `clear == false` the label tensor and the
    /// destination tracker survive from the previous pass, and only the
    /// seeds are written (multi-datetime label reuse).
    pub(crate) fn clear_and_init<V: Visitor>(
        &mut self,
        departures: &[Departure],
        destinations: &[(StopPoint, f64)],
        bound: DateTime,
        clear: bool,
    ) {
        let data = self.data;

        for item in self.queue.iter_mut() {
            *item = V::QUEUE_SENTINEL;
        }
        self.marked_route_points.clear();
        self.marked_stop_points.clear();

        let bound = if !V::CLOCKWISE && bound == DateTime::INF {
            DateTime::MIN
        } else {
            bound
        };

        if clear {
            let seeds = self.seed_labels::<V>();
            self.labels.clear();
            self.best = seeds.clone();
            self.labels.push(seeds);
            self.best_dest
                .reinit(data.nb_of_route_points(), bound, V::CLOCKWISE);
        }

        for departure in departures {
            let route_point = departure.route_point;
            let label = Label::departure_seed(departure.datetime);
            self.labels[0][route_point.idx] = label;
            self.best[route_point.idx] = label;
            let route_point_data = data.route_point_data(route_point);
            let order = route_point_data.order as i32;
            if V::better_order(order, self.queue[route_point_data.route.idx]) {
                self.queue[route_point_data.route.idx] = order;
            }
            if !departure.datetime.is_sentinel() {
                self.marked_stop_points.insert(route_point_data.stop_point.idx);
            }
        }

        for (stop_point, distance) in destinations {
            let egress_seconds = self.params.walking_duration(*distance);
            for route_point in data.stop_points[stop_point.idx].route_point_list.iter() {
                let route = data.route_point_data(*route_point).route;
                if !self.valid_routes.contains(route.idx) {
                    continue;
                }
                let best = &mut self.best[route_point.idx];
                if V::CLOCKWISE && (bound == DateTime::INF || best.arrival > bound) {
                    self.best_dest.add_destination(*route_point, egress_seconds);
                    best.arrival = bound;
                } else if !V::CLOCKWISE && (bound == DateTime::MIN || best.departure < bound) {
                    self.best_dest.add_destination(*route_point, egress_seconds);
                    best.departure = bound;
                }
            }
        }
    }

    fn make_queue(&mut self) {
        self.marked_route_points.clear();
        self.marked_stop_points.clear();
    }

    fn one_more_step<V: Visitor>(&mut self) {
        let seeds = self.seed_labels::<V>();
        self.labels.push(seeds);
    }

    /// One full multi-round computation : initial footpath closure, then
    /// rounds of route scan + connection relax + footpath relax until a
    /// round stores nothing new.
    pub(crate) fn raptor_loop<V: Visitor>(&mut self, global_pruning: bool) {
        let data = self.data;
        self.count = 0;
        self.walking::<V>();

        let mut end = false;
        while !end {
            self.count += 1;
            end = true;
            if self.count == self.labels.len() {
                self.one_more_step::<V>();
            }
            self.make_queue();

            for route_idx in 0..data.nb_of_routes() {
                let first_order = self.queue[route_idx];
                if first_order != i32::MAX
                    && first_order != -1
                    && self.valid_routes.contains(route_idx)
                {
                    let route = Route { idx: route_idx };
                    end = self.scan_route::<V>(route, first_order as usize, global_pruning) && end;
                }
                self.queue[route_idx] = V::QUEUE_SENTINEL;
            }

            self.relax_connections::<V>();
            self.walking::<V>();
        }
    }

    /// Scans one route from its first marked order, riding the best catchable
    /// trip and storing improvements along the way. Returns `false` when a
    /// store marked something for the next round.
    fn scan_route<V: Visitor>(
        &mut self,
        route: Route,
        first_order: usize,
        global_pruning: bool,
    ) -> bool {
        let data = self.data;
        let route_data = data.route_data(route);
        let mut done = true;

        let mut onboard: Option<Onboard> = None;
        let mut working_dt = V::worst();
        let mut local_zone: Option<u32> = None;

        for order in V::scan_orders(first_order, route_data.route_point_list.len()) {
            let route_point = route_data.route_point_list[order];

            if let Some(onboard_state) = onboard.as_mut() {
                onboard_state.cursor = V::advance(onboard_state.cursor);
                let stop_time = StopTime {
                    idx: onboard_state.cursor,
                };
                let boarding = onboard_state.boarding;
                let stop_time_data = data.stop_time_data(stop_time);
                if local_zone.is_none() || local_zone != stop_time_data.local_traffic_zone {
                    // store, and mark for the next round
                    let best = self.best[route_point.idx];
                    let bound = if !global_pruning
                        || V::better(V::instant(&best), V::instant(&self.best_dest.best_now))
                    {
                        best
                    } else {
                        self.best_dest.best_now
                    };
                    done = self.store_better::<V>(
                        route_point,
                        &mut working_dt,
                        bound,
                        stop_time,
                        boarding,
                    ) && done;
                }
            }

            // can the previous round reach this stop early enough to catch
            // another trip ?
            let previous = self.labels[self.count - 1][route_point.idx];
            let catchable = previous.is_initialized()
                && match onboard.as_ref() {
                    None => true,
                    Some(onboard_state) => {
                        let stop_time_data = data.stop_time_data(StopTime {
                            idx: onboard_state.cursor,
                        });
                        V::catchable(&previous, working_dt, stop_time_data)
                    }
                };
            if catchable {
                if let Some(trip) = V::best_trip(data, route, order, V::instant(&previous)) {
                    if onboard.as_ref().map(|onboard_state| onboard_state.trip) != Some(trip) {
                        let first_stop_time = data.stop_time_at(trip, order);
                        let stop_time_data = data.stop_time_data(first_stop_time);
                        working_dt = V::instant(&previous);
                        V::roll(&mut working_dt, V::boarding_seconds(stop_time_data));
                        local_zone = stop_time_data.local_traffic_zone;
                        onboard = Some(Onboard {
                            trip,
                            boarding: route_point,
                            cursor: first_stop_time.idx,
                        });
                    }
                }
            }
        }

        done
    }

    /// Tries to store a better label at `route_point`. Returns `false` when
    /// the stored label marked the route point for further relaxation.
    fn store_better<V: Visitor>(
        &mut self,
        route_point: RoutePoint,
        working_dt: &mut DateTime,
        bound: Label,
        stop_time: StopTime,
        boarding: RoutePoint,
    ) -> bool {
        let stop_time_data = self.data.stop_time_data(stop_time);
        V::roll(working_dt, V::stored_seconds(stop_time_data));

        if V::better(*working_dt, V::instant(&bound)) && V::can_alight(stop_time_data) {
            let label = V::vehicle_label(stop_time, stop_time_data, *working_dt, boarding);
            self.labels[self.count][route_point.idx] = label;
            self.best[route_point.idx] = label;
            if !self.best_dest.offer(route_point, &label, self.count) {
                self.marked_route_points.insert(route_point.idx);
                self.marked_stop_points
                    .insert(self.data.route_point_data(route_point).stop_point.idx);
                return false;
            }
        } else if *working_dt == V::instant(&bound)
            && !self.labels[self.count - 1][route_point.idx].is_initialized()
        {
            // a tie is recorded only when it represents a genuinely new
            // transfer count, and only at a destination
            let label = V::vehicle_label(stop_time, stop_time_data, *working_dt, boarding);
            if self.best_dest.offer(route_point, &label, self.count) {
                self.labels[self.count][route_point.idx] = label;
                self.best[route_point.idx] = label;
            }
        }
        true
    }

    /// Relaxes the guaranteed / extension connections of every route point
    /// marked by this round's scan. These edges carry no boarding slack.
    fn relax_connections<V: Visitor>(&mut self) {
        let data = self.data;
        let mut to_mark: Vec<RoutePoint> = Vec::new();

        let marked: Vec<usize> = self.marked_route_points.ones().collect();
        for route_point_idx in marked {
            let label = self.labels[self.count][route_point_idx];
            if label.kind != LabelKind::Vehicle {
                continue;
            }
            let route_point = RoutePoint {
                idx: route_point_idx,
            };
            let connections = if V::CLOCKWISE {
                data.outgoing_connections(route_point)
            } else {
                data.incoming_connections(route_point)
            };
            for connection in connections {
                let datetime = V::combine(label.arrival, connection.length);
                let destination = connection.destination;
                if V::better(datetime, self.best[destination.idx].arrival) {
                    let kind = match connection.kind {
                        ConnectionKind::Extension => LabelKind::ConnectionExtension,
                        ConnectionKind::Guarantee => LabelKind::ConnectionGuarantee,
                    };
                    let new_label = Label::connection(kind, datetime, route_point);
                    self.labels[self.count][destination.idx] = new_label;
                    self.best[destination.idx] = new_label;
                    to_mark.push(destination);
                }
            }
        }

        for route_point in to_mark {
            self.marked_route_points.insert(route_point.idx);
            let route_point_data = data.route_point_data(route_point);
            let order = route_point_data.order as i32;
            if V::better_order(order, self.queue[route_point_data.route.idx]) {
                self.queue[route_point_data.route.idx] = order;
            }
        }
    }

    /// Transfer closure over the marked stop points : same-stop transfers
    /// with the boarding slack, then the outgoing footpaths. Stop points are
    /// visited in ascending index order, as the footpath slices expect.
    fn walking<V: Visitor>(&mut self) {
        let data = self.data;
        let transfer_slack = self.params.transfer_waiting_time.total_seconds() as u32;

        let marked: Vec<usize> = self.marked_stop_points.ones().collect();
        for stop_point_idx in marked {
            // the best route point of this stop point in the current round
            let mut best_instant = V::worst();
            let mut has_best: Option<RoutePoint> = None;
            for route_point in data.stop_points[stop_point_idx].route_point_list.iter() {
                let label = &self.labels[self.count][route_point.idx];
                if (label.kind == LabelKind::Vehicle || label.kind == LabelKind::Departure)
                    && V::better(label.arrival, best_instant)
                {
                    best_instant = label.arrival;
                    has_best = Some(*route_point);
                }
            }
            let best_route_point = match has_best {
                None => continue,
                Some(route_point) => route_point,
            };

            // mark the sibling route points of the stop point
            let best_departure = V::combine(best_instant, transfer_slack);
            for route_point in data.stop_points[stop_point_idx].route_point_list.iter() {
                if *route_point != best_route_point
                    && V::better(best_departure, V::instant(&self.best[route_point.idx]))
                {
                    let label =
                        Label::connection(LabelKind::Connection, best_departure, best_route_point);
                    self.best[route_point.idx] = label;
                    self.labels[self.count][route_point.idx] = label;
                    let route_point_data = data.route_point_data(*route_point);
                    let order = route_point_data.order as i32;
                    if !self.best_dest.offer(*route_point, &label, self.count)
                        && V::better_order(order, self.queue[route_point_data.route.idx])
                    {
                        self.queue[route_point_data.route.idx] = order;
                    }
                }
            }

            // then relax the outgoing footpaths of the stop point
            let previous = V::instant(&self.labels[self.count][best_route_point.idx]);
            // recomputing the combined instant is skipped while consecutive
            // footpaths share the same duration
            let mut prec_duration: Option<u32> = None;
            let mut next = V::worst();
            for footpath in data.footpaths_of_stop_point(StopPoint {
                idx: stop_point_idx,
            }) {
                for route_point in data.stop_points[footpath.destination.idx]
                    .route_point_list
                    .iter()
                {
                    if best_route_point == *route_point {
                        continue;
                    }
                    if prec_duration != Some(footpath.duration) {
                        next = V::combine(previous, footpath.duration);
                        prec_duration = Some(footpath.duration);
                    }
                    let best_at_destination = V::instant(&self.best[route_point.idx]);
                    // ties are admitted so that later rounds can pivot here
                    if V::better(next, best_at_destination) || next == best_at_destination {
                        let label =
                            Label::connection(LabelKind::Connection, next, best_route_point);
                        self.best[route_point.idx] = label;
                        self.labels[self.count][route_point.idx] = label;
                        let route_point_data = data.route_point_data(*route_point);
                        let order = route_point_data.order as i32;
                        if !self.best_dest.offer(*route_point, &label, self.count)
                            && V::better_order(order, self.queue[route_point_data.route.idx])
                        {
                            self.queue[route_point_data.route.idx] = order;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::init;
    use crate::engine::visitors::Forward;
    use crate::modelbuilder::TransitDataBuilder;
    use crate::time::DateTime;

    // two routes joined by a walk, so that the search needs two rounds
    fn two_legged_data() -> crate::transit_data::TransitData {
        TransitDataBuilder::new("2020-01-01", "2020-01-02")
            .vj("route_1", |vj| {
                vj.st("A", "08:00:00", "08:00:00")
                    .st("P", "08:15:00", "08:15:00");
            })
            .vj("route_2", |vj| {
                vj.st("Q", "08:20:00", "08:20:00")
                    .st("D", "08:40:00", "08:40:00");
            })
            .footpath("P", "Q", "00:02:00")
            .footpath("Q", "P", "00:02:00")
            .build()
    }

    fn run_forward(
        engine: &mut Raptor<'_>,
        departs: &[(StopPoint, f64)],
        destinations: &[(StopPoint, f64)],
        datetime: DateTime,
        global_pruning: bool,
    ) {
        let departures = init::departures(engine.data, departs, datetime, true, &engine.params);
        engine.set_valid_routes(datetime.date(), &crate::filters::Filters::empty());
        engine.clear_and_init::<Forward>(&departures, destinations, DateTime::INF, true);
        engine.raptor_loop::<Forward>(global_pruning);
    }

    #[test]
    fn labels_improve_with_rounds_and_best_dominates() {
        let data = two_legged_data();
        let departs = vec![(data.stop_point_by_code("A").unwrap(), 0.0)];
        let destinations = vec![(data.stop_point_by_code("D").unwrap(), 0.0)];
        let mut engine = Raptor::new(&data);
        run_forward(
            &mut engine,
            &departs,
            &destinations,
            DateTime::new(0, 7 * 3600),
            true,
        );

        assert!(engine.best_dest.has_reached_destination());
        for route_point_idx in 0..data.nb_of_route_points() {
            let mut previous: Option<DateTime> = None;
            for round in 0..engine.labels.len() {
                let label = &engine.labels[round][route_point_idx];
                if !label.is_initialized() {
                    continue;
                }
                if let Some(previous) = previous {
                    assert!(label.arrival <= previous);
                }
                previous = Some(label.arrival);
                assert!(engine.best[route_point_idx].arrival <= label.arrival);
            }
        }
    }

    #[test]
    fn global_pruning_does_not_change_the_destination_bound() {
        let data = two_legged_data();
        let departs = vec![(data.stop_point_by_code("A").unwrap(), 0.0)];
        let destinations = vec![(data.stop_point_by_code("D").unwrap(), 0.0)];
        let datetime = DateTime::new(0, 7 * 3600);

        let mut pruned = Raptor::new(&data);
        run_forward(&mut pruned, &departs, &destinations, datetime, true);
        let mut unpruned = Raptor::new(&data);
        run_forward(&mut unpruned, &departs, &destinations, datetime, false);

        assert!(pruned.best_dest.has_reached_destination());
        assert!(unpruned.best_dest.has_reached_destination());
        assert_eq!(
            pruned.best_dest.best_now.arrival,
            unpruned.best_dest.best_now.arrival
        );
        assert_eq!(pruned.best_dest.count, unpruned.best_dest.count);
    }
}
