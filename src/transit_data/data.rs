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

use crate::time::Calendar;
use std::collections::BTreeMap;

/// A physical place where a vehicle stops.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct StopPoint {
    pub(crate) idx: usize,
}

/// A group of stop points under a common name.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct StopArea {
    pub(crate) idx: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Line {
    pub(crate) idx: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mode {
    pub(crate) idx: usize,
}

/// An ordered sequence of route points shared by a family of vehicle
/// journeys (a journey pattern).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Route {
    pub(crate) idx: usize,
}

/// A stop point at a specific position within a route. Distinct from the
/// stop point itself : the same stop point appears in as many route points
/// as there are routes passing through it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct RoutePoint {
    pub(crate) idx: usize,
}

/// One concrete trip along a route, running on the days allowed by its
/// validity pattern.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct VehicleJourney {
    pub(crate) idx: usize,
}

/// One (arrival, departure) of a vehicle journey at a route point. The
/// handle indexes the flat `stop_times` array, in which the stop times of a
/// vehicle journey are contiguous and in route order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct StopTime {
    pub(crate) idx: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ValidityPattern {
    pub(crate) idx: usize,
}

#[derive(Debug, Clone)]
pub struct StopPointData {
    pub external_code: String,
    pub stop_area: StopArea,
    pub route_point_list: Vec<RoutePoint>,
}

#[derive(Debug, Clone)]
pub struct StopAreaData {
    pub external_code: String,
    pub stop_point_list: Vec<StopPoint>,
}

#[derive(Debug, Clone)]
pub struct LineData {
    pub external_code: String,
}

#[derive(Debug, Clone)]
pub struct ModeData {
    pub external_code: String,
}

#[derive(Debug, Clone)]
pub struct RouteData {
    pub external_code: String,
    pub line: Line,
    pub mode: Mode,
    // in route order : route_point_list[order] has that `order`
    pub route_point_list: Vec<RoutePoint>,
    // sorted by departure time at the first route point
    pub vehicle_journey_list: Vec<VehicleJourney>,
}

#[derive(Debug, Clone)]
pub struct RoutePointData {
    pub route: Route,
    pub order: usize,
    pub stop_point: StopPoint,
}

#[derive(Debug, Clone)]
pub struct VehicleJourneyData {
    pub validity_pattern: ValidityPattern,
    // contiguous ascending handles into `stop_times`, one per route point
    pub stop_time_list: Vec<StopTime>,
}

#[derive(Debug, Clone)]
pub struct StopTimeData {
    // seconds of day, in [0, SECONDS_PER_DAY)
    pub arrival_time: u32,
    pub departure_time: u32,
    pub vehicle_journey: VehicleJourney,
    pub route_point: RoutePoint,
    pub local_traffic_zone: Option<u32>,
    pub pick_up_allowed: bool,
    pub drop_off_allowed: bool,
}

/// Per-day bitmap of the days a vehicle journey operates.
#[derive(Debug, Clone)]
pub struct ValidityPatternData {
    pub allowed_dates: Vec<bool>,
}

impl ValidityPatternData {
    pub fn check(&self, date: u16) -> bool {
        self.allowed_dates
            .get(date as usize)
            .copied()
            .unwrap_or(false)
    }

    /// True when the pattern fires on `date` or one of its neighbours.
    /// The one-day slop absorbs trips running past midnight.
    pub fn check_around(&self, date: u16) -> bool {
        if date > 0 && self.check(date - 1) {
            return true;
        }
        self.check(date) || self.check(date + 1)
    }
}

/// A pedestrian edge from a stop point towards `destination`.
#[derive(Debug, Clone)]
pub struct FootPath {
    pub destination: StopPoint,
    pub duration: u32, // seconds
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Same physical vehicle continuing on another route.
    Extension,
    /// Operator-guaranteed short transfer.
    Guarantee,
}

/// An edge between two route points that bypasses the generic walking
/// transfer and its boarding slack.
#[derive(Debug, Clone)]
pub struct RoutePointConnection {
    pub destination: RoutePoint,
    pub length: u32, // seconds
    pub kind: ConnectionKind,
}

/// The read-only timetable view the engine computes over. Built upstream
/// (or by `modelbuilder` in tests) and shared by reference across engine
/// instances ; the engine never mutates it.
pub struct TransitData {
    pub calendar: Calendar,

    pub stop_points: Vec<StopPointData>,
    pub stop_areas: Vec<StopAreaData>,
    pub lines: Vec<LineData>,
    pub modes: Vec<ModeData>,
    pub routes: Vec<RouteData>,
    pub route_points: Vec<RoutePointData>,
    pub vehicle_journeys: Vec<VehicleJourneyData>,
    pub stop_times: Vec<StopTimeData>,
    pub validity_patterns: Vec<ValidityPatternData>,

    // flat list sorted by source stop point, indexed by `footpath_index`
    pub foot_paths: Vec<FootPath>,
    // per stop point : (offset, count) into `foot_paths`
    pub footpath_index: Vec<(usize, usize)>,

    // per route point : outgoing (forward pass) / incoming (backward pass)
    pub connections_forward: Vec<Vec<RoutePointConnection>>,
    pub connections_backward: Vec<Vec<RoutePointConnection>>,

    pub(crate) stop_point_codes: BTreeMap<String, StopPoint>,
    pub(crate) stop_area_codes: BTreeMap<String, StopArea>,
}

impl TransitData {
    pub fn stop_point_data(&self, stop_point: StopPoint) -> &StopPointData {
        &self.stop_points[stop_point.idx]
    }

    pub fn stop_area_data(&self, stop_area: StopArea) -> &StopAreaData {
        &self.stop_areas[stop_area.idx]
    }

    pub fn line_data(&self, line: Line) -> &LineData {
        &self.lines[line.idx]
    }

    pub fn mode_data(&self, mode: Mode) -> &ModeData {
        &self.modes[mode.idx]
    }

    pub fn route_data(&self, route: Route) -> &RouteData {
        &self.routes[route.idx]
    }

    pub fn route_point_data(&self, route_point: RoutePoint) -> &RoutePointData {
        &self.route_points[route_point.idx]
    }

    pub fn vehicle_journey_data(&self, vehicle_journey: VehicleJourney) -> &VehicleJourneyData {
        &self.vehicle_journeys[vehicle_journey.idx]
    }

    pub fn stop_time_data(&self, stop_time: StopTime) -> &StopTimeData {
        &self.stop_times[stop_time.idx]
    }

    pub fn validity_pattern_data(&self, validity_pattern: ValidityPattern) -> &ValidityPatternData {
        &self.validity_patterns[validity_pattern.idx]
    }

    pub fn nb_of_stop_points(&self) -> usize {
        self.stop_points.len()
    }

    pub fn nb_of_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn nb_of_route_points(&self) -> usize {
        self.route_points.len()
    }

    pub fn stop_point_by_code(&self, external_code: &str) -> Option<StopPoint> {
        self.stop_point_codes.get(external_code).copied()
    }

    pub fn stop_area_by_code(&self, external_code: &str) -> Option<StopArea> {
        self.stop_area_codes.get(external_code).copied()
    }
}
