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

//! Builder used to easily create a `TransitData` view in tests, with stops,
//! routes and vehicle journeys referenced by name.

use crate::time::{Calendar, PositiveDuration, SECONDS_PER_DAY};
use crate::transit_data::{
    ConnectionKind, FootPath, Line, LineData, Mode, ModeData, Route, RouteData, RoutePoint,
    RoutePointConnection, RoutePointData, StopArea, StopAreaData, StopPoint, StopPointData,
    StopTime, StopTimeData, TransitData, ValidityPattern, ValidityPatternData, VehicleJourney,
    VehicleJourneyData,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

const DEFAULT_CALENDAR_ID: &str = "default_service";
const DEFAULT_MODE_ID: &str = "bus";

struct RouteDraft {
    id: String,
    line_id: String,
    mode_id: String,
}

#[derive(Clone)]
struct StopTimeDraft {
    stop_id: String,
    arrival_time: u32,
    departure_time: u32,
    pick_up_allowed: bool,
    drop_off_allowed: bool,
    local_traffic_zone: Option<u32>,
}

struct VehicleJourneyDraft {
    route_id: String,
    calendar_id: String,
    stops: Vec<StopTimeDraft>,
}

struct ConnectionDraft {
    from: (String, String), // (route id, stop id)
    to: (String, String),
    length: u32,
    kind: ConnectionKind,
}

/// Note: if not explicitly set, all the vehicle journeys will be attached to
/// a default calendar covering the whole validity period.
pub struct TransitDataBuilder {
    start_date: NaiveDate,
    end_date: NaiveDate,
    calendars: BTreeMap<String, BTreeSet<NaiveDate>>,
    routes: Vec<RouteDraft>,
    vehicle_journeys: Vec<VehicleJourneyDraft>,
    transfers: Vec<(String, String, u32)>,
    connections: Vec<ConnectionDraft>,
    stop_areas: Vec<(String, Vec<String>)>,
}

/// Builder used to create and modify a new vehicle journey inside a
/// `TransitDataBuilder::vj` closure.
pub struct VehicleJourneyBuilder<'a> {
    builder: &'a mut TransitDataBuilder,
    vj_idx: usize,
}

impl Default for TransitDataBuilder {
    fn default() -> Self {
        let date = "2020-01-01";
        Self::new(date, date)
    }
}

impl TransitDataBuilder {
    pub fn new(start_validity_period: impl AsDate, end_validity_period: impl AsDate) -> Self {
        let start_date = start_validity_period.as_date();
        let end_date = end_validity_period.as_date();
        assert!(start_date <= end_date);
        Self {
            start_date,
            end_date,
            calendars: BTreeMap::new(),
            routes: Vec::new(),
            vehicle_journeys: Vec::new(),
            transfers: Vec::new(),
            connections: Vec::new(),
            stop_areas: Vec::new(),
        }
    }

    /// Add a new vehicle journey. Its route is created on first use.
    ///
    /// ```
    /// # use raptor::modelbuilder::TransitDataBuilder;
    ///
    /// # fn main() {
    /// let data = TransitDataBuilder::default()
    ///     .vj("route_1", |vj| {
    ///         vj.st("A", "10:00:00", "10:00:30")
    ///             .st("B", "11:00:00", "11:00:30");
    ///     })
    ///     .build();
    /// # }
    /// ```
    pub fn vj<F>(mut self, route_id: &str, mut vj_initer: F) -> Self
    where
        F: FnMut(VehicleJourneyBuilder<'_>),
    {
        if !self.routes.iter().any(|route| route.id == route_id) {
            self.routes.push(RouteDraft {
                id: route_id.to_string(),
                line_id: route_id.to_string(),
                mode_id: DEFAULT_MODE_ID.to_string(),
            });
        }
        self.vehicle_journeys.push(VehicleJourneyDraft {
            route_id: route_id.to_string(),
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            stops: Vec::new(),
        });
        let vj_idx = self.vehicle_journeys.len() - 1;
        let vj_builder = VehicleJourneyBuilder {
            builder: &mut self,
            vj_idx,
        };
        vj_initer(vj_builder);
        self
    }

    /// Add a new route, or change the line / mode of an existing one.
    pub fn route(mut self, id: &str, line_id: &str, mode_id: &str) -> Self {
        if let Some(route) = self.routes.iter_mut().find(|route| route.id == id) {
            route.line_id = line_id.to_string();
            route.mode_id = mode_id.to_string();
        } else {
            self.routes.push(RouteDraft {
                id: id.to_string(),
                line_id: line_id.to_string(),
                mode_id: mode_id.to_string(),
            });
        }
        self
    }

    /// Add a new calendar or change an existing one.
    pub fn calendar(mut self, id: &str, dates: &[impl AsDate]) -> Self {
        let entry = self.calendars.entry(id.to_string()).or_default();
        for date in dates {
            entry.insert(date.as_date());
        }
        self
    }

    /// Add a one-way walking transfer between two stop points.
    pub fn footpath(mut self, from_stop_id: &str, to_stop_id: &str, duration: impl IntoTime) -> Self {
        self.transfers.push((
            from_stop_id.to_string(),
            to_stop_id.to_string(),
            duration.into_time(),
        ));
        self
    }

    /// Add a guaranteed or extension connection between two route points,
    /// each identified by (route id, stop id).
    pub fn connection(
        mut self,
        from: (&str, &str),
        to: (&str, &str),
        length: impl IntoTime,
        kind: ConnectionKind,
    ) -> Self {
        self.connections.push(ConnectionDraft {
            from: (from.0.to_string(), from.1.to_string()),
            to: (to.0.to_string(), to.1.to_string()),
            length: length.into_time(),
            kind,
        });
        self
    }

    /// Group stop points under a named stop area. Stop points not grouped
    /// explicitly each get a stop area of their own.
    pub fn stop_area(mut self, id: &str, stop_ids: &[&str]) -> Self {
        self.stop_areas.push((
            id.to_string(),
            stop_ids.iter().map(|stop| stop.to_string()).collect(),
        ));
        self
    }

    /// Consume the builder to create the transit data view.
    pub fn build(self) -> TransitData {
        let calendar = Calendar::new(self.start_date, self.end_date);

        // stop points, in first-appearance order
        let mut stop_point_codes: BTreeMap<String, StopPoint> = BTreeMap::new();
        let mut stop_point_ids: Vec<String> = Vec::new();
        let intern_stop = |id: &str,
                           codes: &mut BTreeMap<String, StopPoint>,
                           ids: &mut Vec<String>| {
            if let Some(stop_point) = codes.get(id) {
                return *stop_point;
            }
            let stop_point = StopPoint { idx: ids.len() };
            codes.insert(id.to_string(), stop_point);
            ids.push(id.to_string());
            stop_point
        };
        for vehicle_journey in &self.vehicle_journeys {
            for stop in &vehicle_journey.stops {
                intern_stop(&stop.stop_id, &mut stop_point_codes, &mut stop_point_ids);
            }
        }
        for (from, to, _) in &self.transfers {
            intern_stop(from, &mut stop_point_codes, &mut stop_point_ids);
            intern_stop(to, &mut stop_point_codes, &mut stop_point_ids);
        }
        for (_, stops) in &self.stop_areas {
            for stop in stops {
                intern_stop(stop, &mut stop_point_codes, &mut stop_point_ids);
            }
        }

        // stop areas : declared groups first, then singletons
        let mut stop_area_codes: BTreeMap<String, StopArea> = BTreeMap::new();
        let mut stop_areas: Vec<StopAreaData> = Vec::new();
        let mut area_of_stop: Vec<Option<StopArea>> = vec![None; stop_point_ids.len()];
        for (area_id, stops) in &self.stop_areas {
            let stop_area = StopArea {
                idx: stop_areas.len(),
            };
            let members: Vec<StopPoint> = stops.iter().map(|stop| stop_point_codes[stop]).collect();
            for member in &members {
                assert!(
                    area_of_stop[member.idx].is_none(),
                    "stop point in two stop areas"
                );
                area_of_stop[member.idx] = Some(stop_area);
            }
            stop_area_codes.insert(area_id.clone(), stop_area);
            stop_areas.push(StopAreaData {
                external_code: area_id.clone(),
                stop_point_list: members,
            });
        }
        for (stop_idx, stop_id) in stop_point_ids.iter().enumerate() {
            if area_of_stop[stop_idx].is_none() {
                let stop_area = StopArea {
                    idx: stop_areas.len(),
                };
                area_of_stop[stop_idx] = Some(stop_area);
                stop_area_codes.insert(stop_id.clone(), stop_area);
                stop_areas.push(StopAreaData {
                    external_code: stop_id.clone(),
                    stop_point_list: vec![StopPoint { idx: stop_idx }],
                });
            }
        }

        // lines and modes, deduplicated by external code
        let mut lines: Vec<LineData> = Vec::new();
        let mut modes: Vec<ModeData> = Vec::new();
        let mut line_of_code: BTreeMap<String, Line> = BTreeMap::new();
        let mut mode_of_code: BTreeMap<String, Mode> = BTreeMap::new();
        for route in &self.routes {
            line_of_code.entry(route.line_id.clone()).or_insert_with(|| {
                lines.push(LineData {
                    external_code: route.line_id.clone(),
                });
                Line {
                    idx: lines.len() - 1,
                }
            });
            mode_of_code.entry(route.mode_id.clone()).or_insert_with(|| {
                modes.push(ModeData {
                    external_code: route.mode_id.clone(),
                });
                Mode {
                    idx: modes.len() - 1,
                }
            });
        }

        // validity patterns, one per used calendar
        let mut validity_patterns: Vec<ValidityPatternData> = Vec::new();
        let mut pattern_of_calendar: BTreeMap<String, ValidityPattern> = BTreeMap::new();
        let all_days: BTreeSet<NaiveDate> = {
            let mut days = BTreeSet::new();
            let mut date = self.start_date;
            while date <= self.end_date {
                days.insert(date);
                date += chrono::Duration::days(1);
            }
            days
        };
        for vehicle_journey in &self.vehicle_journeys {
            let calendar_id = &vehicle_journey.calendar_id;
            if pattern_of_calendar.contains_key(calendar_id) {
                continue;
            }
            let dates = self
                .calendars
                .get(calendar_id)
                .unwrap_or_else(|| {
                    assert!(
                        calendar_id == DEFAULT_CALENDAR_ID,
                        "unknown calendar `{}`",
                        calendar_id
                    );
                    &all_days
                });
            let mut allowed_dates = vec![false; calendar.nb_of_days() as usize];
            for date in dates {
                if let Some(offset) = calendar.date_to_offset(*date) {
                    allowed_dates[offset as usize] = true;
                }
            }
            pattern_of_calendar.insert(
                calendar_id.clone(),
                ValidityPattern {
                    idx: validity_patterns.len(),
                },
            );
            validity_patterns.push(ValidityPatternData { allowed_dates });
        }

        // routes, route points, vehicle journeys and stop times
        let mut routes: Vec<RouteData> = Vec::new();
        let mut route_points: Vec<RoutePointData> = Vec::new();
        let mut vehicle_journeys: Vec<VehicleJourneyData> = Vec::new();
        let mut stop_times: Vec<StopTimeData> = Vec::new();
        let mut stop_point_data: Vec<StopPointData> = stop_point_ids
            .iter()
            .enumerate()
            .map(|(stop_idx, stop_id)| StopPointData {
                external_code: stop_id.clone(),
                stop_area: area_of_stop[stop_idx].unwrap(),
                route_point_list: Vec::new(),
            })
            .collect();

        for route_draft in &self.routes {
            let route = Route { idx: routes.len() };
            let mut vj_drafts: Vec<&VehicleJourneyDraft> = self
                .vehicle_journeys
                .iter()
                .filter(|vj| vj.route_id == route_draft.id)
                .collect();
            if vj_drafts.is_empty() {
                continue;
            }
            // journeys of a route are sorted by departure time, and must all
            // serve the same stop sequence
            vj_drafts.sort_by_key(|vj| vj.stops[0].departure_time);
            let sequence: Vec<&str> = vj_drafts[0]
                .stops
                .iter()
                .map(|stop| stop.stop_id.as_str())
                .collect();
            for vj in &vj_drafts {
                let vj_sequence: Vec<&str> =
                    vj.stops.iter().map(|stop| stop.stop_id.as_str()).collect();
                assert!(
                    vj_sequence == sequence,
                    "vehicle journeys of route `{}` serve different stop sequences",
                    route_draft.id
                );
            }

            let mut route_point_list = Vec::new();
            for (order, stop_id) in sequence.iter().enumerate() {
                let route_point = RoutePoint {
                    idx: route_points.len(),
                };
                let stop_point = stop_point_codes[*stop_id];
                route_points.push(RoutePointData {
                    route,
                    order,
                    stop_point,
                });
                stop_point_data[stop_point.idx].route_point_list.push(route_point);
                route_point_list.push(route_point);
            }

            let mut vehicle_journey_list = Vec::new();
            for vj_draft in &vj_drafts {
                let vehicle_journey = VehicleJourney {
                    idx: vehicle_journeys.len(),
                };
                let mut stop_time_list = Vec::new();
                for (order, stop) in vj_draft.stops.iter().enumerate() {
                    let stop_time = StopTime {
                        idx: stop_times.len(),
                    };
                    stop_times.push(StopTimeData {
                        arrival_time: stop.arrival_time,
                        departure_time: stop.departure_time,
                        vehicle_journey,
                        route_point: route_point_list[order],
                        local_traffic_zone: stop.local_traffic_zone,
                        pick_up_allowed: stop.pick_up_allowed,
                        drop_off_allowed: stop.drop_off_allowed,
                    });
                    stop_time_list.push(stop_time);
                }
                vehicle_journeys.push(VehicleJourneyData {
                    validity_pattern: pattern_of_calendar[&vj_draft.calendar_id],
                    stop_time_list,
                });
                vehicle_journey_list.push(vehicle_journey);
            }

            routes.push(RouteData {
                external_code: route_draft.id.clone(),
                line: line_of_code[&route_draft.line_id],
                mode: mode_of_code[&route_draft.mode_id],
                route_point_list,
                vehicle_journey_list,
            });
        }

        // footpaths, sorted by source stop point then duration
        let mut sorted_foot_paths: Vec<(usize, FootPath)> = self
            .transfers
            .iter()
            .map(|(from, to, duration)| {
                (
                    stop_point_codes[from].idx,
                    FootPath {
                        destination: stop_point_codes[to],
                        duration: *duration,
                    },
                )
            })
            .collect();
        sorted_foot_paths.sort_by_key(|(source, foot_path)| (*source, foot_path.duration));
        let mut foot_paths = Vec::new();
        let mut footpath_index = vec![(0usize, 0usize); stop_point_ids.len()];
        for (source, foot_path) in sorted_foot_paths {
            if footpath_index[source].1 == 0 {
                footpath_index[source].0 = foot_paths.len();
            }
            footpath_index[source].1 += 1;
            foot_paths.push(foot_path);
        }

        // route point connections
        let mut connections_forward: Vec<Vec<RoutePointConnection>> =
            vec![Vec::new(); route_points.len()];
        let mut connections_backward: Vec<Vec<RoutePointConnection>> =
            vec![Vec::new(); route_points.len()];
        let find_route_point = |route_id: &str, stop_id: &str| -> RoutePoint {
            let route = routes
                .iter()
                .find(|route| route.external_code == route_id)
                .unwrap_or_else(|| panic!("unknown route `{}`", route_id));
            let stop_point = stop_point_codes[stop_id];
            *route
                .route_point_list
                .iter()
                .find(|route_point| route_points[route_point.idx].stop_point == stop_point)
                .unwrap_or_else(|| panic!("route `{}` has no stop `{}`", route_id, stop_id))
        };
        for connection in &self.connections {
            let from = find_route_point(&connection.from.0, &connection.from.1);
            let to = find_route_point(&connection.to.0, &connection.to.1);
            connections_forward[from.idx].push(RoutePointConnection {
                destination: to,
                length: connection.length,
                kind: connection.kind,
            });
            connections_backward[to.idx].push(RoutePointConnection {
                destination: from,
                length: connection.length,
                kind: connection.kind,
            });
        }

        TransitData {
            calendar,
            stop_points: stop_point_data,
            stop_areas,
            lines,
            modes,
            routes,
            route_points,
            vehicle_journeys,
            stop_times,
            validity_patterns,
            foot_paths,
            footpath_index,
            connections_forward,
            connections_backward,
            stop_point_codes,
            stop_area_codes,
        }
    }
}

impl<'a> VehicleJourneyBuilder<'a> {
    /// Serve a stop, with its arrival and departure times.
    pub fn st(self, stop_id: &str, arrival: impl IntoTime, departure: impl IntoTime) -> Self {
        self.st_detailed(stop_id, arrival, departure, true, true, None)
    }

    pub fn st_detailed(
        self,
        stop_id: &str,
        arrival: impl IntoTime,
        departure: impl IntoTime,
        pick_up_allowed: bool,
        drop_off_allowed: bool,
        local_traffic_zone: Option<u32>,
    ) -> Self {
        let draft = &mut self.builder.vehicle_journeys[self.vj_idx];
        draft.stops.push(StopTimeDraft {
            stop_id: stop_id.to_string(),
            arrival_time: arrival.into_time() % SECONDS_PER_DAY,
            departure_time: departure.into_time() % SECONDS_PER_DAY,
            pick_up_allowed,
            drop_off_allowed,
            local_traffic_zone,
        });
        self
    }

    /// Attach the vehicle journey to a calendar.
    pub fn calendar(self, calendar_id: &str) -> Self {
        self.builder.vehicle_journeys[self.vj_idx].calendar_id = calendar_id.to_string();
        self
    }
}

pub trait IntoTime {
    fn into_time(&self) -> u32;
}

impl IntoTime for u32 {
    fn into_time(&self) -> u32 {
        *self
    }
}

impl IntoTime for &str {
    // Note: if the string is not in the right format, this conversion will fail
    fn into_time(&self) -> u32 {
        let duration: PositiveDuration = self.parse().expect("invalid time format");
        duration.total_seconds() as u32
    }
}

pub trait AsDate {
    fn as_date(&self) -> NaiveDate;
}

impl AsDate for NaiveDate {
    fn as_date(&self) -> NaiveDate {
        *self
    }
}

impl AsDate for &str {
    // Note: if the string is not in the right format, this conversion will fail
    fn as_date(&self) -> NaiveDate {
        self.parse().expect("invalid date format")
    }
}
