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

use std::time::SystemTime;

use super::best_dest::BestDest;
use super::init::{self, Departure};
use super::visitors::{Backward, Forward};
use crate::engine::raptor::Raptor;
use crate::filters::Filters;
use crate::response::Path;
use crate::time::DateTime;
use crate::transit_data::{StopArea, StopPoint};
use chrono::NaiveDateTime;
use tracing::debug;

#[derive(Debug)]
pub enum BadRequest {
    DepartureDatetime,
    NoValidDepartureStop,
    NoValidArrivalStop,
}

impl std::error::Error for BadRequest {}

impl std::fmt::Display for BadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BadRequest::DepartureDatetime => write!(
                f,
                "The requested datetime is out of the validity period of the data."
            ),
            BadRequest::NoValidDepartureStop => {
                write!(f, "No valid departure stop among the provided ones.")
            }
            BadRequest::NoValidArrivalStop => {
                write!(f, "No valid arrival stop among the provided ones.")
            }
        }
    }
}

impl<'data> Raptor<'data> {
    /// Earliest-arrival search : one clockwise pass bounds the destination,
    /// then one counter-clockwise pass per reached transfer count enumerates
    /// the Pareto-optimal journeys in (arrival, transfers).
    pub fn compute_all(
        &mut self,
        departs: &[(StopPoint, f64)],
        destinations: &[(StopPoint, f64)],
        dt_depart: DateTime,
        bound: DateTime,
        forbidden: &Filters<'_>,
    ) -> Vec<Path> {
        debug!("Start computing journeys");
        let request_timer = SystemTime::now();
        let mut result = Vec::new();

        let departures = init::departures(self.data, departs, dt_depart, true, &self.params);
        self.set_valid_routes(dt_depart.date(), forbidden);
        self.clear_and_init::<Forward>(&departures, destinations, bound, true);
        self.raptor_loop::<Forward>(true);

        if !self.best_dest.has_reached_destination() {
            debug!("No journey found");
            return result;
        }

        let seeds = init::per_round_seeds(
            self.data,
            &self.labels,
            self.count,
            destinations,
            &self.params,
            true,
        );
        for seed in seeds {
            self.clear_and_init::<Backward>(&[seed], departs, dt_depart, true);
            self.raptor_loop::<Backward>(true);
            if self.best_dest.has_reached_destination() {
                result.extend(self.make_paths_reverse(departs, dt_depart));
            }
        }

        debug!(
            "{} journeys computed in {} ms with {} rounds",
            result.len(),
            request_timer.elapsed().unwrap().as_millis(),
            self.nb_of_rounds()
        );
        result
    }

    /// Latest-departure search, the dual of `compute_all` : one
    /// counter-clockwise pass from the destinations, then clockwise
    /// enumeration passes.
    pub fn compute_reverse_all(
        &mut self,
        departs: &[(StopPoint, f64)],
        destinations: &[(StopPoint, f64)],
        dt_depart: DateTime,
        bound: DateTime,
        forbidden: &Filters<'_>,
    ) -> Vec<Path> {
        debug!("Start computing journeys, counter-clockwise");
        let request_timer = SystemTime::now();
        let mut result = Vec::new();

        let departures = init::departures(self.data, destinations, dt_depart, false, &self.params);
        self.set_valid_routes(dt_depart.date(), forbidden);
        self.clear_and_init::<Backward>(&departures, departs, bound, true);
        self.raptor_loop::<Backward>(true);

        if !self.best_dest.has_reached_destination() {
            debug!("No journey found");
            return result;
        }

        let seeds = init::per_round_seeds(
            self.data,
            &self.labels,
            self.count,
            departs,
            &self.params,
            false,
        );
        for seed in seeds {
            self.clear_and_init::<Forward>(&[seed], destinations, dt_depart, true);
            self.raptor_loop::<Forward>(true);
            if self.best_dest.has_reached_destination() {
                result.extend(self.make_paths(destinations, dt_depart));
            }
        }

        debug!(
            "{} journeys computed in {} ms with {} rounds",
            result.len(),
            request_timer.elapsed().unwrap().as_millis(),
            self.nb_of_rounds()
        );
        result
    }

    /// Earliest-arrival search over several departure datetimes, reusing the
    /// label tensor across passes : seeds are visited latest first, so each
    /// pass only tightens labels. One journey per seed, stamped with its
    /// `request_time`.
    pub fn compute_all_multi(
        &mut self,
        departs: &[(StopPoint, f64)],
        destinations: &[(StopPoint, f64)],
        mut dt_departs: Vec<DateTime>,
        bound: DateTime,
    ) -> Vec<Path> {
        let mut result = Vec::new();
        let mut bests: Vec<BestDest> = Vec::new();

        dt_departs.sort_by(|a, b| b.cmp(a));
        let dates: Vec<u16> = dt_departs.iter().map(DateTime::date).collect();
        self.set_valid_routes_for_dates(&dates, &Filters::empty());

        let mut reset = true;
        for dt_depart in &dt_departs {
            let departures = init::departures(self.data, departs, *dt_depart, true, &self.params);
            self.clear_and_init::<Forward>(&departures, destinations, bound, reset);
            self.raptor_loop::<Forward>(true);
            bests.push(self.best_dest.clone());
            reset = false;
        }

        for (best, dt_depart) in bests.iter().zip(dt_departs.iter()) {
            let route_point = match best.best_now_route_point {
                None => continue,
                Some(route_point) => route_point,
            };
            let seed = Departure {
                route_point,
                datetime: best.best_now.arrival,
            };
            self.clear_and_init::<Backward>(&[seed], departs, *dt_depart, true);
            self.raptor_loop::<Backward>(true);
            if self.best_dest.has_reached_destination() {
                if let Some(mut path) = self.make_paths_reverse(departs, *dt_depart).pop() {
                    path.request_time = Some(*dt_depart);
                    result.push(path);
                }
            }
        }

        result
    }

    /// Latest-departure search over several arrival datetimes, the dual of
    /// `compute_all_multi` : seeds visited earliest first.
    pub fn compute_reverse_all_multi(
        &mut self,
        departs: &[(StopPoint, f64)],
        destinations: &[(StopPoint, f64)],
        mut dt_departs: Vec<DateTime>,
        bound: DateTime,
    ) -> Vec<Path> {
        let mut result = Vec::new();
        let mut bests: Vec<BestDest> = Vec::new();

        dt_departs.sort();
        let dates: Vec<u16> = dt_departs.iter().map(DateTime::date).collect();
        self.set_valid_routes_for_dates(&dates, &Filters::empty());

        let mut reset = true;
        for dt_depart in &dt_departs {
            let departures =
                init::departures(self.data, destinations, *dt_depart, false, &self.params);
            self.clear_and_init::<Backward>(&departures, departs, bound, reset);
            self.raptor_loop::<Backward>(true);
            bests.push(self.best_dest.clone());
            reset = false;
        }

        for (best, dt_depart) in bests.iter().zip(dt_departs.iter()) {
            let route_point = match best.best_now_route_point {
                None => continue,
                Some(route_point) => route_point,
            };
            let seed = Departure {
                route_point,
                datetime: best.best_now.departure,
            };
            self.clear_and_init::<Forward>(&[seed], destinations, *dt_depart, true);
            self.raptor_loop::<Forward>(true);
            if self.best_dest.has_reached_destination() {
                if let Some(mut path) = self.make_paths(destinations, *dt_depart).pop() {
                    path.request_time = Some(*dt_depart);
                    result.push(path);
                }
            }
        }

        result
    }

    /// Stop-area convenience entry : expands both areas to zero-distance
    /// stop points and dispatches on the time direction.
    pub fn compute(
        &mut self,
        departure: StopArea,
        destination: StopArea,
        seconds_of_day: u32,
        day: u16,
        clockwise: bool,
    ) -> Vec<Path> {
        let departs: Vec<(StopPoint, f64)> = self
            .data
            .stop_points_of_stop_area(departure)
            .map(|stop_point| (stop_point, 0.0))
            .collect();
        let destinations: Vec<(StopPoint, f64)> = self
            .data
            .stop_points_of_stop_area(destination)
            .map(|stop_point| (stop_point, 0.0))
            .collect();
        let datetime = DateTime::new(day, seconds_of_day);

        if clockwise {
            self.compute_all(
                &departs,
                &destinations,
                datetime,
                DateTime::INF,
                &Filters::empty(),
            )
        } else {
            self.compute_reverse_all(
                &departs,
                &destinations,
                datetime,
                DateTime::MIN,
                &Filters::empty(),
            )
        }
    }

    /// Validating entry over `compute` : checks the datetime against the
    /// dataset calendar and that both stop areas have stop points.
    pub fn solve(
        &mut self,
        departure: StopArea,
        destination: StopArea,
        datetime: NaiveDateTime,
        clockwise: bool,
    ) -> Result<Vec<Path>, BadRequest> {
        let datetime = self
            .data
            .calendar
            .from_naive_datetime(datetime)
            .ok_or(BadRequest::DepartureDatetime)?;
        if self.data.stop_points_of_stop_area(departure).next().is_none() {
            return Err(BadRequest::NoValidDepartureStop);
        }
        if self
            .data
            .stop_points_of_stop_area(destination)
            .next()
            .is_none()
        {
            return Err(BadRequest::NoValidArrivalStop);
        }
        Ok(self.compute(
            departure,
            destination,
            datetime.seconds_of_day(),
            datetime.date(),
            clockwise,
        ))
    }
}
