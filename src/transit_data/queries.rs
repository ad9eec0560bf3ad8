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

use super::data::{Route, StopTime, TransitData, VehicleJourney};
use crate::time::DateTime;

impl TransitData {
    pub(crate) fn stop_time_at(&self, vehicle_journey: VehicleJourney, order: usize) -> StopTime {
        self.vehicle_journeys[vehicle_journey.idx].stop_time_list[order]
    }

    fn departure_time_at(&self, vehicle_journey: VehicleJourney, order: usize) -> u32 {
        self.stop_times[self.stop_time_at(vehicle_journey, order).idx].departure_time
    }

    fn arrival_time_at(&self, vehicle_journey: VehicleJourney, order: usize) -> u32 {
        self.stop_times[self.stop_time_at(vehicle_journey, order).idx].arrival_time
    }

    fn is_running_around(&self, vehicle_journey: VehicleJourney, date: u16) -> bool {
        let pattern = self.vehicle_journeys[vehicle_journey.idx].validity_pattern;
        self.validity_patterns[pattern.idx].check_around(date)
    }

    /// The first vehicle journey of `route` departing from position `order`
    /// at or after `from`, among those running around `from.date()`.
    ///
    /// The journeys of a route are sorted by departure time at each
    /// position, so a binary search locates the candidate window and a
    /// forward scan resolves validity. When no journey departs later the
    /// same day, the search wraps to the first departure of the next day.
    pub fn earliest_trip(
        &self,
        route: Route,
        order: usize,
        from: DateTime,
    ) -> Option<VehicleJourney> {
        let vehicle_journeys = &self.routes[route.idx].vehicle_journey_list;
        let date = from.date();
        let seconds = from.seconds_of_day();

        let start = vehicle_journeys.partition_point(|vj| self.departure_time_at(*vj, order) < seconds);

        for vehicle_journey in &vehicle_journeys[start..] {
            if self.is_running_around(*vehicle_journey, date) {
                return Some(*vehicle_journey);
            }
        }

        // wrap to the next day : any departure time fits, the working
        // datetime rolls its date when updated with an earlier seconds-of-day
        for vehicle_journey in vehicle_journeys {
            if self.is_running_around(*vehicle_journey, date + 1) {
                return Some(*vehicle_journey);
            }
        }

        None
    }

    /// The last vehicle journey of `route` arriving at position `order`
    /// at or before `until`, among those running around `until.date()`.
    /// The dual of `earliest_trip`.
    pub fn tardiest_trip(
        &self,
        route: Route,
        order: usize,
        until: DateTime,
    ) -> Option<VehicleJourney> {
        let vehicle_journeys = &self.routes[route.idx].vehicle_journey_list;
        let date = until.date();
        let seconds = until.seconds_of_day();

        let end = vehicle_journeys.partition_point(|vj| self.arrival_time_at(*vj, order) <= seconds);

        for vehicle_journey in vehicle_journeys[..end].iter().rev() {
            if self.is_running_around(*vehicle_journey, date) {
                return Some(*vehicle_journey);
            }
        }

        if date == 0 {
            return None;
        }

        // wrap to the latest arrival of the previous day
        for vehicle_journey in vehicle_journeys.iter().rev() {
            if self.is_running_around(*vehicle_journey, date - 1) {
                return Some(*vehicle_journey);
            }
        }

        None
    }

    /// True when some vehicle journey of `route` fires within one day of
    /// `date`.
    pub fn is_route_running_around(&self, route: Route, date: u16) -> bool {
        self.routes[route.idx]
            .vehicle_journey_list
            .iter()
            .any(|vj| self.is_running_around(*vj, date))
    }
}
