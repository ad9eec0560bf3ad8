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

use crate::time::{DateTime, PositiveDuration};
use crate::transit_data::{StopPoint, VehicleJourney};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathItemType {
    PublicTransport,
    Walking,
    Extension,
    Guarantee,
}

/// One leg of a journey. A `PublicTransport` item carries the full sequence
/// of served stop points with their arrival and departure instants ; the
/// other kinds link exactly two stop points.
#[derive(Debug, Clone)]
pub struct PathItem {
    pub item_type: PathItemType,
    pub stop_points: Vec<StopPoint>,
    pub arrivals: Vec<DateTime>,
    pub departures: Vec<DateTime>,
    pub vehicle_journey: Option<VehicleJourney>,
    pub departure: DateTime,
    pub arrival: DateTime,
}

impl PathItem {
    pub(crate) fn walking(item_type: PathItemType, departure: DateTime, arrival: DateTime) -> Self {
        debug_assert!(item_type != PathItemType::PublicTransport);
        Self {
            item_type,
            stop_points: Vec::new(),
            arrivals: Vec::new(),
            departures: Vec::new(),
            vehicle_journey: None,
            departure,
            arrival,
        }
    }

    pub(crate) fn public_transport(vehicle_journey: VehicleJourney) -> Self {
        Self {
            item_type: PathItemType::PublicTransport,
            stop_points: Vec::new(),
            arrivals: Vec::new(),
            departures: Vec::new(),
            vehicle_journey: Some(vehicle_journey),
            departure: DateTime::MIN,
            arrival: DateTime::MIN,
        }
    }
}

/// A complete journey, chronological from the first boarding to the last
/// alighting.
#[derive(Debug, Clone)]
pub struct Path {
    pub items: Vec<PathItem>,
    pub duration: PositiveDuration,
    pub nb_changes: u32,
    /// Exploration statistic : share of initialized best labels, in percent.
    /// The divisor is the number of stop points while labels are counted per
    /// route point, so the value may exceed 100. Kept as a statistic only.
    pub percent_visited: u32,
    /// Set by the multi-datetime entry points to the seed this path answers.
    pub request_time: Option<DateTime>,
}

impl Path {
    pub fn first_departure(&self) -> Option<DateTime> {
        self.items.first().map(|item| item.departure)
    }

    pub fn last_arrival(&self) -> Option<DateTime> {
        self.items.last().map(|item| item.arrival)
    }

    pub fn nb_of_public_transport_items(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.item_type == PathItemType::PublicTransport)
            .count()
    }
}
