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

use crate::time::PositiveDuration;
use serde::Deserialize;

pub const DEFAULT_WALKING_SPEED: f64 = 1.38; // meters per second

pub const DEFAULT_TRANSFER_WAITING_TIME: u32 = 120; // seconds

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestParams {
    /// speed used to convert access/egress distances into walking durations
    #[serde(default = "default_walking_speed")]
    pub walking_speed: f64,

    /// slack applied when changing vehicles at the same stop point
    #[serde(default = "default_transfer_waiting_time")]
    pub transfer_waiting_time: PositiveDuration,
}

pub fn default_walking_speed() -> f64 {
    DEFAULT_WALKING_SPEED
}

pub fn default_transfer_waiting_time() -> PositiveDuration {
    PositiveDuration::from_seconds(DEFAULT_TRANSFER_WAITING_TIME)
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            walking_speed: default_walking_speed(),
            transfer_waiting_time: default_transfer_waiting_time(),
        }
    }
}

impl RequestParams {
    /// Converts an access/egress distance to a walking duration, rounded
    /// down to whole seconds.
    pub fn walking_duration(&self, distance_meters: f64) -> u32 {
        debug_assert!(distance_meters >= 0.0);
        (distance_meters / self.walking_speed) as u32
    }
}
