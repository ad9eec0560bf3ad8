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

#![allow(dead_code)]

use raptor::response::{Path, PathItemType};
use raptor::time::DateTime;
use raptor::transit_data::{StopPoint, TransitData};

pub fn init_logger() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(env_filter)
        .try_init();
}

/// (stop point, access distance 0) pairs for the named stops.
pub fn stops(data: &TransitData, names: &[&str]) -> Vec<(StopPoint, f64)> {
    names
        .iter()
        .map(|name| {
            (
                data.stop_point_by_code(name)
                    .unwrap_or_else(|| panic!("unknown stop `{}`", name)),
                0.0,
            )
        })
        .collect()
}

pub fn datetime(day: u16, time: &str) -> DateTime {
    let duration: raptor::PositiveDuration = time.parse().expect("invalid time format");
    DateTime::new(day, duration.total_seconds() as u32)
}

/// The stop point codes along a path, leg by leg.
pub fn stop_codes(data: &TransitData, path: &Path) -> Vec<Vec<String>> {
    path.items
        .iter()
        .map(|item| {
            item.stop_points
                .iter()
                .map(|stop_point| data.stop_point_data(*stop_point).external_code.clone())
                .collect()
        })
        .collect()
}

pub fn item_types(path: &Path) -> Vec<PathItemType> {
    path.items.iter().map(|item| item.item_type).collect()
}
