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

mod utils;

use raptor::filters::Filters;
use raptor::modelbuilder::TransitDataBuilder;
use raptor::time::DateTime;
use raptor::Raptor;
use utils::{datetime, init_logger, stops};

#[test]
fn test_latest_departure_is_chosen() {
    init_logger();

    let data = TransitDataBuilder::new("2020-01-01", "2020-01-02")
        .vj("route_1", |vj| {
            vj.st("A", "07:00:00", "07:00:00")
                .st("B", "07:30:00", "07:30:00");
        })
        .vj("route_1", |vj| {
            vj.st("A", "08:20:00", "08:20:00")
                .st("B", "08:50:00", "08:50:00");
        })
        .build();

    let mut engine = Raptor::new(&data);
    let paths = engine.compute_reverse_all(
        &stops(&data, &["A"]),
        &stops(&data, &["B"]),
        datetime(0, "09:00:00"),
        DateTime::MIN,
        &Filters::empty(),
    );

    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert!(path.last_arrival().unwrap() <= datetime(0, "09:00:00"));
    assert_eq!(path.first_departure(), Some(datetime(0, "08:20:00")));
    assert_eq!(path.last_arrival(), Some(datetime(0, "08:50:00")));
}

// a clockwise query and the counter-clockwise query anchored at its arrival
// must describe the same journey
#[test]
fn test_direction_duality() {
    init_logger();

    let data = TransitDataBuilder::new("2020-01-01", "2020-01-02")
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
        .build();

    let mut engine = Raptor::new(&data);
    let forward_paths = engine.compute_all(
        &stops(&data, &["A"]),
        &stops(&data, &["D"]),
        datetime(0, "07:30:00"),
        DateTime::INF,
        &Filters::empty(),
    );
    assert_eq!(forward_paths.len(), 1);
    let forward_path = &forward_paths[0];
    let arrival = forward_path.last_arrival().unwrap();

    let reverse_paths = engine.compute_reverse_all(
        &stops(&data, &["A"]),
        &stops(&data, &["D"]),
        arrival,
        DateTime::MIN,
        &Filters::empty(),
    );
    assert_eq!(reverse_paths.len(), 1);
    let reverse_path = &reverse_paths[0];

    assert_eq!(reverse_path.duration, forward_path.duration);
    assert_eq!(reverse_path.first_departure(), forward_path.first_departure());
    assert_eq!(reverse_path.last_arrival(), forward_path.last_arrival());
}

// the boarding stop of the last leg sits at order 0 of its route : the
// counter-clockwise queue, reset at -1, must still accept it
#[test]
fn test_counter_clockwise_with_boarding_at_order_zero() {
    init_logger();

    let data = TransitDataBuilder::new("2020-01-01", "2020-01-02")
        .vj("route_1", |vj| {
            vj.st("A", "08:00:00", "08:00:00")
                .st("B", "08:30:00", "08:30:00");
        })
        .build();

    let mut engine = Raptor::new(&data);
    let paths = engine.compute_reverse_all(
        &stops(&data, &["A"]),
        &stops(&data, &["B"]),
        datetime(0, "09:00:00"),
        DateTime::MIN,
        &Filters::empty(),
    );

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].first_departure(), Some(datetime(0, "08:00:00")));
}
