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

use raptor::chrono::NaiveDate;
use raptor::modelbuilder::TransitDataBuilder;
use raptor::{BadRequest, Raptor};
use utils::{datetime, init_logger};

// two platforms under the same departure area, each on its own route
fn station_data() -> raptor::transit_data::TransitData {
    TransitDataBuilder::new("2020-01-01", "2020-01-02")
        .stop_area("Gare", &["quai_1", "quai_2"])
        .vj("route_1", |vj| {
            vj.st("quai_1", "08:00:00", "08:00:00")
                .st("B", "08:45:00", "08:45:00");
        })
        .vj("route_2", |vj| {
            vj.st("quai_2", "08:10:00", "08:10:00")
                .st("B", "08:30:00", "08:30:00");
        })
        .build()
}

#[test]
fn test_compute_between_stop_areas() {
    init_logger();

    let data = station_data();
    let gare = data.stop_area_by_code("Gare").unwrap();
    let arrival = data.stop_area_by_code("B").unwrap();

    let mut engine = Raptor::new(&data);
    let paths = engine.compute(gare, arrival, 7 * 3600 + 30 * 60, 0, true);

    // the best platform of the area wins
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].first_departure(), Some(datetime(0, "08:10:00")));
    assert_eq!(paths[0].last_arrival(), Some(datetime(0, "08:30:00")));

    let paths = engine.compute(gare, arrival, 9 * 3600, 0, false);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].first_departure(), Some(datetime(0, "08:10:00")));
}

#[test]
fn test_solve_validates_the_datetime() {
    init_logger();

    let data = station_data();
    let gare = data.stop_area_by_code("Gare").unwrap();
    let arrival = data.stop_area_by_code("B").unwrap();
    let mut engine = Raptor::new(&data);

    let paths = engine
        .solve(
            gare,
            arrival,
            NaiveDate::from_ymd(2020, 1, 1).and_hms(7, 30, 0),
            true,
        )
        .unwrap();
    assert_eq!(paths.len(), 1);

    let error = engine
        .solve(
            gare,
            arrival,
            NaiveDate::from_ymd(2021, 6, 1).and_hms(7, 30, 0),
            true,
        )
        .unwrap_err();
    assert!(matches!(error, BadRequest::DepartureDatetime));
}
