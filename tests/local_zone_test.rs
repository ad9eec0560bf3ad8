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

// A and B share a local traffic zone : a journey boarding at A may not
// alight before leaving the zone
fn zoned_data() -> raptor::transit_data::TransitData {
    TransitDataBuilder::new("2020-01-01", "2020-01-02")
        .vj("route_1", |vj| {
            vj.st_detailed("A", "08:00:00", "08:00:00", true, true, Some(1))
                .st_detailed("B", "08:10:00", "08:10:00", true, true, Some(1))
                .st("C", "08:20:00", "08:20:00");
        })
        .build()
}

#[test]
fn test_no_alighting_inside_the_boarding_zone() {
    init_logger();

    let data = zoned_data();
    let mut engine = Raptor::new(&data);
    let paths = engine.compute_all(
        &stops(&data, &["A"]),
        &stops(&data, &["B"]),
        datetime(0, "07:30:00"),
        DateTime::INF,
        &Filters::empty(),
    );
    assert!(paths.is_empty());
}

#[test]
fn test_alighting_resumes_outside_the_zone() {
    init_logger();

    let data = zoned_data();
    let mut engine = Raptor::new(&data);
    let paths = engine.compute_all(
        &stops(&data, &["A"]),
        &stops(&data, &["C"]),
        datetime(0, "07:30:00"),
        DateTime::INF,
        &Filters::empty(),
    );
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].last_arrival(), Some(datetime(0, "08:20:00")));
}
