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

fn frequent_line_data() -> raptor::transit_data::TransitData {
    TransitDataBuilder::new("2020-01-01", "2020-01-02")
        .vj("route_1", |vj| {
            vj.st("A", "08:05:00", "08:05:00")
                .st("B", "08:25:00", "08:25:00");
        })
        .vj("route_1", |vj| {
            vj.st("A", "08:20:00", "08:20:00")
                .st("B", "08:40:00", "08:40:00");
        })
        .vj("route_1", |vj| {
            vj.st("A", "08:35:00", "08:35:00")
                .st("B", "08:55:00", "08:55:00");
        })
        .build()
}

#[test]
fn test_multi_datetime_reuses_labels() {
    init_logger();

    let data = frequent_line_data();
    let departs = stops(&data, &["A"]);
    let destinations = stops(&data, &["B"]);
    let seeds = vec![
        datetime(0, "08:00:00"),
        datetime(0, "08:15:00"),
        datetime(0, "08:30:00"),
    ];

    let mut engine = Raptor::new(&data);
    let paths = engine.compute_all_multi(&departs, &destinations, seeds.clone(), DateTime::INF);

    // one journey per seed, latest seed first
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0].request_time, Some(datetime(0, "08:30:00")));
    assert_eq!(paths[0].first_departure(), Some(datetime(0, "08:35:00")));
    assert_eq!(paths[0].last_arrival(), Some(datetime(0, "08:55:00")));
    assert_eq!(paths[1].request_time, Some(datetime(0, "08:15:00")));
    assert_eq!(paths[1].first_departure(), Some(datetime(0, "08:20:00")));
    assert_eq!(paths[2].request_time, Some(datetime(0, "08:00:00")));
    assert_eq!(paths[2].first_departure(), Some(datetime(0, "08:05:00")));

    // the reused-label answers agree with independent queries
    for path in &paths {
        let mut fresh_engine = Raptor::new(&data);
        let single = fresh_engine.compute_all(
            &departs,
            &destinations,
            path.request_time.unwrap(),
            DateTime::INF,
            &Filters::empty(),
        );
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].first_departure(), path.first_departure());
        assert_eq!(single[0].last_arrival(), path.last_arrival());
    }
}

#[test]
fn test_multi_datetime_counter_clockwise() {
    init_logger();

    let data = frequent_line_data();
    let departs = stops(&data, &["A"]);
    let destinations = stops(&data, &["B"]);
    let seeds = vec![datetime(0, "08:30:00"), datetime(0, "09:00:00")];

    let mut engine = Raptor::new(&data);
    let paths =
        engine.compute_reverse_all_multi(&departs, &destinations, seeds, DateTime::MIN);

    assert_eq!(paths.len(), 2);
    // earliest seed first
    assert_eq!(paths[0].request_time, Some(datetime(0, "08:30:00")));
    assert_eq!(paths[0].first_departure(), Some(datetime(0, "08:05:00")));
    assert_eq!(paths[0].last_arrival(), Some(datetime(0, "08:25:00")));
    assert_eq!(paths[1].request_time, Some(datetime(0, "09:00:00")));
    assert_eq!(paths[1].first_departure(), Some(datetime(0, "08:35:00")));
    assert_eq!(paths[1].last_arrival(), Some(datetime(0, "08:55:00")));
}

#[test]
fn test_one_seed_finding_nothing_does_not_suppress_others() {
    init_logger();

    // vehicles run on the first day only
    let data = TransitDataBuilder::new("2020-01-01", "2020-01-03")
        .calendar("day_one", &["2020-01-01"])
        .vj("route_1", |vj| {
            vj.calendar("day_one")
                .st("A", "08:05:00", "08:05:00")
                .st("B", "08:25:00", "08:25:00");
        })
        .build();
    let departs = stops(&data, &["A"]);
    let destinations = stops(&data, &["B"]);
    let seeds = vec![datetime(2, "23:00:00"), datetime(0, "08:00:00")];

    let mut engine = Raptor::new(&data);
    let paths = engine.compute_all_multi(&departs, &destinations, seeds, DateTime::INF);

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].request_time, Some(datetime(0, "08:00:00")));
    assert_eq!(paths[0].first_departure(), Some(datetime(0, "08:05:00")));
}
